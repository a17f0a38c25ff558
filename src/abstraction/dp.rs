// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module defines the contracts a client must implement in order to
//! solve an optimization problem with this library: `StateRepresentation`
//! (the combinatorial payload attached to the nodes of the diagrams) and
//! `Problem` (the transition system itself).

use std::hash::Hash;

use crate::{Node, Variable};

/// The problem-defined payload carried by every node of a decision diagram.
///
/// The core never inspects the contents of a state representation: all it
/// requires is value-equality, a deterministic hash (used to key the layers),
/// a deep copy (`Clone`), and a scalar `rank`. The rank is what the default
/// merge and delete selectors order the nodes of an overflowing layer by:
/// the *lower* the rank, the *lower* the priority to keep the node untouched.
pub trait StateRepresentation: Clone + Eq + Hash {
    /// A scalar measure of how promising the node carrying this state is.
    fn rank(&self, node: &Node<Self>) -> f64;
}

/// This trait defines the "contract" of what defines an optimization problem
/// solvable with the branch-and-bound with MDD paradigm. An implementation of
/// this trait effectively defines a DP formulation of the problem being
/// maximized. (Minimization problems negate their transition costs.)
pub trait Problem {
    /// The type of the state representations the problem works with.
    type State: StateRepresentation;

    /// Any problem bears on a number of variables $x_0, x_1, ..., x_{n-1}$.
    /// This method returns the value of the number $n$.
    fn nb_variables(&self) -> usize;

    /// This method returns the root node of the problem: a node at layer 0
    /// carrying the initial state, a fresh unbound variable sequence of
    /// length `nb_variables()`, and the initial longest-path value.
    fn root(&self) -> Node<Self::State>;

    /// Given a node and the variable being branched on, this method returns
    /// one successor node per value the variable may take from the node's
    /// state. Each successor must be derived with [`Node::successor`] so that
    /// it carries the updated state, the cumulated longest-path value, the
    /// new assignment and the incremented layer number.
    ///
    /// An empty result denotes a dead-end. To cross a layer on which the node
    /// cannot branch (e.g. a merged state whose domain came up empty), return
    /// a single successor with an unchanged state and value, bound to some
    /// sentinel decision value.
    fn successors(&self, node: &Node<Self::State>, var: Variable) -> Vec<Node<Self::State>>;

    /// Given the nodes selected for merging, this method returns a node whose
    /// state representation over-approximates (e.g. unions) the merged
    /// states, and whose assignment is the one of the best-valued input. The
    /// engine takes care of setting the value (the max over the inputs) and
    /// of flagging the merged node inexact.
    fn merge(&self, nodes: &[Node<Self::State>]) -> Node<Self::State>;
}
