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

//! This module defines a layer of abstraction for the heuristics one can use
//! to customize the development of MDDs: the three node/variable selection
//! policies, the maximum-width policy, and the cutoff criterion.
//!
//! Every heuristic is required to be *pure* (no state mutated across calls)
//! and deterministic given its inputs; this is what makes two runs of the
//! solver on the same problem produce identical results.

use crate::{Layer, Node, Variable, VarSet};

/// This trait defines an heuristic to determine the next variable to branch
/// on while developing an MDD.
pub trait VariableSelector<T> {
    /// Returns the variable to branch on from the set of `free` (unbound)
    /// variables, or `None` in case no branching is possible. The choice may
    /// depend on the nodes of the layer about to be expanded.
    fn next_var(&self, layer: &Layer<T>, free: &VarSet) -> Option<Variable>;
}

/// This trait defines an heuristic to select the nodes of an overflowing
/// layer that are to be collapsed into a single merged node when compiling a
/// *relaxed* MDD.
pub trait MergeSelector<T> {
    /// Returns exactly `count` (>= 2) distinct nodes from the given layer.
    fn select<'a>(&self, layer: &'a Layer<T>, count: usize) -> Vec<&'a Node<T>>;
}

/// This trait defines an heuristic to select the nodes of an overflowing
/// layer that are to be dropped when compiling a *restricted* MDD.
pub trait DeleteSelector<T> {
    /// Returns `count` distinct nodes from the given layer; removing them
    /// must bring the layer back within the maximum width.
    fn select<'a>(&self, layer: &'a Layer<T>, count: usize) -> Vec<&'a Node<T>>;
}

/// This trait defines an heuristic to determine the maximum allowed width of
/// the layers of the (approximate) MDD compiled for some subproblem.
pub trait WidthHeuristic {
    /// Returns the maximum layer width allowed when the given variables are
    /// still free at the root of the compilation.
    fn max_width(&self, free: &VarSet) -> usize;
}

/// This trait encapsulates a criterion (external to the solver) which imposes
/// to stop searching for a better solution. The solver consults it at its
/// yield points only: at the top of the main loop and after each restricted
/// or relaxed compilation. Tripping the cutoff is a graceful interruption,
/// not an error: the best incumbent found so far is returned.
pub trait Cutoff {
    /// Returns true iff the search must stop.
    fn must_stop(&self) -> bool;
}
