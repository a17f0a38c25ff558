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

//! # mdd-solver
//!
//! A generic branch-and-bound solver for discrete *maximization* problems,
//! based on bounded-width multi-valued decision diagrams (MDDs). You describe
//! your problem through the [`Problem`] trait (a root node, a successor
//! function and a state-merge operator) and the library compiles that
//! description, layer by layer, into approximate decision diagrams:
//!
//! * **restricted** MDDs are obtained by *deleting* nodes whenever a layer
//!   grows wider than the maximum width. They yield feasible solutions, hence
//!   lower bounds on the optimum.
//! * **relaxed** MDDs are obtained by *merging* nodes. They over-approximate
//!   the reachable states and yield upper bounds on the optimum.
//!
//! A best-first branch-and-bound loop coordinates these compilations: each
//! relaxed diagram contributes an *exact cutset* (the deepest layer whose
//! nodes were never touched by a merge or a deletion) whose nodes become the
//! open subproblems of the search. The search is over when the incumbent
//! meets the tightest upper bound of the open queue.
//!
//! Minimization problems are solved by negating their transition costs.
//!
//! ## Example
//!
//! The following solves the (trivial) problem of maximizing the sum of three
//! binary variables. The state counts the number of variables set to one.
//!
//! ```
//! use mdd_solver::*;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct BinState(usize);
//!
//! impl StateRepresentation for BinState {
//!     fn rank(&self, node: &Node<Self>) -> f64 {
//!         node.value as f64
//!     }
//! }
//!
//! struct AllOnes {
//!     n: usize,
//! }
//!
//! impl Problem for AllOnes {
//!     type State = BinState;
//!
//!     fn nb_variables(&self) -> usize {
//!         self.n
//!     }
//!     fn root(&self) -> Node<BinState> {
//!         Node::root(BinState(0), self.n)
//!     }
//!     fn successors(&self, node: &Node<BinState>, _var: Variable) -> Vec<Node<BinState>> {
//!         let pos = node.layer_number;
//!         vec![
//!             node.successor(node.state.clone(), node.value, pos, 0),
//!             node.successor(BinState(node.state.0 + 1), node.value + 1, pos, 1),
//!         ]
//!     }
//!     fn merge(&self, nodes: &[Node<BinState>]) -> Node<BinState> {
//!         let best = nodes.iter().max_by_key(|n| n.value).unwrap();
//!         let union = nodes.iter().map(|n| n.state.0).max().unwrap();
//!         let mut merged = best.clone();
//!         merged.state = BinState(union);
//!         merged
//!     }
//! }
//!
//! let problem = AllOnes { n: 3 };
//! let mut solver = SequentialSolver::new(&problem);
//! let outcome = solver.maximize().unwrap();
//!
//! assert!(outcome.is_exact);
//! assert_eq!(Some(3), outcome.best_value);
//!
//! let solution = solver.best_solution().unwrap();
//! assert!(solution.iter().all(|v| v.value() == Some(1)));
//! ```

mod common;
mod utils;
mod abstraction;
mod implementation;

pub use common::*;
pub use utils::*;
pub use abstraction::*;
pub use implementation::*;
