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

//! This module defines the `Solver` trait.

use crate::{Completion, ContractViolation, Variable};

/// A solution is the complete assignment found by the solver: the sequence of
/// all problem variables, each bound to a value, sorted by variable id.
pub type Solution = Vec<Variable>;

/// This is the solver abstraction. It is implemented by a structure that
/// implements the branch-and-bound with MDD paradigm to find the best
/// possible solution to a given maximization problem.
pub trait Solver {
    /// This method orders the solver to search for the optimal solution among
    /// all possibilities. It returns a `Completion` standing for the outcome
    /// of the attempted maximization, which is marked **exact** when the
    /// search ran until optimality was proved and inexact when it was stopped
    /// by the cutoff criterion. Four cases are to be distinguished:
    ///
    /// * `is_exact` and a `best_value` is present: `best_value` is the
    ///   maximum of the objective function.
    /// * not `is_exact` and a `best_value` is present: it is the best value
    ///   known at the time of the cutoff.
    /// * `is_exact` and no `best_value`: the problem admits no feasible
    ///   solution at all.
    /// * not `is_exact` and no `best_value`: no feasible solution was found
    ///   before the cutoff occurred.
    ///
    /// The error case only ever materializes a broken `Problem` or selector
    /// implementation; it is reported verbatim, as detected by the engine.
    fn maximize(&mut self) -> Result<Completion, ContractViolation>;

    /// This method returns the value of the objective function for the best
    /// solution that has been found. It returns `None` when no solution
    /// exists to the problem (or none was found yet).
    fn best_value(&self) -> Option<isize>;
    /// This method returns the best solution found to the optimization
    /// problem, as a complete assignment sorted by variable id. It returns
    /// `None` when no feasible solution is known.
    fn best_solution(&self) -> Option<Solution>;

    /// Returns the best lower bound that has been identified so far.
    /// In case no solution has been found, it returns the minimum value that
    /// fits within an isize (-inf).
    fn best_lower_bound(&self) -> isize;
    /// Returns the tightest upper bound that can be guaranteed so far.
    /// In case no upper bound has been computed, it returns the maximum value
    /// that fits within an isize (+inf).
    fn best_upper_bound(&self) -> isize;

    /// Gives the gap between the lower and upper bound, as a real number in
    /// [0, 1]. The gap is 1 as long as no finite upper bound is known, and 0
    /// once both bounds meet.
    fn gap(&self) -> f64 {
        let ub = self.best_upper_bound();
        let lb = self.best_lower_bound();
        if ub == isize::MAX || lb == isize::MIN {
            1.0
        } else if ub == lb {
            0.0
        } else if ub < 0 {
            (ub - lb).abs() as f64 / lb.abs() as f64
        } else {
            (ub - lb) as f64 / ub as f64
        }
    }
}
