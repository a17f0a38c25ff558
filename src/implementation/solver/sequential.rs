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

//! This module provides the implementation of a sequential branch-and-bound
//! MDD solver: a single thread of execution drives the compilation engine to
//! completion on one subproblem at a time, best-first.

use std::time::Instant;

use crate::{
    Completion, ContractViolation, Cutoff, FlatMdd, Fringe, MergeSelector, DeleteSelector,
    MinRankDelete, MinRankMerge, NaturalOrder, NbUnassigned, NoCutoff, Node, Problem,
    SimpleFringe, Solution, Solver, StateRepresentation, VariableSelector, WidthHeuristic,
};

/// This is the structure implementing the single-threaded branch-and-bound
/// MDD solver.
///
/// At every iteration, the solver pops the open subproblem with the least
/// upper bound, compiles a restricted diagram for it (possibly improving the
/// incumbent) and, when the restriction was inexact, a relaxed diagram whose
/// exact cutset spawns the child subproblems. Subproblems whose upper bound
/// cannot beat the incumbent are pruned, and the search is over (optimality
/// proved) once the queue is exhausted.
///
/// # Example Usage
/// ```
/// # use mdd_solver::*;
/// #
/// # #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// # struct BinState(usize);
/// # impl StateRepresentation for BinState {
/// #     fn rank(&self, node: &Node<Self>) -> f64 {
/// #         node.value as f64
/// #     }
/// # }
/// # struct AllOnes { n: usize }
/// # impl Problem for AllOnes {
/// #     type State = BinState;
/// #     fn nb_variables(&self) -> usize {
/// #         self.n
/// #     }
/// #     fn root(&self) -> Node<BinState> {
/// #         Node::root(BinState(0), self.n)
/// #     }
/// #     fn successors(&self, node: &Node<BinState>, _var: Variable) -> Vec<Node<BinState>> {
/// #         let pos = node.layer_number;
/// #         vec![
/// #             node.successor(node.state.clone(), node.value, pos, 0),
/// #             node.successor(BinState(node.state.0 + 1), node.value + 1, pos, 1),
/// #         ]
/// #     }
/// #     fn merge(&self, nodes: &[Node<BinState>]) -> Node<BinState> {
/// #         let best = nodes.iter().max_by_key(|n| n.value).unwrap();
/// #         let union = nodes.iter().map(|n| n.state.0).max().unwrap();
/// #         let mut merged = best.clone();
/// #         merged.state = BinState(union);
/// #         merged
/// #     }
/// # }
/// let problem = AllOnes { n: 3 };
/// let mut solver = SequentialSolver::new(&problem);
/// let outcome = solver.maximize().unwrap();
///
/// assert!(outcome.is_exact);
/// assert_eq!(Some(3), outcome.best_value);
/// ```
pub struct SequentialSolver<'a, T>
where
    T: StateRepresentation,
{
    /// A reference to the problem being maximized.
    problem: &'a dyn Problem<State = T>,
    /// The compilation engine used to develop the restricted and relaxed
    /// diagrams of each subproblem.
    mdd: FlatMdd<'a, T>,
    /// The maximum-width policy applied to each compilation.
    width: &'a dyn WidthHeuristic,
    /// The criterion deciding when to give up searching. It is consulted at
    /// the solver's yield points only; tripping it is a graceful
    /// interruption, not an error.
    cutoff: &'a dyn Cutoff,
    /// The priority queue of open subproblems, popped in ascending
    /// relaxed-value order.
    fringe: SimpleFringe<T>,

    /// Value of the best complete assignment found so far (-inf before the
    /// first incumbent).
    lower_bound: isize,
    /// Tightest global upper bound known so far (+inf initially).
    upper_bound: isize,
    /// The best complete assignment found so far.
    incumbent: Option<Node<T>>,
    /// Number of subproblems popped and compiled so far.
    explored: usize,

    /// Wall-clock bookkeeping around `maximize`.
    start: Instant,
    end: Option<Instant>,
    /// 0 = silent; >= 1 prints a bounds line whenever the incumbent or the
    /// upper bound changes, and a summary when the search stops.
    verbosity: u8,
}

impl<'a, T> SequentialSolver<'a, T>
where
    T: StateRepresentation,
{
    /// Creates a solver with the default heuristics: min-rank merge and
    /// delete selection, natural variable order, adaptive width (number of
    /// unbound variables) and no cutoff.
    pub fn new(problem: &'a dyn Problem<State = T>) -> Self {
        Self::custom(
            problem,
            &MinRankMerge,
            &MinRankDelete,
            &NaturalOrder,
            &NbUnassigned,
            &NoCutoff,
        )
    }

    /// Creates a solver and lets the user choose every heuristic.
    pub fn custom(
        problem: &'a dyn Problem<State = T>,
        merge_selector: &'a dyn MergeSelector<T>,
        delete_selector: &'a dyn DeleteSelector<T>,
        variable_selector: &'a dyn VariableSelector<T>,
        width: &'a dyn WidthHeuristic,
        cutoff: &'a dyn Cutoff,
    ) -> Self {
        SequentialSolver {
            problem,
            mdd: FlatMdd::new(problem, merge_selector, delete_selector, variable_selector),
            width,
            cutoff,
            fringe: SimpleFringe::new(),
            lower_bound: isize::MIN,
            upper_bound: isize::MAX,
            incumbent: None,
            explored: 0,
            start: Instant::now(),
            end: None,
            verbosity: 0,
        }
    }

    /// Sets the verbosity of the solver (0 = silent).
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.verbosity = verbosity;
    }

    /// The number of subproblems that have been popped and compiled so far.
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// The duration of the latest `maximize` run, in seconds. While a run is
    /// in progress, this is the time elapsed since it started.
    pub fn run_time(&self) -> f64 {
        self.end.unwrap_or_else(Instant::now).duration_since(self.start).as_secs_f64()
    }

    /// Graceful interruption: freeze the clock and report the best incumbent
    /// found so far, declining to claim optimality.
    fn interrupted(&mut self) -> Completion {
        self.end = Some(Instant::now());
        Completion {
            is_exact: false,
            best_value: self.incumbent.as_ref().map(|node| node.value),
        }
    }

    fn maybe_update_incumbent(&mut self) {
        if let Some(terminal) = self.mdd.best_node() {
            if self.incumbent.is_none() || terminal.value > self.lower_bound {
                self.lower_bound = terminal.value;
                self.incumbent = Some(terminal.clone());
                self.print_info(true);
            }
        }
    }

    /// Hands every node of the relaxed cutset over to the fringe, stamped
    /// with the relaxed terminal value as upper bound. When that bound cannot
    /// beat the incumbent, the whole cutset is pruned instead.
    fn enqueue_cutset(&mut self) {
        if let Some(relaxed_value) = self.mdd.best_value() {
            if relaxed_value > self.lower_bound {
                let fringe = &mut self.fringe;
                self.mdd.consume_cutset(|mut node| {
                    node.relaxed_value = relaxed_value;
                    fringe.push(node);
                });
            }
        }
    }

    /// Tightens the global upper bound from the queue content, never letting
    /// it increase.
    fn refresh_upper_bound(&mut self) {
        if !self.fringe.is_empty() {
            let queue_bound = self.fringe.upper_bound();
            if queue_bound < self.upper_bound {
                self.upper_bound = queue_bound;
                self.print_info(false);
            }
        }
    }

    fn print_info(&self, new_solution: bool) {
        if self.verbosity < 1 {
            return;
        }
        let star = if new_solution { "*" } else { " " };
        let gap = 100.0 * self.gap();
        let elapsed = self.start.elapsed().as_secs_f64();
        if self.upper_bound == isize::MAX {
            println!("   |  Best sol.  Best bound |         Gap |        Time");
            println!("{:>2} | {:>10} {:>10} | {:>10.3}% | {:>10.3}s", star, self.lower_bound, "inf", gap, elapsed);
        } else {
            println!("{:>2} | {:>10} {:>10} | {:>10.3}% | {:>10.3}s", star, self.lower_bound, self.upper_bound, gap, elapsed);
        }
    }

    fn print_summary(&self) {
        if self.verbosity < 1 {
            return;
        }
        match &self.incumbent {
            None => println!("No solution found."),
            Some(best) => {
                println!("\n====== Search completed ======");
                println!("Best solution : {}", best.value);
                println!("Assignment    :");
                for variable in best.variables.iter() {
                    println!("\tVar. {} = {}", variable.id(), variable.value().unwrap_or(0));
                }
                println!("Explored      : {}", self.explored);
                println!("Time elapsed  : {:.3}s\n", self.run_time());
            }
        }
    }
}

impl<T> Solver for SequentialSolver<'_, T>
where
    T: StateRepresentation,
{
    /// Applies the branch-and-bound algorithm to solve the problem to
    /// optimality (or until the cutoff trips).
    fn maximize(&mut self) -> Result<Completion, ContractViolation> {
        self.start = Instant::now();
        self.end = None;
        self.lower_bound = isize::MIN;
        self.upper_bound = isize::MAX;
        self.incumbent = None;
        self.explored = 0;
        self.fringe.clear();
        self.fringe.push(self.problem.root());

        while let Some(node) = self.fringe.pop() {
            if self.cutoff.must_stop() {
                return Ok(self.interrupted());
            }
            // a subproblem whose bound cannot beat the incumbent is pruned
            // without ever being compiled
            if node.relaxed_value <= self.lower_bound {
                continue;
            }
            self.explored += 1;

            let width = self.width.max_width(&node.free_variables());

            // 1. RESTRICTION
            self.mdd.restricted(node.clone(), width)?;
            self.maybe_update_incumbent();
            if self.cutoff.must_stop() {
                return Ok(self.interrupted());
            }
            if self.mdd.is_exact() {
                continue;
            }

            // 2. RELAXATION
            self.mdd.relaxed(node, width)?;
            self.enqueue_cutset();
            if self.cutoff.must_stop() {
                return Ok(self.interrupted());
            }

            self.refresh_upper_bound();
        }

        // the queue is exhausted: the incumbent is proved optimal
        self.upper_bound = self.lower_bound;
        self.end = Some(Instant::now());
        self.print_summary();

        Ok(Completion {
            is_exact: true,
            best_value: self.incumbent.as_ref().map(|node| node.value),
        })
    }

    fn best_value(&self) -> Option<isize> {
        self.incumbent.as_ref().map(|node| node.value)
    }

    fn best_solution(&self) -> Option<Solution> {
        self.incumbent.as_ref().map(|node| node.variables.clone())
    }

    fn best_lower_bound(&self) -> isize {
        self.lower_bound
    }

    fn best_upper_bound(&self) -> isize {
        self.upper_bound
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
