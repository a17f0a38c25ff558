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

//! This module provides the bounded-width MDD compilation engine. The engine
//! keeps the diagram "flat": only the layer being expanded and the one being
//! built are alive at any point in time, plus a detached snapshot of the
//! exact cutset.

use crate::{
    ContractViolation, DeleteSelector, Layer, MergeSelector, Node, Problem, StateRepresentation,
    VariableSelector,
};

use self::CompilationType::{Relaxed, Restricted};

/// How is the diagram to be compiled ?
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CompilationType {
    /// Enforce the maximum width by *deleting* the least promising nodes of
    /// an overflowing layer. The compiled DD yields a feasible solution, and
    /// hence a lower bound on the objective.
    Restricted,
    /// Enforce the maximum width by *merging* the least promising nodes of an
    /// overflowing layer. The compiled DD over-approximates the reachable
    /// states and yields an upper bound on the objective.
    Relaxed,
}

/// The MDD compilation engine. Given a root node, a maximum width and a
/// compilation type, it unrolls the transition relation of the problem layer
/// by layer, deduplicating the nodes by state and squashing the layers that
/// grow beyond the width bound.
///
/// After a compilation, the engine exposes the best terminal node (the
/// longest-path terminal), an exactness flag (true iff no deletion or merge
/// ever occurred), and -- for relaxed compilations -- the *exact cutset*: the
/// deepest layer every node of which is exact and below which no squashing
/// had yet occurred. The cutset nodes are detached copies; they survive the
/// next compilation and become the open subproblems of the branch-and-bound.
pub struct FlatMdd<'a, T>
where
    T: StateRepresentation,
{
    problem: &'a dyn Problem<State = T>,
    merge_selector: &'a dyn MergeSelector<T>,
    delete_selector: &'a dyn DeleteSelector<T>,
    variable_selector: &'a dyn VariableSelector<T>,

    /// True iff no restriction or relaxation occurred during the latest
    /// compilation.
    is_exact: bool,
    /// The best terminal node of the latest compilation; `None` when every
    /// path ran into a dead-end.
    best: Option<Node<T>>,
    /// The exact cutset of the latest compilation (only maintained when
    /// compiling a relaxed diagram).
    cutset: Vec<Node<T>>,
}

impl<'a, T> FlatMdd<'a, T>
where
    T: StateRepresentation,
{
    pub fn new(
        problem: &'a dyn Problem<State = T>,
        merge_selector: &'a dyn MergeSelector<T>,
        delete_selector: &'a dyn DeleteSelector<T>,
        variable_selector: &'a dyn VariableSelector<T>,
    ) -> Self {
        FlatMdd {
            problem,
            merge_selector,
            delete_selector,
            variable_selector,
            is_exact: true,
            best: None,
            cutset: vec![],
        }
    }

    /// Compiles a restricted diagram rooted in `root`: the terminal value is
    /// a lower bound on the best completion of the subproblem.
    pub fn restricted(&mut self, root: Node<T>, width: usize) -> Result<(), ContractViolation> {
        self.develop(Restricted, root, width)
    }

    /// Compiles a relaxed diagram rooted in `root`: the terminal value is an
    /// upper bound on the best completion of the subproblem.
    pub fn relaxed(&mut self, root: Node<T>, width: usize) -> Result<(), ContractViolation> {
        self.develop(Relaxed, root, width)
    }

    /// Returns true iff the latest compiled diagram is exact.
    pub fn is_exact(&self) -> bool {
        self.is_exact
    }

    /// The best terminal node of the latest compiled diagram, or `None` when
    /// the subproblem admits no completion (dead-end).
    pub fn best_node(&self) -> Option<&Node<T>> {
        self.best.as_ref()
    }

    /// The value of the best terminal node of the latest compiled diagram.
    pub fn best_value(&self) -> Option<isize> {
        self.best.as_ref().map(|node| node.value)
    }

    /// Applies the given function to each node of the exact cutset of the
    /// latest relaxed compilation, draining the cutset in the process.
    pub fn consume_cutset<F>(&mut self, func: F)
    where
        F: FnMut(Node<T>),
    {
        self.cutset.drain(..).for_each(func)
    }

    fn clear(&mut self) {
        self.is_exact = true;
        self.best = None;
        self.cutset.clear();
    }

    fn develop(
        &mut self,
        kind: CompilationType,
        root: Node<T>,
        width: usize,
    ) -> Result<(), ContractViolation> {
        self.clear();

        let nb_vars = self.problem.nb_variables();
        let first = root.layer_number;
        let mut free = root.free_variables();

        if kind == Relaxed && root.exact {
            self.cutset.push(root.clone());
        }
        let mut layer = Layer::singleton(root);

        for pos in first..nb_vars {
            let var = self
                .variable_selector
                .next_var(&layer, &free)
                .ok_or(ContractViolation::NoVariableSelected { free: free.len() })?;
            free.remove(var);

            let mut next = Layer::new();
            for node in layer.iter_mut() {
                node.branch_on(pos, var)?;
                for succ in self.problem.successors(node, var) {
                    if succ.layer_number != pos + 1 {
                        return Err(ContractViolation::BadSuccessorLayer {
                            expected: pos + 1,
                            found: succ.layer_number,
                        });
                    }
                    next.add(succ);
                }
            }

            if next.is_empty() {
                // dead-end: no completion exists below this point
                return Ok(());
            }

            if next.width() > width {
                match kind {
                    Restricted => {
                        self.restrict(&mut next, width)?;
                        self.is_exact = false;
                    }
                    // Merging the very first layer would leave the root
                    // itself as the cutset and the decomposition would not
                    // make progress; the width bound kicks in one layer lower.
                    Relaxed if pos > first => {
                        self.relax(&mut next, width)?;
                        self.is_exact = false;
                    }
                    Relaxed => {}
                }
            }

            if kind == Relaxed && self.is_exact && next.all_exact() {
                self.cutset.clear();
                self.cutset.extend(next.iter().cloned());
            }

            layer = next;
        }

        self.best = layer.into_best();
        Ok(())
    }

    /// Brings the layer back within the width bound by dropping the nodes
    /// designated by the delete selector.
    fn restrict(&self, layer: &mut Layer<T>, width: usize) -> Result<(), ContractViolation> {
        let excess = layer.width() - width;
        let doomed: Vec<T> = self
            .delete_selector
            .select(layer, excess)
            .iter()
            .map(|node| node.state.clone())
            .collect();

        for state in doomed.iter() {
            layer.remove(state);
        }
        if layer.width() > width {
            return Err(ContractViolation::BadDeleteSelection {
                width: layer.width(),
                max_width: width,
            });
        }
        Ok(())
    }

    /// Brings the layer back within the width bound by collapsing the nodes
    /// designated by the merge selector into a single inexact node.
    fn relax(&self, layer: &mut Layer<T>, width: usize) -> Result<(), ContractViolation> {
        let count = layer.width() - width + 1;
        let selection: Vec<T> = self
            .merge_selector
            .select(layer, count)
            .iter()
            .map(|node| node.state.clone())
            .collect();

        let victims: Vec<Node<T>> = selection
            .iter()
            .filter_map(|state| layer.remove(state))
            .collect();
        if victims.len() != count || count < 2 {
            return Err(ContractViolation::BadMergeSelection {
                required: count,
                returned: victims.len(),
            });
        }

        let mut merged = self.problem.merge(&victims);
        merged.value = victims.iter().map(|node| node.value).max().unwrap_or(merged.value);
        merged.exact = false;
        layer.add(merged);
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_flat_mdd {
    use crate::*;

    /// Maximize the sum of `n` binary variables. The state counts how many of
    /// them were set to one, so an exact diagram has `depth + 1` nodes on the
    /// layer at any depth.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct BinState(usize);
    impl StateRepresentation for BinState {
        fn rank(&self, node: &Node<Self>) -> f64 {
            node.value as f64
        }
    }

    struct AllOnes {
        n: usize,
    }
    impl Problem for AllOnes {
        type State = BinState;

        fn nb_variables(&self) -> usize {
            self.n
        }
        fn root(&self) -> Node<BinState> {
            Node::root(BinState(0), self.n)
        }
        fn successors(&self, node: &Node<BinState>, _var: Variable) -> Vec<Node<BinState>> {
            let pos = node.layer_number;
            vec![
                node.successor(node.state.clone(), node.value, pos, 0),
                node.successor(BinState(node.state.0 + 1), node.value + 1, pos, 1),
            ]
        }
        fn merge(&self, nodes: &[Node<BinState>]) -> Node<BinState> {
            let best = nodes.iter().max_by_key(|n| n.value).unwrap();
            let union = nodes.iter().map(|n| n.state.0).max().unwrap();
            let mut merged = best.clone();
            merged.state = BinState(union);
            merged
        }
    }

    /// A problem whose root has no successor at all.
    struct DeadEnd;
    impl Problem for DeadEnd {
        type State = BinState;

        fn nb_variables(&self) -> usize {
            2
        }
        fn root(&self) -> Node<BinState> {
            Node::root(BinState(0), 2)
        }
        fn successors(&self, _: &Node<BinState>, _: Variable) -> Vec<Node<BinState>> {
            vec![]
        }
        fn merge(&self, nodes: &[Node<BinState>]) -> Node<BinState> {
            nodes[0].clone()
        }
    }

    #[test]
    fn a_wide_enough_compilation_is_exact() {
        let problem = AllOnes { n: 3 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        mdd.restricted(problem.root(), 100).unwrap();

        assert!(mdd.is_exact());
        assert_eq!(Some(3), mdd.best_value());

        let terminal = mdd.best_node().unwrap();
        assert_eq!(3, terminal.layer_number);
        assert!(terminal.variables.iter().all(|v| v.is_bound()));
        assert!(terminal.variables.iter().all(|v| v.value() == Some(1)));
    }

    #[test]
    fn a_width_one_restriction_still_yields_a_feasible_terminal() {
        let problem = AllOnes { n : 3 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        mdd.restricted(problem.root(), 1).unwrap();

        assert!(!mdd.is_exact());
        let terminal = mdd.best_node().unwrap();
        assert!(terminal.variables.iter().all(|v| v.is_bound()));

        // the value is the one actually realized by the assignment
        let realized: isize = terminal.variables.iter().map(|v| v.value().unwrap()).sum();
        assert_eq!(realized, terminal.value);
        assert!(terminal.value <= 3);
    }

    #[test]
    fn a_relaxed_terminal_bounds_the_optimum_from_above() {
        let problem = AllOnes { n: 4 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        mdd.relaxed(problem.root(), 1).unwrap();

        assert!(!mdd.is_exact());
        assert!(mdd.best_value().unwrap() >= 4);
    }

    #[test]
    fn the_cutset_is_the_deepest_untouched_layer() {
        let problem = AllOnes { n: 4 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        // with a width of one, the first expanded layer is exempted from
        // merging, so the first squash happens below it and the cutset is
        // layer 1 (both of its nodes are exact)
        mdd.relaxed(problem.root(), 1).unwrap();

        let mut cutset = vec![];
        mdd.consume_cutset(|node| cutset.push(node));

        assert_eq!(2, cutset.len());
        assert!(cutset.iter().all(|node| node.exact));
        assert!(cutset.iter().all(|node| node.layer_number == 1));

        // consuming drains it
        let mut emptied = vec![];
        mdd.consume_cutset(|node| emptied.push(node));
        assert!(emptied.is_empty());
    }

    #[test]
    fn an_exact_relaxation_keeps_the_terminal_layer_as_cutset() {
        let problem = AllOnes { n: 3 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        mdd.relaxed(problem.root(), 100).unwrap();

        assert!(mdd.is_exact());
        assert_eq!(Some(3), mdd.best_value());

        let mut cutset = vec![];
        mdd.consume_cutset(|node| cutset.push(node));
        assert!(cutset.iter().all(|node| node.layer_number == 3));
    }

    #[test]
    fn a_dead_end_yields_no_terminal() {
        let problem = DeadEnd;
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        mdd.restricted(problem.root(), 10).unwrap();

        assert!(mdd.best_node().is_none());
        assert_eq!(None, mdd.best_value());
        assert!(mdd.is_exact());
    }

    #[test]
    fn compiling_from_a_partial_root_finishes_the_assignment() {
        let problem = AllOnes { n: 3 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        let root = problem.root();
        let mut sub = root.successor(BinState(1), 1, 0, 1);
        sub.relaxed_value = 3;

        mdd.restricted(sub, 100).unwrap();

        assert!(mdd.is_exact());
        assert_eq!(Some(3), mdd.best_value());
        let terminal = mdd.best_node().unwrap();
        assert_eq!(3, terminal.layer_number);
        assert!(terminal.variables.iter().all(|v| v.value() == Some(1)));
    }

    // ------------------------------------------------------------------------
    // contract violations
    // ------------------------------------------------------------------------

    struct SelectNothing;
    impl MergeSelector<BinState> for SelectNothing {
        fn select<'a>(&self, _: &'a Layer<BinState>, _: usize) -> Vec<&'a Node<BinState>> {
            vec![]
        }
    }
    impl DeleteSelector<BinState> for SelectNothing {
        fn select<'a>(&self, _: &'a Layer<BinState>, _: usize) -> Vec<&'a Node<BinState>> {
            vec![]
        }
    }

    struct SelectNoVariable;
    impl VariableSelector<BinState> for SelectNoVariable {
        fn next_var(&self, _: &Layer<BinState>, _: &VarSet) -> Option<Variable> {
            None
        }
    }

    /// A problem handing out successors with a stale depth.
    struct StaleDepth;
    impl Problem for StaleDepth {
        type State = BinState;

        fn nb_variables(&self) -> usize {
            2
        }
        fn root(&self) -> Node<BinState> {
            Node::root(BinState(0), 2)
        }
        fn successors(&self, node: &Node<BinState>, _: Variable) -> Vec<Node<BinState>> {
            let mut succ = node.successor(node.state.clone(), node.value, node.layer_number, 0);
            succ.layer_number = node.layer_number;
            vec![succ]
        }
        fn merge(&self, nodes: &[Node<BinState>]) -> Node<BinState> {
            nodes[0].clone()
        }
    }

    #[test]
    fn an_empty_merge_selection_is_reported() {
        let problem = AllOnes { n: 4 };
        let mut mdd = FlatMdd::new(&problem, &SelectNothing, &MinRankDelete, &NaturalOrder);

        let result = mdd.relaxed(problem.root(), 1);
        assert!(matches!(
            result,
            Err(ContractViolation::BadMergeSelection { returned: 0, .. })
        ));
    }

    #[test]
    fn an_empty_delete_selection_is_reported() {
        let problem = AllOnes { n: 4 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &SelectNothing, &NaturalOrder);

        let result = mdd.restricted(problem.root(), 1);
        assert!(matches!(
            result,
            Err(ContractViolation::BadDeleteSelection { .. })
        ));
    }

    #[test]
    fn a_mute_variable_selector_is_reported() {
        let problem = AllOnes { n: 2 };
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &SelectNoVariable);

        let result = mdd.restricted(problem.root(), 10);
        assert!(matches!(
            result,
            Err(ContractViolation::NoVariableSelected { free: 2 })
        ));
    }

    #[test]
    fn a_stale_successor_depth_is_reported() {
        let problem = StaleDepth;
        let mut mdd = FlatMdd::new(&problem, &MinRankMerge, &MinRankDelete, &NaturalOrder);

        let result = mdd.restricted(problem.root(), 10);
        assert!(matches!(
            result,
            Err(ContractViolation::BadSuccessorLayer { expected: 1, found: 0 })
        ));
    }
}
