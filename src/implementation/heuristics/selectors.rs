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

//! This module provides the default variable, merge and delete selectors.

use crate::{DeleteSelector, Layer, MergeSelector, Node, StateRepresentation, VariableSelector, Variable, VarSet};

/// _This is the default variable selector._ It branches on the free variables
/// in their natural order: lowest id first.
#[derive(Debug, Default, Copy, Clone)]
pub struct NaturalOrder;
impl<T> VariableSelector<T> for NaturalOrder {
    fn next_var(&self, _layer: &Layer<T>, free: &VarSet) -> Option<Variable> {
        free.iter().next()
    }
}

/// Returns the `count` nodes of the layer having the smallest rank. Rank ties
/// are broken in favor of dropping the earliest inserted node, so the
/// selection is deterministic.
fn min_rank<'a, T: StateRepresentation>(layer: &'a Layer<T>, count: usize) -> Vec<&'a Node<T>> {
    let mut ranked: Vec<(usize, &Node<T>)> = layer.iter().enumerate().collect();
    ranked.sort_unstable_by(|(ia, a), (ib, b)| {
        a.state
            .rank(a)
            .total_cmp(&b.state.rank(b))
            .then(ia.cmp(ib))
    });
    ranked.into_iter().take(count).map(|(_, node)| node).collect()
}

/// _This is the default merge selector._ When a layer of a relaxed MDD grows
/// too large, it collapses the nodes with the smallest rank: those are the
/// least promising and loosening them degrades the bound the least.
#[derive(Debug, Default, Copy, Clone)]
pub struct MinRankMerge;
impl<T: StateRepresentation> MergeSelector<T> for MinRankMerge {
    fn select<'a>(&self, layer: &'a Layer<T>, count: usize) -> Vec<&'a Node<T>> {
        min_rank(layer, count)
    }
}

/// _This is the default delete selector._ When a layer of a restricted MDD
/// grows too large, it drops the nodes with the smallest rank.
#[derive(Debug, Default, Copy, Clone)]
pub struct MinRankDelete;
impl<T: StateRepresentation> DeleteSelector<T> for MinRankDelete {
    fn select<'a>(&self, layer: &'a Layer<T>, count: usize) -> Vec<&'a Node<T>> {
        min_rank(layer, count)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_selectors {
    use crate::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Dummy(char);
    impl StateRepresentation for Dummy {
        fn rank(&self, node: &Node<Self>) -> f64 {
            node.value as f64
        }
    }

    fn node(state: char, value: isize) -> Node<Dummy> {
        let mut n = Node::root(Dummy(state), 2);
        n.value = value;
        n
    }

    #[test]
    fn natural_order_picks_the_lowest_free_id() {
        let layer: Layer<Dummy> = Layer::new();
        let mut free = VarSet::all(4);
        assert_eq!(Some(0), NaturalOrder.next_var(&layer, &free).map(|v| v.id()));

        free.remove(Variable::new(0));
        free.remove(Variable::new(1));
        assert_eq!(Some(2), NaturalOrder.next_var(&layer, &free).map(|v| v.id()));
    }

    #[test]
    fn natural_order_yields_none_when_nothing_is_free() {
        let layer: Layer<Dummy> = Layer::new();
        let free = VarSet::empty(4);
        assert!(NaturalOrder.next_var(&layer, &free).is_none());
    }

    #[test]
    fn min_rank_merge_selects_the_lowest_ranked_nodes() {
        let mut layer = Layer::new();
        layer.add(node('a', 5));
        layer.add(node('b', 1));
        layer.add(node('c', 3));
        layer.add(node('d', 2));

        let picked: Vec<char> = MinRankMerge.select(&layer, 2).iter().map(|n| n.state.0).collect();
        assert_eq!(vec!['b', 'd'], picked);
    }

    #[test]
    fn min_rank_delete_breaks_rank_ties_by_insertion_order() {
        let mut layer = Layer::new();
        layer.add(node('a', 1));
        layer.add(node('b', 1));
        layer.add(node('c', 0));

        let picked: Vec<char> = MinRankDelete.select(&layer, 2).iter().map(|n| n.state.0).collect();
        assert_eq!(vec!['c', 'a'], picked);
    }

    #[test]
    fn selectors_return_exactly_the_requested_count() {
        let mut layer = Layer::new();
        layer.add(node('a', 1));
        layer.add(node('b', 2));
        layer.add(node('c', 3));

        assert_eq!(3, MinRankMerge.select(&layer, 3).len());
        assert_eq!(1, MinRankDelete.select(&layer, 1).len());
    }
}
