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

//! This module provides the implementation of the usual maximum-width
//! policies used when compiling restricted and relaxed MDDs.

use crate::{VarSet, WidthHeuristic};

/// This strategy imposes a fixed maximum width regardless of the subproblem
/// being compiled.
#[derive(Debug, Copy, Clone)]
pub struct FixedWidth(pub usize);
impl WidthHeuristic for FixedWidth {
    fn max_width(&self, _free: &VarSet) -> usize {
        self.0
    }
}

/// _This is the default maximum-width policy._ It allows layers to hold as
/// many nodes as there are variables left unbound at the root of the
/// compilation. Deep subproblems get narrow (cheap) diagrams while shallow
/// ones get wider (more accurate) ones.
#[derive(Debug, Default, Copy, Clone)]
pub struct NbUnassigned;
impl WidthHeuristic for NbUnassigned {
    fn max_width(&self, free: &VarSet) -> usize {
        free.len()
    }
}

#[cfg(test)]
mod test_width {
    use crate::{FixedWidth, NbUnassigned, Variable, VarSet, WidthHeuristic};

    #[test]
    fn fixed_width_is_constant() {
        assert_eq!(42, FixedWidth(42).max_width(&VarSet::all(1)));
        assert_eq!(42, FixedWidth(42).max_width(&VarSet::all(100)));
    }

    #[test]
    fn nb_unassigned_tracks_the_free_variables() {
        let mut free = VarSet::all(5);
        assert_eq!(5, NbUnassigned.max_width(&free));
        free.remove(Variable::new(2));
        free.remove(Variable::new(3));
        assert_eq!(3, NbUnassigned.max_width(&free));
    }
}
