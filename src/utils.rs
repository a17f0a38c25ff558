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

//! Small convenience utilities shared by the library and its client problems.

use bitset_fixed::BitSet;

/// An iterator over the indices of the bits set in a fixed-size bitset.
pub struct BitSetIter<'a> {
    bs: &'a BitSet,
    cur: usize,
}

impl<'a> BitSetIter<'a> {
    pub fn new(bs: &'a BitSet) -> BitSetIter<'a> {
        BitSetIter { bs, cur: 0 }
    }
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cur < self.bs.size() {
            if self.bs[self.cur] {
                let x = self.cur;
                self.cur += 1;
                return Some(x);
            }
            self.cur += 1;
        }
        None
    }
}

#[cfg(test)]
mod test_bitset_iter {
    use std::ops::Not;

    use bitset_fixed::BitSet;

    use crate::BitSetIter;

    #[test]
    fn iterates_set_bits_in_increasing_order() {
        let mut bs = BitSet::new(5);
        bs.set(3, true);
        bs.set(1, true);
        let bits: Vec<usize> = BitSetIter::new(&bs).collect();
        assert_eq!(vec![1, 3], bits);
    }

    #[test]
    fn full_and_empty_sets() {
        let full = BitSet::new(3).not();
        assert_eq!(vec![0, 1, 2], BitSetIter::new(&full).collect::<Vec<_>>());

        let empty = BitSet::new(3);
        assert_eq!(None, BitSetIter::new(&empty).next());
    }
}
