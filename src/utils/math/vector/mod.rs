pub mod math;

use std::fmt::{self, Debug};
use std::ops::Index;

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as implicit.
/// It holds `indices` and `values`:
/// indices hold the logical position of each stored element,
/// values hold the element itself.
///
/// Stored indices are guaranteed to be strictly ascending and every stored
/// value is non-zero, so `nnz() == 0` means the vector is all-zero.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where N: Num
{
    ind: Vec<usize>,
    val: Vec<N>,
    len: usize,
    zero: N,
}

impl<N> ZeroSpVec<N>
where N: Num
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            ind: Vec::new(),
            val: Vec::new(),
            len: 0,
            zero: N::zero(),
        }
    }

    /// `cap` reserves room for stored (non-zero) elements only.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            ind: Vec::with_capacity(cap),
            val: Vec::with_capacity(cap),
            len: 0,
            zero: N::zero(),
        }
    }

    /// Build a vector of logical length `len` from `(index, value)` pairs.
    /// Pairs may come in any order; zero values are dropped.
    /// When an index is repeated the last value wins.
    pub fn from_pairs(len: usize, mut pairs: Vec<(usize, N)>) -> Self {
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut vec = ZeroSpVec::with_capacity(pairs.len());
        vec.len = len;
        for (idx, value) in pairs {
            debug_assert!(idx < len, "index {idx} out of bounds for length {len}");
            if vec.ind.last() == Some(&idx) {
                vec.ind.pop();
                vec.val.pop();
            }
            if value != N::zero() {
                vec.ind.push(idx);
                vec.val.push(value);
            }
        }
        vec
    }

    #[inline]
    pub fn from_vec(vec: Vec<N>) -> Self {
        let mut zero_sp_vec = ZeroSpVec::new();
        for entry in vec {
            zero_sp_vec.push(entry);
        }
        zero_sp_vec
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.ind.reserve(additional);
        self.val.reserve(additional);
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.ind.shrink_to_fit();
        self.val.shrink_to_fit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// logical length, zeros included
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.ind.len()
    }

    /// true when no element is non-zero
    #[inline]
    pub fn is_all_zero(&self) -> bool {
        self.ind.is_empty()
    }

    /// Append an element at the end, storing it only when non-zero.
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.ind.push(self.len);
            self.val.push(elem);
        }
        self.len += 1;
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&N> {
        if index >= self.len {
            return None;
        }
        match self.ind.binary_search(&index) {
            Ok(pos) => Some(&self.val[pos]),
            Err(_) => Some(&self.zero),
        }
    }

    /// dense iterator, yields zeros too
    #[inline]
    pub fn iter(&self) -> ZeroSpVecIter<'_, N> {
        ZeroSpVecIter {
            vec: self,
            pos: 0,
        }
    }

    /// iterator over stored `(index, value)` entries in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.ind.iter().copied().zip(self.val.iter())
    }

    #[inline]
    pub(crate) fn raw_parts(&self) -> (&[usize], &[N]) {
        (&self.ind, &self.val)
    }
}

impl<N> Default for ZeroSpVec<N>
where N: Num
{
    #[inline]
    fn default() -> Self {
        ZeroSpVec::new()
    }
}

impl<N> Index<usize> for ZeroSpVec<N>
where N: Num
{
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("index {index} out of bounds for length {}", self.len),
        }
    }
}

impl<N: Num + Debug> Debug for ZeroSpVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "ZeroSpVec(len: {}, ", self.len)?;
            f.debug_map().entries(self.raw_iter()).finish()?;
            write!(f, ")")
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}

pub struct ZeroSpVecIter<'a, N>
where N: Num
{
    vec: &'a ZeroSpVec<N>,
    pos: usize,
}

impl<'a, N> Iterator for ZeroSpVecIter<'a, N>
where N: Num
{
    type Item = &'a N;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.vec.get(self.pos).map(|val| {
            self.pos += 1;
            val
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_zeros_implicit() {
        let v = ZeroSpVec::from_vec(vec![0.0, 2.0, 0.0, 0.0, 5.0]);
        assert_eq!(v.len(), 5);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.raw_iter().map(|(i, x)| (i, *x)).collect::<Vec<_>>(), vec![(1, 2.0), (4, 5.0)]);
        assert_eq!(v.iter().copied().collect::<Vec<f64>>(), vec![0.0, 2.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn from_pairs_sorts_and_drops_zeros() {
        let v = ZeroSpVec::from_pairs(6, vec![(4, 1.5), (0, 0.0), (2, 3.0), (2, 7.0)]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v[2], 7.0);
        assert_eq!(v[0], 0.0);
        assert_eq!(v.get(6), None);
    }

    #[test]
    fn all_zero_detection() {
        let zero: ZeroSpVec<f64> = ZeroSpVec::from_vec(vec![0.0; 8]);
        assert!(zero.is_all_zero());
        assert_eq!(zero.len(), 8);

        let empty: ZeroSpVec<f32> = ZeroSpVec::new();
        assert!(empty.is_all_zero());
        assert!(empty.is_empty());

        let one = ZeroSpVec::from_vec(vec![0u32, 0, 1]);
        assert!(!one.is_all_zero());
    }
}
