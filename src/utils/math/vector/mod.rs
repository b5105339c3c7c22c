pub mod math;

use std::fmt::{self, Debug};

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as absent.
/// It holds `inds` and `vals` side by side (SoA):
/// `inds` keeps the column of every stored element,
/// `vals` keeps its value.
///
/// Elements are guaranteed to be sorted by ascending index
/// and zero values are never stored.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Create an all-zero vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Create an all-zero vector with room for `nnz` stored elements
    #[inline]
    pub fn with_capacity(len: usize, nnz: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
            len,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped, duplicate indices are summed.
    ///
    /// # Panics
    /// if an index is not below `len`
    pub fn from_pairs(len: usize, mut pairs: Vec<(u32, N)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut vec = ZeroSpVec::with_capacity(len, pairs.len());
        for (idx, val) in pairs {
            assert!((idx as usize) < len, "index {idx} out of range for len {len}");
            match vec.inds.last() {
                Some(&last) if last == idx => {
                    // 同じ index は加算
                    if let Some(prev) = vec.vals.last_mut() {
                        *prev = *prev + val;
                    }
                }
                _ => {
                    vec.inds.push(idx);
                    vec.vals.push(val);
                }
            }
        }
        vec.drop_zeros();
        vec
    }

    fn drop_zeros(&mut self) {
        let mut w = 0;
        for r in 0..self.vals.len() {
            if !self.vals[r].is_zero() {
                self.inds[w] = self.inds[r];
                self.vals[w] = self.vals[r];
                w += 1;
            }
        }
        self.inds.truncate(w);
        self.vals.truncate(w);
    }

    /// Dimension of the vector (stored and implicit zeros)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true if every element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Get the value at `index`, `None` for an implicit zero
    #[inline]
    pub fn get(&self, index: usize) -> Option<&N> {
        let index = u32::try_from(index).ok()?;
        self.inds
            .binary_search(&index)
            .ok()
            .map(|pos| &self.vals[pos])
    }

    /// Iterate stored `(index, value)` pairs in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter())
    }

    /// Expand into a dense `Vec`
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = *val;
        }
        dense
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "ZeroSpVec(len: {}, nnz: {}) [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {idx}: {val:?}")?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("inds", &self.inds)
                .field("vals", &self.vals)
                .finish()
        }
    }
}
