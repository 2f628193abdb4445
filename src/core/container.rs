//! Zero-eliding ordered map from index to value.
//!
//! `SparseContainer` is the storage primitive shared by `SparseVector` and the
//! inner level of `SparseMatrix`. A missing key reads as zero, and writing a
//! zero removes the key, so the container never holds an explicit zero.
//! Keys iterate in ascending order, which the merge traversals rely on.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::hash::{Hash, Hasher};

use crate::core::traits::Scalar;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseContainer<T> {
    entries: BTreeMap<usize, T>,
}

impl<T> Default for SparseContainer<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> SparseContainer<T> {
    /// Number of stored (non-zero) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<usize, T> {
        self.entries
    }

    pub fn as_map(&self) -> &BTreeMap<usize, T> {
        &self.entries
    }
}

impl<T: Scalar> SparseContainer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing map, discarding any stored zeros.
    pub fn from_map(mut entries: BTreeMap<usize, T>) -> Self {
        entries.retain(|_, v| !v.is_zero());
        Self { entries }
    }

    /// Sparse view of a dense slice.
    pub fn from_dense(values: &[T]) -> Self {
        values.iter().copied().enumerate().collect()
    }

    /// Stored value or zero.
    pub fn get(&self, index: usize) -> T {
        self.entries.get(&index).copied().unwrap_or_else(T::zero)
    }

    /// Store `value`, or drop the key if `value` is zero.
    pub fn set(&mut self, index: usize, value: T) {
        if value.is_zero() {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, value);
        }
    }

    /// Add `value` onto the entry at `index`, dropping it if the sum is zero.
    pub fn accumulate(&mut self, index: usize, value: T) {
        let sum = self.get(index) + value;
        self.set(index, sum);
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.entries.remove(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Largest stored index.
    pub fn max_key(&self) -> Option<usize> {
        self.entries.keys().next_back().copied()
    }

    /// Stored indices in ascending order.
    pub fn nonzero_keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Stored `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.entries.values().copied()
    }

    /// Apply `f` to every stored value; zero results are dropped.
    pub fn map_nonzero<F>(&self, mut f: F) -> Self
    where
        F: FnMut(T) -> T,
    {
        self.iter().map(|(k, v)| (k, f(v))).collect()
    }

    /// Drop every key `>= len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.split_off(&len);
    }

    /// Materialize as a dense vector of length `len`.
    pub fn to_dense(&self, len: usize) -> Vec<T> {
        let mut out = vec![T::zero(); len];
        for (k, v) in self.iter().take_while(|&(k, _)| k < len) {
            out[k] = v;
        }
        out
    }
}

impl<T: Scalar> FromIterator<(usize, T)> for SparseContainer<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut c = SparseContainer::new();
        for (k, v) in iter {
            c.set(k, v);
        }
        c
    }
}

impl<T> IntoIterator for SparseContainer<T> {
    type Item = (usize, T);
    type IntoIter = btree_map::IntoIter<usize, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Hash> Hash for SparseContainer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}
