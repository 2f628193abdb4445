//! Orientation-tagged storage for `SparseMatrix`.
//!
//! Entries are grouped by an outer index (row or column) into zero-eliding
//! inner containers. Only one orientation is held at a time; the variant
//! says which.

use std::collections::BTreeMap;

use crate::config::StorageOrder;
use crate::core::container::SparseContainer;
use crate::core::traits::Scalar;
use crate::utils::merge::{Side, merge_keys};

/// Outer index → inner container. Empty inner containers are never kept.
pub type OuterMap<T> = BTreeMap<usize, SparseContainer<T>>;

#[derive(Clone, Debug)]
pub enum Storage<T> {
    RowMajor(OuterMap<T>),
    ColumnMajor(OuterMap<T>),
}

impl<T: Scalar> Storage<T> {
    pub fn with_order(order: StorageOrder, outer: OuterMap<T>) -> Self {
        match order {
            StorageOrder::RowMajor => Storage::RowMajor(outer),
            StorageOrder::ColumnMajor => Storage::ColumnMajor(outer),
        }
    }

    pub fn order(&self) -> StorageOrder {
        match self {
            Storage::RowMajor(_) => StorageOrder::RowMajor,
            Storage::ColumnMajor(_) => StorageOrder::ColumnMajor,
        }
    }

    pub fn outer(&self) -> &OuterMap<T> {
        match self {
            Storage::RowMajor(m) | Storage::ColumnMajor(m) => m,
        }
    }

    pub fn into_outer(self) -> OuterMap<T> {
        match self {
            Storage::RowMajor(m) | Storage::ColumnMajor(m) => m,
        }
    }

    pub fn nnz(&self) -> usize {
        self.outer().values().map(SparseContainer::len).sum()
    }

    /// Zero-filled lookup by logical (row, column).
    pub fn get(&self, i: usize, j: usize) -> T {
        let (outer, inner) = match self {
            Storage::RowMajor(_) => (i, j),
            Storage::ColumnMajor(_) => (j, i),
        };
        self.outer()
            .get(&outer)
            .map_or_else(T::zero, |c| c.get(inner))
    }

    /// The same entries regrouped under the other orientation.
    pub fn regroup(&self) -> Storage<T> {
        let flipped = transpose_outer(self.outer());
        Storage::with_order(self.order().flipped(), flipped)
    }

    /// Same key structure, relabelled as the other orientation.
    pub fn relabel(self) -> Storage<T> {
        let order = self.order().flipped();
        Storage::with_order(order, self.into_outer())
    }

    /// Storage in the requested orientation, regrouping only when needed.
    pub fn into_order(self, order: StorageOrder) -> Storage<T> {
        if self.order() == order {
            self
        } else {
            self.regroup()
        }
    }

    /// Row-major outer map, borrowed when already row-major.
    pub fn row_major_outer(&self) -> std::borrow::Cow<'_, OuterMap<T>> {
        match self {
            Storage::RowMajor(m) => std::borrow::Cow::Borrowed(m),
            Storage::ColumnMajor(m) => std::borrow::Cow::Owned(transpose_outer(m)),
        }
    }
}

/// For every `outer[k1][k2] = v`, place `v` at `[k2][k1]`.
pub fn transpose_outer<T: Scalar>(outer: &OuterMap<T>) -> OuterMap<T> {
    log::trace!("regrouping {} outer entries", outer.len());
    let mut out = OuterMap::new();
    for (&k1, inner) in outer {
        for (k2, v) in inner.iter() {
            out.entry(k2)
                .or_insert_with(SparseContainer::new)
                .set(k1, v);
        }
    }
    out
}

/// Nested merge of two outer maps with identical orientation.
///
/// Outer keys are merged first, then inner keys within each outer key; `f`
/// sees `(a, b)` with zero standing in for the missing side. Zero results
/// and emptied inner containers are dropped.
pub fn merge_outer<T, F>(lhs: &OuterMap<T>, rhs: &OuterMap<T>, mut f: F) -> OuterMap<T>
where
    T: Scalar,
    F: FnMut(T, T) -> T,
{
    let empty = SparseContainer::new();
    let mut out = OuterMap::new();
    for (k, _) in merge_keys(lhs.keys().copied(), rhs.keys().copied()) {
        let a = lhs.get(&k).unwrap_or(&empty);
        let b = rhs.get(&k).unwrap_or(&empty);
        let merged = merge_inner(a, b, &mut f);
        if !merged.is_empty() {
            out.insert(k, merged);
        }
    }
    out
}

/// Merge two containers over the union of their keys.
pub fn merge_inner<T, F>(a: &SparseContainer<T>, b: &SparseContainer<T>, f: &mut F) -> SparseContainer<T>
where
    T: Scalar,
    F: FnMut(T, T) -> T,
{
    merge_keys(a.nonzero_keys(), b.nonzero_keys())
        .map(|(k, side)| {
            let (x, y) = match side {
                Side::Left => (a.get(k), T::zero()),
                Side::Right => (T::zero(), b.get(k)),
                Side::Both => (a.get(k), b.get(k)),
            };
            (k, f(x, y))
        })
        .collect()
}
