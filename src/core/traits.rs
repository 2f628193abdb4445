//! Core traits for sparsix.

use std::fmt::Debug;

use num_traits::Num;

/// Element type of sparse structures: a copyable number with a zero.
pub trait Scalar: Num + Copy + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Scalar for T where T: Num + Copy + PartialEq + Debug + Send + Sync + 'static {}

/// Anything that can be walked like a vector of logical length `size()`.
///
/// Both the dense and the sparse traversals in `SparseVector` go through
/// this trait, so a sparse vector can be merged with a plain slice as well
/// as with another sparse vector.
pub trait VectorLike<T> {
    /// Logical length, zeros included.
    fn size(&self) -> usize;
    /// Value at `i < size()`, zero if not stored.
    fn value(&self, i: usize) -> T;
    /// Indices of non-zero entries, ascending.
    fn nonzero_keys(&self) -> Box<dyn Iterator<Item = usize> + '_>;
}

impl<T: Scalar> VectorLike<T> for [T] {
    fn size(&self) -> usize {
        self.len()
    }
    fn value(&self, i: usize) -> T {
        self[i]
    }
    fn nonzero_keys(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(
            self.iter()
                .enumerate()
                .filter(|(_, v)| !v.is_zero())
                .map(|(i, _)| i),
        )
    }
}

impl<T: Scalar> VectorLike<T> for &[T] {
    fn size(&self) -> usize {
        self.len()
    }
    fn value(&self, i: usize) -> T {
        self[i]
    }
    fn nonzero_keys(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        (**self).nonzero_keys()
    }
}

impl<T: Scalar> VectorLike<T> for Vec<T> {
    fn size(&self) -> usize {
        self.len()
    }
    fn value(&self, i: usize) -> T {
        self[i]
    }
    fn nonzero_keys(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        self.as_slice().nonzero_keys()
    }
}

/// Logical shape of a matrix.
pub trait MatShape {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
}
