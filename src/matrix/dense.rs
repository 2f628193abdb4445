//! Dense-matrix API used as the conversion target of sparse matrices.
//!
//! This module provides the `DenseMatrix` trait and its implementations for
//! `faer::Mat<T>` and nested row lists, enabling `SparseMatrix::to_dense_as`
//! and `SparseMatrix::from_dense_matrix` to work with either.

use faer::Mat;

use crate::core::traits::{MatShape, Scalar};

/// A dense matrix that can be built element-wise and read back.
pub trait DenseMatrix<T>: MatShape {
    /// Construct an `nrows × ncols` matrix from a generator.
    fn from_fn_dense<F: FnMut(usize, usize) -> T>(nrows: usize, ncols: usize, f: F) -> Self;
    /// Entry `(i, j)`; within bounds of `nrows() × ncols()`.
    fn at(&self, i: usize, j: usize) -> T;
}

impl<T: Scalar> DenseMatrix<T> for Mat<T> {
    fn from_fn_dense<F: FnMut(usize, usize) -> T>(nrows: usize, ncols: usize, f: F) -> Self {
        Mat::from_fn(nrows, ncols, f)
    }
    fn at(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<T: Scalar> DenseMatrix<T> for Vec<Vec<T>> {
    fn from_fn_dense<F: FnMut(usize, usize) -> T>(nrows: usize, ncols: usize, mut f: F) -> Self {
        (0..nrows)
            .map(|i| (0..ncols).map(|j| f(i, j)).collect())
            .collect()
    }
    /// Short rows read as zero-padded.
    fn at(&self, i: usize, j: usize) -> T {
        self[i].get(j).copied().unwrap_or_else(T::zero)
    }
}
