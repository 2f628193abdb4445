//! Trait implementations for the dense collaborator types.
//!
//! Sparse structures convert to and from two dense representations: faer's
//! `Mat<T>` and plain nested `Vec<Vec<T>>` (row lists). This module gives both
//! a common `MatShape`, and lets a faer column act as a `VectorLike`.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use faer::{Col, Mat};

use crate::core::traits::{MatShape, Scalar, VectorLike};

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

/// Row lists may be ragged; the column count is the longest row.
impl<T> MatShape for Vec<Vec<T>> {
    fn nrows(&self) -> usize {
        self.len()
    }
    fn ncols(&self) -> usize {
        self.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl<T: Scalar> VectorLike<T> for Col<T> {
    fn size(&self) -> usize {
        self.nrows()
    }
    fn value(&self, i: usize) -> T {
        self[i]
    }
    fn nonzero_keys(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new((0..self.nrows()).filter(move |&i| !self[i].is_zero()))
    }
}
