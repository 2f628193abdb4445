//! Operand coercion for mixed-type arithmetic.
//!
//! `Operand` is what the right-hand side of a dynamic arithmetic call can be:
//! a number, a sparse vector or matrix, or a dense slice or faer matrix. It
//! knows how to present itself in the role an operation needs (vector-like or
//! sparse matrix) and fails with `TypeMismatch` when it cannot.

use std::borrow::Cow;

use faer::Mat;

use crate::core::traits::{Scalar, VectorLike};
use crate::error::{SpError, SpResult};
use crate::matrix::sparse::SparseMatrix;
use crate::vector::sparse::SparseVector;

pub enum Operand<'a, T> {
    Scalar(T),
    Vector(&'a SparseVector<T>),
    Matrix(&'a SparseMatrix<T>),
    DenseVector(&'a [T]),
    DenseMatrix(&'a Mat<T>),
}

/// Result of a dynamically dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Vector(SparseVector<T>),
    Matrix(SparseMatrix<T>),
}

impl<'a, T: Scalar> Operand<'a, T> {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "Scalar",
            Operand::Vector(_) => "SparseVector",
            Operand::Matrix(_) => "SparseMatrix",
            Operand::DenseVector(_) => "DenseVector",
            Operand::DenseMatrix(_) => "DenseMatrix",
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Operand::Scalar(_))
    }

    /// The operand as something a vector traversal can walk.
    pub fn as_vector_like(&self) -> SpResult<&dyn VectorLike<T>> {
        match self {
            Operand::Vector(v) => Ok(*v),
            Operand::DenseVector(v) => Ok(v),
            other => Err(SpError::TypeMismatch(format!(
                "{} is not like SparseVector",
                other.kind()
            ))),
        }
    }

    /// The operand as a sparse matrix; vectors become single columns.
    pub fn to_sparse_matrix(&self) -> SpResult<Cow<'a, SparseMatrix<T>>> {
        match *self {
            Operand::Matrix(m) => Ok(Cow::Borrowed(m)),
            Operand::DenseMatrix(m) => Ok(Cow::Owned(SparseMatrix::from_faer(m))),
            Operand::Vector(v) => Ok(Cow::Owned(SparseMatrix::column_vector_from(v))),
            Operand::DenseVector(v) => Ok(Cow::Owned(SparseMatrix::column_vector(v))),
            Operand::Scalar(_) => Err(SpError::TypeMismatch(
                "Scalar can't be coerced into SparseMatrix".into(),
            )),
        }
    }
}

impl<'a, T> From<&'a SparseVector<T>> for Operand<'a, T> {
    fn from(v: &'a SparseVector<T>) -> Self {
        Operand::Vector(v)
    }
}

impl<'a, T> From<&'a SparseMatrix<T>> for Operand<'a, T> {
    fn from(m: &'a SparseMatrix<T>) -> Self {
        Operand::Matrix(m)
    }
}

impl<'a, T> From<&'a [T]> for Operand<'a, T> {
    fn from(v: &'a [T]) -> Self {
        Operand::DenseVector(v)
    }
}

impl<'a, T> From<&'a Vec<T>> for Operand<'a, T> {
    fn from(v: &'a Vec<T>) -> Self {
        Operand::DenseVector(v.as_slice())
    }
}

impl<'a, T> From<&'a Mat<T>> for Operand<'a, T> {
    fn from(m: &'a Mat<T>) -> Self {
        Operand::DenseMatrix(m)
    }
}

impl<T> Value<T> {
    pub fn into_vector(self) -> Option<SparseVector<T>> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<SparseMatrix<T>> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

/// Coerce a caller-supplied dimension into `usize`.
///
/// Accepts any integer type, so signed input is allowed through the API and
/// rejected here when negative.
pub fn coerce_dimension<D>(dim: D, what: &str) -> SpResult<usize>
where
    D: TryInto<usize> + Copy + std::fmt::Display,
{
    dim.try_into()
        .map_err(|_| SpError::ArgumentError(format!("{what} must be a non-negative size, got {dim}")))
}
