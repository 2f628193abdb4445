//! sparsix: sparse matrices and vectors with a dense-library surface
//!
//! This crate provides `SparseMatrix` and `SparseVector`, which behave like the
//! dense types of a linear-algebra library (element access, slicing, scalar and
//! matrix arithmetic, iteration) while storing only non-zero entries. Dense
//! conversion goes through faer.

pub mod parallel;

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use crate::config::{SparseOptions, StorageOrder};
pub use crate::core::{MatShape, Operand, Scalar, SparseContainer, Value, VectorLike};
pub use crate::error::{SpError, SpResult};
pub use crate::matrix::{DenseMatrix, SparseMatrix, Storage};
pub use crate::vector::SparseVector;
