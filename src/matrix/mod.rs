//! Matrix module: sparse matrix type, its storage, and the dense conversion trait.

pub mod dense;
pub use dense::DenseMatrix;
pub mod sparse;
pub use sparse::SparseMatrix;
pub mod storage;
pub use storage::{OuterMap, Storage};
