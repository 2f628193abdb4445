//! Vector module: sparse vector type.

pub mod sparse;
pub use sparse::SparseVector;
