//! Core building blocks: element traits, the sparse container, operand
//! coercion and dense wrappers.

pub mod coercion;
pub mod container;
pub mod traits;
pub mod wrappers;

pub use coercion::{Operand, Value};
pub use container::SparseContainer;
pub use traits::{MatShape, Scalar, VectorLike};
