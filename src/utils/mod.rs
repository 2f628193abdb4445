//! Traversal and indexing helpers.

pub mod index;
pub mod merge;

pub use merge::{MergeKeys, Side, merge_keys};
