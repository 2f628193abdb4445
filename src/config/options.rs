//! Construction and arithmetic options for sparse matrices.
//!
//! This module provides the `SparseOptions` struct, which selects the physical
//! storage orientation of results, the point at which matrix multiplication
//! switches to the row-parallel backend, and an optional private thread count
//! for that backend (when the `rayon` feature is enabled).

/// Physical grouping of stored entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageOrder {
    /// Outer index is the row.
    #[default]
    RowMajor,
    /// Outer index is the column.
    ColumnMajor,
}

impl StorageOrder {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            StorageOrder::RowMajor => StorageOrder::ColumnMajor,
            StorageOrder::ColumnMajor => StorageOrder::RowMajor,
        }
    }
}

/// Sparse matrix options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseOptions {
    /// Orientation of matrices produced by `matmul_with`
    pub order: StorageOrder,

    /// Minimum number of stored rows in the left operand before the
    /// multiply runs row-parallel
    pub parallel_threshold: usize,

    /// Size of a private pool for the row-parallel multiply; `None` runs on
    /// the caller's current rayon pool
    pub num_threads: Option<usize>,
}

impl Default for SparseOptions {
    fn default() -> Self {
        Self {
            order: StorageOrder::RowMajor,
            parallel_threshold: 64,
            num_threads: None,
        }
    }
}

impl SparseOptions {
    pub fn with_order(mut self, order: StorageOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }
}
