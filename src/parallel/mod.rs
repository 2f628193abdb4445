//! Row-level execution backends for matrix multiplication.
//!
//! Each output row of a sparse product depends on a single row of the left
//! operand, so rows can be computed independently. `RowBackend` picks between
//! a serial loop and a rayon pool; both return rows keyed by outer index, so
//! the assembled result does not depend on the backend.

use crate::config::SparseOptions;
use crate::core::container::SparseContainer;
use crate::core::traits::Scalar;
use crate::error::SpResult;
use crate::matrix::storage::OuterMap;

#[cfg(feature = "rayon")]
pub mod rayon_rows;
#[cfg(feature = "rayon")]
pub use rayon_rows::RayonRows;

pub enum RowBackend {
    Serial,
    #[cfg(feature = "rayon")]
    Rayon(RayonRows),
}

impl RowBackend {
    /// Choose a backend for `rows` stored rows.
    ///
    /// Rows go parallel once they reach `opts.parallel_threshold` and more
    /// than one worker is available, counted from `opts.num_threads` or else
    /// the CPU count.
    pub fn select(rows: usize, opts: &SparseOptions) -> SpResult<Self> {
        #[cfg(feature = "rayon")]
        {
            let workers = opts.num_threads.unwrap_or_else(num_cpus::get);
            if rows >= opts.parallel_threshold && workers > 1 {
                log::debug!("row-parallel backend for {rows} rows on {workers} workers");
                let backend = match opts.num_threads {
                    Some(threads) => RayonRows::with_threads(threads)?,
                    None => RayonRows::new(),
                };
                return Ok(RowBackend::Rayon(backend));
            }
        }
        log::debug!(
            "serial backend for {rows} rows (threshold {})",
            opts.parallel_threshold
        );
        Ok(RowBackend::Serial)
    }

    /// Number of workers the backend runs on.
    pub fn workers(&self) -> usize {
        match self {
            RowBackend::Serial => 1,
            #[cfg(feature = "rayon")]
            RowBackend::Rayon(r) => r.workers(),
        }
    }

    /// Apply `f` to every `(outer, inner)` of `rows`, keeping non-empty results.
    pub fn map_rows<T, F>(&self, rows: &OuterMap<T>, f: F) -> OuterMap<T>
    where
        T: Scalar,
        F: Fn(&SparseContainer<T>) -> SparseContainer<T> + Send + Sync,
    {
        match self {
            RowBackend::Serial => rows
                .iter()
                .map(|(&k, row)| (k, f(row)))
                .filter(|(_, row)| !row.is_empty())
                .collect(),
            #[cfg(feature = "rayon")]
            RowBackend::Rayon(r) => r.map_rows(rows, f),
        }
    }
}
