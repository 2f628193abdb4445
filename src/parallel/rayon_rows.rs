//! rayon-based row-parallel execution.
//!
//! `RayonRows` never configures rayon's global pool. Without a thread count
//! the rows run on whatever pool is current for the caller; with one, they
//! run inside a private pool of that size.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::container::SparseContainer;
use crate::core::traits::Scalar;
use crate::error::{SpError, SpResult};
use crate::matrix::storage::OuterMap;

#[derive(Default)]
pub struct RayonRows {
    pool: Option<ThreadPool>,
}

impl RayonRows {
    /// Run on the caller's current pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Run on a private pool of `threads` workers.
    pub fn with_threads(threads: usize) -> SpResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SpError::ArgumentError(format!("cannot build a {threads}-thread pool: {e}")))?;
        Ok(Self { pool: Some(pool) })
    }

    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    pub fn map_rows<T, F>(&self, rows: &OuterMap<T>, f: F) -> OuterMap<T>
    where
        T: Scalar,
        F: Fn(&SparseContainer<T>) -> SparseContainer<T> + Send + Sync,
    {
        let run = || {
            let keyed: Vec<(usize, &SparseContainer<T>)> = rows.iter().map(|(&k, r)| (k, r)).collect();
            keyed
                .par_iter()
                .map(|&(k, row)| (k, f(row)))
                .filter(|(_, row)| !row.is_empty())
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
