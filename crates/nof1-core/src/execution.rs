//! Execution strategy for batch operations
//!
//! Bootstrap iterations are independent, so they can be spread over a rayon
//! thread pool. Results are always returned in index order, which keeps any
//! downstream reduction identical between strategies.

use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Process items sequentially
    #[default]
    Sequential,
    /// Process items in parallel (falls back to sequential without the
    /// `parallel` feature)
    Parallel,
}

impl ExecutionStrategy {
    /// Check if parallel execution is available for this strategy
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && matches!(self, Self::Parallel)
    }

    /// Execute `f` for every index in `0..count`, collecting in index order
    pub fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        match self {
            #[cfg(feature = "parallel")]
            Self::Parallel => {
                use rayon::prelude::*;
                (0..count).into_par_iter().map(f).collect()
            }
            _ => (0..count).map(f).collect(),
        }
    }
}
