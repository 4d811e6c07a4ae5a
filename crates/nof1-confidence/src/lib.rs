//! Bootstrap confidence interval estimation
//!
//! This crate provides a seeded, reproducible percentile bootstrap for
//! two-sample comparisons, used to put a confidence interval around the
//! change in a symptom score between two periods.
//!
//! # Overview
//!
//! Each bootstrap iteration resamples both groups independently with
//! replacement and evaluates a [`TwoSampleStatistic`] on the resamples. The
//! point estimate is the mean of the resulting distribution and the interval
//! is taken from its interpolated percentiles.
//!
//! Every iteration draws from its own random stream derived from the seed,
//! so results are bit-identical for a fixed seed whether the iterations run
//! sequentially or (with the `parallel` feature) on a rayon pool.
//!
//! # Examples
//!
//! ```rust
//! use nof1_confidence::{Bootstrap, PercentileBootstrap};
//!
//! let pre = vec![6.0, 7.0, 6.5, 7.5, 6.0];
//! let post = vec![4.0, 4.5, 3.5, 5.0];
//!
//! let result = Bootstrap::new(PercentileBootstrap)
//!     .with_resamples(2000)
//!     .with_seed(42)
//!     .mean_difference(&pre, &post)
//!     .unwrap();
//!
//! println!("{}", result.interval);
//! assert!(result.interval.upper < 0.0);
//! ```

pub mod api;
mod bootstrap;
mod bootstrap_methods;
mod traits;
mod types;

// Re-exports
pub use api::{
    bootstrap_mean_diff, mean_diff_bootstrap, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RESAMPLES,
    DEFAULT_SEED,
};
pub use bootstrap::{Bootstrap, BootstrapMethod, BootstrapResult};
pub use bootstrap_methods::PercentileBootstrap;
pub use traits::{MeanDifference, TwoSampleStatistic};
pub use types::{ConfidenceInterval, ConfidenceLevel};
