//! High-level API for bootstrap confidence intervals
//!
//! This module provides easy-to-use functions for the common case: a
//! percentile bootstrap of the mean difference between two groups.

use crate::bootstrap::{Bootstrap, BootstrapResult};
use nof1_core::Result;

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 2000;

/// Default seed, fixed so repeated calls on identical input agree
pub const DEFAULT_SEED: u64 = 42;

/// Default confidence level (2.5th and 97.5th percentiles)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Bootstrap the mean difference `mean(post) - mean(pre)`
///
/// Returns the mean of the bootstrap differences and the 95% percentile
/// interval `(ci_low, ci_high)`.
///
/// # Example
/// ```rust
/// use nof1_confidence::{bootstrap_mean_diff, DEFAULT_RESAMPLES, DEFAULT_SEED};
///
/// let pre = [8.0, 8.0, 7.0, 8.0, 7.0];
/// let post = [4.0, 3.0, 4.0, 3.0, 2.0];
///
/// let (effect, (lo, hi)) =
///     bootstrap_mean_diff(&pre, &post, DEFAULT_RESAMPLES, DEFAULT_SEED).unwrap();
/// assert!(lo <= effect && effect <= hi);
/// assert!((effect + 4.4).abs() < 0.3);
/// ```
pub fn bootstrap_mean_diff(
    pre: &[f64],
    post: &[f64],
    n_boot: usize,
    seed: u64,
) -> Result<(f64, (f64, f64))> {
    let result = mean_diff_bootstrap(pre, post, n_boot, seed)?;
    Ok((
        result.estimate,
        (result.interval.lower, result.interval.upper),
    ))
}

/// Like [`bootstrap_mean_diff`] but returns the full [`BootstrapResult`]
pub fn mean_diff_bootstrap(
    pre: &[f64],
    post: &[f64],
    n_boot: usize,
    seed: u64,
) -> Result<BootstrapResult> {
    Bootstrap::default()
        .with_resamples(n_boot)
        .with_seed(seed)
        .mean_difference(pre, post)
}
