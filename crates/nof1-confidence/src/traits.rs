//! Core traits for bootstrap confidence interval estimation

use nof1_core::utils::mean;

/// A statistic comparing two samples
///
/// The bootstrap engine resamples both groups and evaluates the statistic on
/// every resample. By convention the statistic measures `sample2` relative to
/// `sample1` (e.g. post minus pre).
pub trait TwoSampleStatistic: Send + Sync {
    /// Evaluate the statistic on a pair of samples
    fn compute(&self, sample1: &[f64], sample2: &[f64]) -> f64;

    /// Statistic name for documentation
    fn name(&self) -> &'static str;
}

/// Difference of arithmetic means, `mean(sample2) - mean(sample1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanDifference;

impl TwoSampleStatistic for MeanDifference {
    fn compute(&self, sample1: &[f64], sample2: &[f64]) -> f64 {
        mean(sample2) - mean(sample1)
    }

    fn name(&self) -> &'static str {
        "Mean Difference"
    }
}
