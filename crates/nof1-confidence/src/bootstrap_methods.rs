//! Bootstrap method implementations
//!
//! This module provides the methods for constructing confidence intervals
//! from bootstrap distributions.

use crate::{bootstrap::BootstrapMethod, ConfidenceInterval, ConfidenceLevel};
use nof1_core::{
    utils::{percentile_sorted, sorted},
    Error, Result,
};

/// Percentile bootstrap method
///
/// The simplest bootstrap method. Uses the empirical percentiles of the
/// bootstrap distribution to construct the confidence interval. Percentiles
/// are linearly interpolated between order statistics rather than taken by
/// nearest rank, so small resample counts still give stable bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileBootstrap;

impl BootstrapMethod for PercentileBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        point_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        if bootstrap_estimates.is_empty() {
            return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
        }
        let level = ConfidenceLevel::try_new(confidence_level).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "Confidence level {confidence_level} must be in (0, 1)"
            ))
        })?;

        let sorted = sorted(bootstrap_estimates);
        let (lower_p, upper_p) = level.tail_bounds();

        Ok(ConfidenceInterval::new(
            percentile_sorted(&sorted, lower_p),
            percentile_sorted(&sorted, upper_p),
            point_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_bootstrap() {
        let bootstrap_estimates = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let original_estimate = 5.5;

        let method = PercentileBootstrap;
        let ci = method
            .calculate_interval(&bootstrap_estimates, original_estimate, 0.90)
            .unwrap();

        // rank 0.05 * 9 = 0.45 and 0.95 * 9 = 8.55
        assert_relative_eq!(ci.lower, 1.45, epsilon = 1e-9);
        assert_relative_eq!(ci.upper, 9.55, epsilon = 1e-9);
        assert_eq!(ci.estimate, 5.5);
        assert_eq!(ci.confidence_level, 0.90);
    }

    #[test]
    fn test_percentile_bootstrap_unsorted_input() {
        let estimates = vec![10.0, 1.0, 5.0, 3.0, 8.0];
        let ci = PercentileBootstrap
            .calculate_interval(&estimates, 5.0, 0.95)
            .unwrap();
        assert!(ci.lower >= 1.0 && ci.lower < 3.0);
        assert!(ci.upper > 8.0 && ci.upper <= 10.0);
    }

    #[test]
    fn test_percentile_bootstrap_errors() {
        let method = PercentileBootstrap;
        assert!(method.calculate_interval(&[], 0.0, 0.95).is_err());

        let err = method.calculate_interval(&[1.0, 2.0], 1.5, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
