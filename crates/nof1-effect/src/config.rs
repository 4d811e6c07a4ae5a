//! Estimator configuration

use nof1_confidence::{
    Bootstrap, PercentileBootstrap, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RESAMPLES, DEFAULT_SEED,
};
use nof1_core::{ExecutionStrategy, Result};
use serde::{Deserialize, Serialize};

/// Bootstrap settings for the pre/post estimator
///
/// Deserializable so an application can keep it next to its other settings;
/// absent keys fall back to the defaults (2000 resamples, seed 42, 95%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Number of bootstrap resamples
    pub n_boot: usize,
    /// Seed for the resampling streams
    pub seed: u64,
    /// Confidence level of the percentile interval
    pub confidence_level: f64,
    /// Sequential or parallel resampling
    pub strategy: ExecutionStrategy,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            n_boot: DEFAULT_RESAMPLES,
            seed: DEFAULT_SEED,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            strategy: ExecutionStrategy::Sequential,
        }
    }
}

impl EffectConfig {
    pub fn with_resamples(mut self, n_boot: usize) -> Self {
        self.n_boot = n_boot;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check parameters before any data is touched
    pub fn validate(&self) -> Result<()> {
        self.bootstrap().validate()
    }

    /// Resampler configured from these settings
    pub fn bootstrap(&self) -> Bootstrap<PercentileBootstrap> {
        Bootstrap::new(PercentileBootstrap)
            .with_resamples(self.n_boot)
            .with_seed(self.seed)
            .with_confidence_level(self.confidence_level)
            .with_strategy(self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nof1_core::Error;

    #[test]
    fn test_defaults() {
        let config = EffectConfig::default();
        assert_eq!(config.n_boot, 2000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.strategy, ExecutionStrategy::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_flows_into_bootstrap() {
        let bootstrap = EffectConfig::default()
            .with_resamples(500)
            .with_seed(9)
            .with_confidence_level(0.9)
            .bootstrap();
        assert_eq!(bootstrap.n_resamples(), 500);
        assert_eq!(bootstrap.seed(), 9);
        assert_eq!(bootstrap.confidence_level(), 0.9);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            EffectConfig::default().with_resamples(0).validate(),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            EffectConfig::default().with_confidence_level(0.0).validate(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validation_agrees_with_resampler() {
        let config = EffectConfig::default().with_confidence_level(1.2);
        let from_config = config.validate().unwrap_err().to_string();
        let from_resampler = config
            .bootstrap()
            .mean_difference(&[1.0], &[2.0])
            .unwrap_err()
            .to_string();
        assert_eq!(from_config, from_resampler);
    }

    #[test]
    fn test_partial_deserialization() {
        let config: EffectConfig =
            serde_json::from_str(r#"{"n_boot": 5000, "strategy": "parallel"}"#).unwrap();
        assert_eq!(config.n_boot, 5000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.strategy, ExecutionStrategy::Parallel);
    }
}
