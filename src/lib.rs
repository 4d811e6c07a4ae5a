//! N-of-1 therapy effect estimation
//!
//! Facade over the workspace crates:
//!
//! - [`nof1_core`]: error type, execution strategy and descriptive helpers
//! - [`nof1_confidence`]: seeded percentile bootstrap for two-sample statistics
//! - [`nof1_effect`]: the pre/post estimator over observation series
//! - `nof1_polars` (feature `polars`): the estimator on DataFrame columns

pub use nof1_confidence;
pub use nof1_core;
pub use nof1_effect;
#[cfg(feature = "polars")]
pub use nof1_polars;

pub use nof1_confidence::{bootstrap_mean_diff, ConfidenceInterval};
pub use nof1_core::{Error, ExecutionStrategy, Result};
pub use nof1_effect::{
    compute_pre_post_effect, EffectConfig, EffectResult, FieldSelectors, FieldValue,
    ObservationSeries, PrePostEstimator, Record,
};
