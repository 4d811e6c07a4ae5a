//! Polars integration for pre/post therapy effect estimation
//!
//! Symptom logs usually live in a DataFrame. This crate exposes the estimator
//! through a single extension trait so a log can be analysed straight from its
//! columns, one outcome or many at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use nof1_polars::{EffectConfig, PrePostEffectExt};
//!
//! let df = df![
//!     "date" => ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"],
//!     "therapy_on" => [0, 0, 1, 1],
//!     "pain_score" => [7.0, 8.0, 4.0, 3.0],
//!     "sleep_hours" => [5.5, 6.0, 7.0, 7.5],
//! ]?;
//!
//! let pain = df.pre_post_effect("date", "therapy_on", "pain_score")?;
//! let summary = df.pre_post_effects(
//!     "date",
//!     "therapy_on",
//!     &["pain_score", "sleep_hours"],
//!     &EffectConfig::default(),
//! )?;
//! ```

mod error;
mod methods;
mod traits;

pub use error::{Error, Result};
pub use traits::PrePostEffectExt;

// Re-export commonly used types from dependencies
pub use nof1_effect::{EffectConfig, EffectResult, ObservationSeries};
