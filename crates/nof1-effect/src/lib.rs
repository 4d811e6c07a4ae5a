//! Pre/post effect estimation for personal symptom logs
//!
//! Given a daily log of (date, intervention flag, outcome) records, this crate
//! compares the outcome before vs. after the intervention started and puts a
//! percentile bootstrap confidence interval around the change. It is the
//! statistical core of an N-of-1 therapy tracker: "has my pain changed since I
//! started acupuncture?"
//!
//! # Overview
//!
//! - [`ObservationSeries`] holds loosely typed records; [`FieldSelectors`]
//!   name the date, flag and outcome fields, so any logged metric (pain,
//!   sleep, mood, stress) can be analysed.
//! - [`PrePostEstimator`] sorts a copy of the series by date, cuts it at the
//!   first date the flag is on, drops missing outcomes per period and
//!   bootstraps the difference of means.
//! - [`EffectResult`] is the value handed to presentation code, with helpers
//!   for direction, size band and percent change.
//! - [`PrePostSplit`] also reports Cohen's d and whether enough days have been
//!   logged on each side of the start ([`Readiness`]).
//!
//! # Errors
//!
//! Bad data (an unparsable date, a flag that is not 0/1) is reported as
//! `MalformedInput`. A well-formed log that cannot be analysed yet (the flag
//! never changes, or one period has no outcomes) is reported as
//! `InvalidInput`, which callers typically turn into "not enough data yet".
//!
//! # Example
//!
//! ```rust
//! use nof1_effect::{EffectConfig, FieldSelectors, ObservationSeries, PrePostEstimator, Record};
//!
//! let sleep = [5.5, 6.0, 5.0, 5.5, 7.0, 7.5, 6.5, 7.0];
//! let series: ObservationSeries = sleep
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &hours)| {
//!         Record::new()
//!             .with("date", format!("2024-03-{:02}", i + 1))
//!             .with("therapy_on", i >= 4)
//!             .with("sleep_hours", hours)
//!     })
//!     .collect();
//!
//! let estimator = PrePostEstimator::new(EffectConfig::default().with_resamples(1000));
//! let fields = FieldSelectors::default().with_outcome("sleep_hours");
//! let result = estimator.estimate_with_fields(&series, &fields).unwrap();
//!
//! assert_eq!(result.start_date, "2024-03-05");
//! assert!(result.effect_mean > 0.0);
//! ```

mod config;
mod pre_post;
mod series;
mod types;

// Re-exports
pub use config::EffectConfig;
pub use nof1_core::{Error, Result};
pub use pre_post::{
    compute_pre_post_effect, PrePostEstimator, PrePostSplit, MIN_POST_DAYS, MIN_PRE_DAYS,
};
pub use series::{FieldSelectors, FieldValue, ObservationSeries, Record};
pub use types::{EffectDirection, EffectMagnitude, EffectResult, Readiness, TrackingStage};
