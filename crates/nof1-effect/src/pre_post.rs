//! Pre/post effect estimation
//!
//! The series is cut at the first date the intervention flag is on. Every
//! record dated before that day belongs to the pre period and every record on
//! or after it to the post period, whatever its own flag says: the comparison
//! is "before vs. after the intervention began", not a per-row on/off split.
//! Within each period missing outcomes are dropped, then the change in means
//! is bootstrapped.

use crate::{
    config::EffectConfig,
    series::{FieldSelectors, ObservationSeries},
    types::{EffectResult, Readiness, TrackingStage},
};
use chrono::NaiveDate;
use nof1_core::{
    utils::{mean, std_dev},
    Error, Result,
};
use tracing::{debug, instrument};

/// A series partitioned at the intervention start
#[derive(Debug, Clone, PartialEq)]
pub struct PrePostSplit {
    /// Earliest date with the flag on
    pub start_date: NaiveDate,
    /// Non-missing outcomes dated before `start_date`, in date order
    pub pre: Vec<f64>,
    /// Non-missing outcomes dated on or after `start_date`, in date order
    pub post: Vec<f64>,
    /// Records whose outcome was missing, across both periods
    pub n_missing: usize,
}

/// Logged days required before the start for a meaningful comparison
pub const MIN_PRE_DAYS: usize = 3;

/// Logged days required on or after the start
pub const MIN_POST_DAYS: usize = 10;

impl PrePostSplit {
    /// Standardized effect size `|post_mean - pre_mean| / pooled_sd`
    ///
    /// The pooled standard deviation weights each period's sample standard
    /// deviation by its degrees of freedom. Returns 0 when either period is
    /// empty or the pooled standard deviation is not positive.
    pub fn cohens_d(&self) -> f64 {
        let (n_pre, n_post) = (self.pre.len(), self.post.len());
        if n_pre == 0 || n_post == 0 {
            return 0.0;
        }

        let effect = mean(&self.post) - mean(&self.pre);
        let pooled_sd = (((n_pre - 1) as f64 * std_dev(&self.pre).powi(2)
            + (n_post - 1) as f64 * std_dev(&self.post).powi(2))
            / (n_pre + n_post - 2) as f64)
            .sqrt();

        if pooled_sd > 0.0 {
            effect.abs() / pooled_sd
        } else {
            0.0
        }
    }

    /// Whether both periods have enough logged outcomes
    ///
    /// The pre period is checked first: while it is short the stage is
    /// [`TrackingStage::Before`], otherwise the post period is checked.
    pub fn readiness(&self, min_pre: usize, min_post: usize) -> Readiness {
        if self.pre.len() < min_pre {
            Readiness::NeedsMoreData {
                stage: TrackingStage::Before,
                days_needed: min_pre - self.pre.len(),
            }
        } else if self.post.len() < min_post {
            Readiness::NeedsMoreData {
                stage: TrackingStage::After,
                days_needed: min_post - self.post.len(),
            }
        } else {
            Readiness::Ready
        }
    }
}

/// A record reduced to the three selected fields
struct Row {
    date: NaiveDate,
    flag: Option<bool>,
    outcome: Option<f64>,
}

/// Estimator for the change in an outcome after an intervention started
#[derive(Debug, Clone, Default)]
pub struct PrePostEstimator {
    config: EffectConfig,
}

impl PrePostEstimator {
    pub fn new(config: EffectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    fn rows(series: &ObservationSeries, fields: &FieldSelectors) -> Result<Vec<Row>> {
        let mut rows = series
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let row = || -> Result<Row> {
                    Ok(Row {
                        date: record.value(&fields.date).to_date(&fields.date)?,
                        flag: record.value(&fields.flag).to_flag(&fields.flag)?,
                        outcome: record.value(&fields.outcome).to_outcome(&fields.outcome)?,
                    })
                };
                row().map_err(|e| match e {
                    Error::MalformedInput(msg) => {
                        Error::MalformedInput(format!("record {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Stable: same-date records keep their input order
        rows.sort_by_key(|row| row.date);
        Ok(rows)
    }

    /// Partition the series at the intervention start
    ///
    /// Fails when the flag never takes both states. The returned groups may
    /// still be empty; [`PrePostEstimator::estimate_with_fields`] rejects that.
    pub fn split(&self, series: &ObservationSeries, fields: &FieldSelectors) -> Result<PrePostSplit> {
        let rows = Self::rows(series, fields)?;

        let has_off = rows.iter().any(|row| row.flag == Some(false));
        let start_date = rows
            .iter()
            .find(|row| row.flag == Some(true))
            .map(|row| row.date)
            .filter(|_| has_off)
            .ok_or_else(|| Error::missing_flag_state(&fields.flag))?;

        let mut split = PrePostSplit {
            start_date,
            pre: Vec::new(),
            post: Vec::new(),
            n_missing: 0,
        };
        for row in &rows {
            let Some(outcome) = row.outcome else {
                split.n_missing += 1;
                continue;
            };
            if row.date < start_date {
                split.pre.push(outcome);
            } else {
                split.post.push(outcome);
            }
        }
        Ok(split)
    }

    /// Whether the series has [`MIN_PRE_DAYS`] and [`MIN_POST_DAYS`] logged
    /// outcomes around the start
    pub fn readiness(
        &self,
        series: &ObservationSeries,
        fields: &FieldSelectors,
    ) -> Result<Readiness> {
        Ok(self
            .split(series, fields)?
            .readiness(MIN_PRE_DAYS, MIN_POST_DAYS))
    }

    /// Estimate the effect using the default field names
    pub fn estimate(&self, series: &ObservationSeries) -> Result<EffectResult> {
        self.estimate_with_fields(series, &FieldSelectors::default())
    }

    /// Estimate the effect of the flagged intervention on the selected outcome
    #[instrument(skip(self, series, fields),
                 fields(n_records = series.len(), outcome = %fields.outcome, n_boot = self.config.n_boot))]
    pub fn estimate_with_fields(
        &self,
        series: &ObservationSeries,
        fields: &FieldSelectors,
    ) -> Result<EffectResult> {
        self.config.validate()?;

        let split = self.split(series, fields)?;
        debug!(
            start_date = %split.start_date,
            n_pre = split.pre.len(),
            n_post = split.post.len(),
            n_missing = split.n_missing,
            "Series split at intervention start"
        );

        if split.pre.is_empty() || split.post.is_empty() {
            return Err(Error::insufficient_groups(split.pre.len(), split.post.len()));
        }

        let boot = self.config.bootstrap().mean_difference(&split.pre, &split.post)?;

        Ok(EffectResult {
            n_pre: split.pre.len(),
            n_post: split.post.len(),
            pre_mean: mean(&split.pre),
            post_mean: mean(&split.post),
            effect_mean: boot.estimate,
            ci_low: boot.interval.lower,
            ci_high: boot.interval.upper,
            start_date: split.start_date.format("%Y-%m-%d").to_string(),
        })
    }

    /// Estimate the effect for several outcome metrics over the same split
    ///
    /// Results come back in the order of `outcomes`; one metric failing (for
    /// example because it was never logged before the start) does not affect
    /// the others.
    pub fn estimate_outcomes(
        &self,
        series: &ObservationSeries,
        date_field: &str,
        flag_field: &str,
        outcomes: &[&str],
    ) -> Vec<(String, Result<EffectResult>)> {
        outcomes
            .iter()
            .map(|&outcome| {
                let fields = FieldSelectors::new(date_field, flag_field, outcome);
                (outcome.to_string(), self.estimate_with_fields(series, &fields))
            })
            .collect()
    }
}

/// Compare an outcome before vs. after the flag first turns on
///
/// Uses 2000 bootstrap resamples with seed 42 and a 95% percentile interval.
///
/// # Example
///
/// ```rust
/// use nof1_effect::{compute_pre_post_effect, ObservationSeries, Record};
///
/// let pain = [8.0, 8.0, 7.0, 8.0, 7.0, 4.0, 3.0, 4.0, 3.0, 2.0];
/// let series: ObservationSeries = pain
///     .iter()
///     .enumerate()
///     .map(|(i, &score)| {
///         Record::new()
///             .with("date", format!("2024-01-{:02}", i + 1))
///             .with("therapy_on", i32::from(i >= 5))
///             .with("pain_score", score)
///     })
///     .collect();
///
/// let result = compute_pre_post_effect(&series, "date", "therapy_on", "pain_score").unwrap();
/// assert_eq!(result.start_date, "2024-01-06");
/// assert_eq!((result.n_pre, result.n_post), (5, 5));
/// ```
pub fn compute_pre_post_effect(
    series: &ObservationSeries,
    date_field: &str,
    flag_field: &str,
    outcome_field: &str,
) -> Result<EffectResult> {
    PrePostEstimator::default().estimate_with_fields(
        series,
        &FieldSelectors::new(date_field, flag_field, outcome_field),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Record;

    fn series(rows: &[(&str, i32, Option<f64>)]) -> ObservationSeries {
        rows.iter()
            .map(|&(date, flag, pain)| {
                Record::new()
                    .with("date", date)
                    .with("therapy_on", flag)
                    .with("pain_score", pain)
            })
            .collect()
    }

    #[test]
    fn test_split_is_temporal() {
        // an off day after the start still counts as post
        let s = series(&[
            ("2024-01-01", 0, Some(6.0)),
            ("2024-01-02", 1, Some(4.0)),
            ("2024-01-03", 0, Some(5.0)),
            ("2024-01-04", 1, Some(3.0)),
        ]);
        let split = PrePostEstimator::default()
            .split(&s, &FieldSelectors::default())
            .unwrap();

        assert_eq!(split.start_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(split.pre, vec![6.0]);
        assert_eq!(split.post, vec![4.0, 5.0, 3.0]);
    }

    #[test]
    fn test_split_sorts_by_date() {
        let s = series(&[
            ("2024-01-04", 1, Some(3.0)),
            ("2024-01-01", 0, Some(6.0)),
            ("2024-01-03", 1, Some(4.0)),
            ("2024-01-02", 0, Some(5.0)),
        ]);
        let split = PrePostEstimator::default()
            .split(&s, &FieldSelectors::default())
            .unwrap();

        assert_eq!(split.start_date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(split.pre, vec![6.0, 5.0]);
        assert_eq!(split.post, vec![4.0, 3.0]);
    }

    #[test]
    fn test_same_date_records_all_go_post() {
        // start day has both an off and an on entry
        let s = series(&[
            ("2024-01-01", 0, Some(6.0)),
            ("2024-01-02", 0, Some(5.5)),
            ("2024-01-02", 1, Some(4.5)),
        ]);
        let split = PrePostEstimator::default()
            .split(&s, &FieldSelectors::default())
            .unwrap();

        assert_eq!(split.pre, vec![6.0]);
        assert_eq!(split.post, vec![5.5, 4.5]);
    }

    #[test]
    fn test_missing_flags_count_as_neither_state() {
        let s: ObservationSeries = vec![
            Record::new().with("date", "2024-01-01").with("pain_score", 6.0),
            Record::new()
                .with("date", "2024-01-02")
                .with("therapy_on", 1)
                .with("pain_score", 4.0),
        ]
        .into();

        let err = PrePostEstimator::default().estimate(&s).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_missing_outcomes_are_counted() {
        let s = series(&[
            ("2024-01-01", 0, Some(5.0)),
            ("2024-01-02", 0, None),
            ("2024-01-03", 0, Some(7.0)),
            ("2024-01-04", 1, Some(3.0)),
            ("2024-01-05", 1, None),
            ("2024-01-06", 1, Some(4.0)),
        ]);
        let split = PrePostEstimator::default()
            .split(&s, &FieldSelectors::default())
            .unwrap();
        assert_eq!(split.n_missing, 2);
        assert_eq!(split.pre, vec![5.0, 7.0]);
    }

    #[test]
    fn test_invalid_config_is_rejected_first() {
        let s = series(&[("2024-01-01", 0, Some(5.0)), ("2024-01-02", 1, Some(3.0))]);
        let estimator = PrePostEstimator::new(EffectConfig::default().with_resamples(0));
        assert!(matches!(
            estimator.estimate(&s),
            Err(Error::InvalidParameter(_))
        ));
    }

    fn split_of(pre: &[f64], post: &[f64]) -> PrePostSplit {
        PrePostSplit {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            pre: pre.to_vec(),
            post: post.to_vec(),
            n_missing: 0,
        }
    }

    #[test]
    fn test_cohens_d_uses_pooled_sample_sd() {
        // both periods have sample sd sqrt(2), means 6 and 4
        let split = split_of(&[5.0, 7.0], &[3.0, 5.0]);
        assert!((split.cohens_d() - 2.0f64.sqrt()).abs() < 1e-12);

        // unequal sizes: pooled variance (2*1 + 1*4.5) / 3
        let split = split_of(&[5.0, 6.0, 7.0], &[2.0, 5.0]);
        let expected = (6.0 - 3.5) / (6.5f64 / 3.0).sqrt();
        assert!((split.cohens_d() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cohens_d_degenerate_cases() {
        assert_eq!(split_of(&[4.0, 4.0], &[2.0, 2.0]).cohens_d(), 0.0);
        assert_eq!(split_of(&[4.0], &[2.0]).cohens_d(), 0.0);
        assert_eq!(split_of(&[], &[2.0, 3.0]).cohens_d(), 0.0);
    }

    #[test]
    fn test_readiness_gate() {
        let split = split_of(&[5.0, 6.0], &[4.0; 12]);
        assert_eq!(
            split.readiness(MIN_PRE_DAYS, MIN_POST_DAYS),
            Readiness::NeedsMoreData {
                stage: TrackingStage::Before,
                days_needed: 1
            }
        );

        let split = split_of(&[5.0, 6.0, 7.0], &[4.0; 4]);
        assert_eq!(
            split.readiness(MIN_PRE_DAYS, MIN_POST_DAYS),
            Readiness::NeedsMoreData {
                stage: TrackingStage::After,
                days_needed: 6
            }
        );

        let split = split_of(&[5.0, 6.0, 7.0], &[4.0; 10]);
        assert!(split.readiness(MIN_PRE_DAYS, MIN_POST_DAYS).is_ready());
    }

    #[test]
    fn test_estimator_readiness_ignores_missing_outcomes() {
        let s = series(&[
            ("2024-01-01", 0, Some(5.0)),
            ("2024-01-02", 0, None),
            ("2024-01-03", 0, Some(7.0)),
            ("2024-01-04", 1, Some(3.0)),
        ]);
        let readiness = PrePostEstimator::default()
            .readiness(&s, &FieldSelectors::default())
            .unwrap();
        assert_eq!(readiness.days_needed(), 1);
        assert!(!readiness.is_ready());
    }
}
