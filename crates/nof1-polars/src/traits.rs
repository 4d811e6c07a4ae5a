//! Extension trait for running the pre/post estimator on Polars DataFrames

use crate::Result;
use nof1_effect::{EffectConfig, EffectResult, ObservationSeries};
use polars::prelude::*;

/// Pre/post effect estimation driven by named DataFrame columns
pub trait PrePostEffectExt {
    /// Convert the named columns into an [`ObservationSeries`]
    ///
    /// Each row becomes one record keyed by column name. Nulls become
    /// missing values; `Date` and `Datetime` columns become calendar dates.
    fn to_observation_series(&self, columns: &[&str]) -> Result<ObservationSeries>;

    /// Estimate the effect of the flag on one outcome with default settings
    ///
    /// # Arguments
    /// * `date_col` - Column with the entry dates
    /// * `flag_col` - 0/1 or boolean column marking the intervention
    /// * `outcome_col` - Numeric outcome column
    fn pre_post_effect(
        &self,
        date_col: &str,
        flag_col: &str,
        outcome_col: &str,
    ) -> Result<EffectResult>;

    /// Same as [`PrePostEffectExt::pre_post_effect`] with explicit settings
    fn pre_post_effect_with_config(
        &self,
        date_col: &str,
        flag_col: &str,
        outcome_col: &str,
        config: &EffectConfig,
    ) -> Result<EffectResult>;

    /// Estimate the effect for several outcomes
    ///
    /// # Returns
    /// DataFrame with one row per outcome and columns `outcome`, `n_pre`,
    /// `n_post`, `pre_mean`, `post_mean`, `effect_mean`, `ci_low`, `ci_high`,
    /// `start_date`. Outcomes that cannot be analysed yet have null statistics;
    /// malformed data still fails the whole call.
    fn pre_post_effects(
        &self,
        date_col: &str,
        flag_col: &str,
        outcome_cols: &[&str],
        config: &EffectConfig,
    ) -> Result<DataFrame>;
}
