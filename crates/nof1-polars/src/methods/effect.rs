//! Pre/post effect estimation on DataFrame columns

use crate::{Error, PrePostEffectExt, Result};
use chrono::NaiveDate;
use nof1_effect::{
    EffectConfig, EffectResult, FieldSelectors, FieldValue, ObservationSeries, PrePostEstimator,
    Record,
};
use polars::prelude::*;

// 1970-01-01 counted from 0001-01-01; polars stores dates as days since the epoch
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

fn epoch_days_to_date(days: i32) -> FieldValue {
    days.checked_add(UNIX_EPOCH_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .map_or(FieldValue::Missing, FieldValue::Date)
}

/// Convert one column into field values, one per row
fn column_values(column: &Column) -> Result<Vec<FieldValue>> {
    let values = match column.dtype() {
        DataType::Boolean => column.bool()?.into_iter().map(FieldValue::from).collect(),
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.map_or(FieldValue::Missing, FieldValue::from))
            .collect(),
        DataType::Date => column
            .cast(&DataType::Int32)?
            .i32()?
            .into_iter()
            .map(|v| v.map_or(FieldValue::Missing, epoch_days_to_date))
            .collect(),
        DataType::Datetime(_, _) => column
            .cast(&DataType::Date)?
            .cast(&DataType::Int32)?
            .i32()?
            .into_iter()
            .map(|v| v.map_or(FieldValue::Missing, epoch_days_to_date))
            .collect(),
        DataType::Float64
        | DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(FieldValue::from)
            .collect(),
        DataType::Null => vec![FieldValue::Missing; column.len()],
        dt => {
            return Err(Error::TypeMismatch {
                expected: "boolean, string, date or numeric".to_string(),
                got: format!("{:?}", dt),
            });
        }
    };
    Ok(values)
}

impl PrePostEffectExt for DataFrame {
    fn to_observation_series(&self, columns: &[&str]) -> Result<ObservationSeries> {
        let mut records = vec![Record::new(); self.height()];

        for col_name in columns {
            let column = self
                .column(col_name)
                .map_err(|_| Error::InvalidColumn(col_name.to_string()))?;

            for (record, value) in records.iter_mut().zip(column_values(column)?) {
                record.set(*col_name, value);
            }
        }

        Ok(records.into())
    }

    fn pre_post_effect(
        &self,
        date_col: &str,
        flag_col: &str,
        outcome_col: &str,
    ) -> Result<EffectResult> {
        self.pre_post_effect_with_config(date_col, flag_col, outcome_col, &EffectConfig::default())
    }

    fn pre_post_effect_with_config(
        &self,
        date_col: &str,
        flag_col: &str,
        outcome_col: &str,
        config: &EffectConfig,
    ) -> Result<EffectResult> {
        let series = self.to_observation_series(&[date_col, flag_col, outcome_col])?;
        let fields = FieldSelectors::new(date_col, flag_col, outcome_col);
        Ok(PrePostEstimator::new(config.clone()).estimate_with_fields(&series, &fields)?)
    }

    fn pre_post_effects(
        &self,
        date_col: &str,
        flag_col: &str,
        outcome_cols: &[&str],
        config: &EffectConfig,
    ) -> Result<DataFrame> {
        let mut columns = vec![date_col, flag_col];
        columns.extend_from_slice(outcome_cols);
        let series = self.to_observation_series(&columns)?;

        let estimator = PrePostEstimator::new(config.clone());
        let mut results: Vec<Option<EffectResult>> = Vec::with_capacity(outcome_cols.len());
        for (_, result) in estimator.estimate_outcomes(&series, date_col, flag_col, outcome_cols) {
            match result {
                Ok(effect) => results.push(Some(effect)),
                // Not enough data for this outcome yet
                Err(e) if e.is_invalid_input() => results.push(None),
                Err(e) => return Err(e.into()),
            }
        }

        let count = |f: fn(&EffectResult) -> usize| -> Vec<Option<u64>> {
            results.iter().map(|r| r.as_ref().map(|r| f(r) as u64)).collect()
        };
        let stat = |f: fn(&EffectResult) -> f64| -> Vec<Option<f64>> {
            results.iter().map(|r| r.as_ref().map(f)).collect()
        };
        let start_dates: Vec<Option<String>> = results
            .iter()
            .map(|r| r.as_ref().map(|r| r.start_date.clone()))
            .collect();
        let outcome_names: Vec<String> = outcome_cols.iter().map(|s| s.to_string()).collect();

        let result_series = vec![
            Series::new("outcome".into(), outcome_names).into(),
            Series::new("n_pre".into(), count(|r| r.n_pre)).into(),
            Series::new("n_post".into(), count(|r| r.n_post)).into(),
            Series::new("pre_mean".into(), stat(|r| r.pre_mean)).into(),
            Series::new("post_mean".into(), stat(|r| r.post_mean)).into(),
            Series::new("effect_mean".into(), stat(|r| r.effect_mean)).into(),
            Series::new("ci_low".into(), stat(|r| r.ci_low)).into(),
            Series::new("ci_high".into(), stat(|r| r.ci_high)).into(),
            Series::new("start_date".into(), start_dates).into(),
        ];

        Ok(DataFrame::new(result_series)?)
    }
}
