//! Observation series: the estimator's input
//!
//! A series is an ordered list of records. Each record maps field names to
//! loosely typed values, the way rows arrive from a form, a JSON API or a
//! DataFrame. [`FieldSelectors`] name the date, on-flag and outcome fields, so
//! the same series can be analysed for any logged metric.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use nof1_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single loosely typed field value
///
/// JSON has no date type: a `Date` serializes as an ISO string and reads back
/// as `Text`. The round trip is lossy in variant but not in meaning, since
/// [`FieldValue::to_date`] parses the text to the same date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value recorded (JSON `null`)
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Interpret the value as a calendar date
    ///
    /// Accepts ISO dates, ISO date-times (space or `T` separated) and
    /// RFC 3339 timestamps; the time part is discarded. A missing date is
    /// malformed: without it the record cannot be ordered.
    pub fn to_date(&self, field: &str) -> Result<NaiveDate> {
        match self {
            Self::Date(date) => Ok(*date),
            Self::Text(text) => {
                parse_date_text(text).ok_or_else(|| Error::malformed_date(field, text))
            }
            Self::Missing => Err(Error::MalformedInput(format!(
                "field '{field}': missing date"
            ))),
            other => Err(Error::malformed_date(field, &format!("{other:?}"))),
        }
    }

    /// Interpret the value as a binary on/off flag
    ///
    /// `None` means the flag was not recorded; it counts as neither state.
    pub fn to_flag(&self, field: &str) -> Result<Option<bool>> {
        match self {
            Self::Missing => Ok(None),
            Self::Bool(b) => Ok(Some(*b)),
            Self::Number(x) => number_to_flag(field, *x),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                if text.eq_ignore_ascii_case("true") {
                    return Ok(Some(true));
                }
                if text.eq_ignore_ascii_case("false") {
                    return Ok(Some(false));
                }
                let x = text.parse::<f64>().map_err(|_| {
                    Error::MalformedInput(format!("field '{field}': '{text}' is not a 0/1 flag"))
                })?;
                number_to_flag(field, x)
            }
            Self::Date(date) => Err(Error::MalformedInput(format!(
                "field '{field}': date {date} is not a 0/1 flag"
            ))),
        }
    }

    /// Interpret the value as a numeric outcome; `None` when missing or NaN
    pub fn to_outcome(&self, field: &str) -> Result<Option<f64>> {
        match self {
            Self::Missing => Ok(None),
            Self::Number(x) => Ok((!x.is_nan()).then_some(*x)),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                let x = text.parse::<f64>().map_err(|_| {
                    Error::MalformedInput(format!("field '{field}': '{text}' is not numeric"))
                })?;
                Ok((!x.is_nan()).then_some(x))
            }
            other => Err(Error::MalformedInput(format!(
                "field '{field}': {other:?} is not numeric"
            ))),
        }
    }
}

fn number_to_flag(field: &str, x: f64) -> Result<Option<bool>> {
    if x.is_nan() {
        Ok(None)
    } else if x == 0.0 {
        Ok(Some(false))
    } else if x == 1.0 {
        Ok(Some(true))
    } else {
        Err(Error::MalformedInput(format!(
            "field '{field}': {x} is not a 0/1 flag"
        )))
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// One logged entry: field name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Field value, `None` if the record has no such field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field value, treating an absent field as missing
    pub fn value(&self, name: &str) -> FieldValue {
        self.get(name).cloned().unwrap_or_default()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Time series of logged records
///
/// Read-only to the estimator, which works on its own sorted copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationSeries {
    records: Vec<Record>,
}

impl ObservationSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl From<Vec<Record>> for ObservationSeries {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for ObservationSeries {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ObservationSeries {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Names of the date, on-flag and outcome fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSelectors {
    pub date: String,
    pub flag: String,
    pub outcome: String,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            flag: "therapy_on".to_string(),
            outcome: "pain_score".to_string(),
        }
    }
}

impl FieldSelectors {
    pub fn new(
        date: impl Into<String>,
        flag: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            flag: flag.into(),
            outcome: outcome.into(),
        }
    }

    /// Same date and flag fields, different outcome metric
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_parsing() {
        let field = "date";
        assert_eq!(FieldValue::from("2024-01-06").to_date(field).unwrap(), ymd(2024, 1, 6));
        assert_eq!(
            FieldValue::from("2024-01-06 13:45:00").to_date(field).unwrap(),
            ymd(2024, 1, 6)
        );
        assert_eq!(
            FieldValue::from("2024-01-06T13:45:00.250").to_date(field).unwrap(),
            ymd(2024, 1, 6)
        );
        assert_eq!(
            FieldValue::from("2024-01-06T23:00:00+02:00").to_date(field).unwrap(),
            ymd(2024, 1, 6)
        );
        assert_eq!(FieldValue::from(ymd(2024, 2, 29)).to_date(field).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_malformed_dates() {
        for value in [
            FieldValue::from("not a date"),
            FieldValue::from("2024-02-30"),
            FieldValue::Missing,
            FieldValue::from(3.0),
        ] {
            assert!(value.to_date("date").unwrap_err().is_malformed(), "{value:?}");
        }
    }

    #[test]
    fn test_flag_coercion() {
        let field = "therapy_on";
        assert_eq!(FieldValue::from(true).to_flag(field).unwrap(), Some(true));
        assert_eq!(FieldValue::from(0).to_flag(field).unwrap(), Some(false));
        assert_eq!(FieldValue::from(1.0).to_flag(field).unwrap(), Some(true));
        assert_eq!(FieldValue::from("1").to_flag(field).unwrap(), Some(true));
        assert_eq!(FieldValue::from("FALSE").to_flag(field).unwrap(), Some(false));
        assert_eq!(FieldValue::Missing.to_flag(field).unwrap(), None);
        assert_eq!(FieldValue::from(f64::NAN).to_flag(field).unwrap(), None);
        assert_eq!(FieldValue::from("").to_flag(field).unwrap(), None);

        assert!(FieldValue::from(2).to_flag(field).unwrap_err().is_malformed());
        assert!(FieldValue::from("yes").to_flag(field).unwrap_err().is_malformed());
    }

    #[test]
    fn test_outcome_coercion() {
        let field = "pain_score";
        assert_eq!(FieldValue::from(5.0).to_outcome(field).unwrap(), Some(5.0));
        assert_eq!(FieldValue::from(7).to_outcome(field).unwrap(), Some(7.0));
        assert_eq!(FieldValue::from(" 6.5 ").to_outcome(field).unwrap(), Some(6.5));
        assert_eq!(FieldValue::from(f64::NAN).to_outcome(field).unwrap(), None);
        assert_eq!(FieldValue::from("NaN").to_outcome(field).unwrap(), None);
        assert_eq!(FieldValue::Missing.to_outcome(field).unwrap(), None);
        assert_eq!(FieldValue::from(None::<f64>).to_outcome(field).unwrap(), None);

        assert!(FieldValue::from("severe").to_outcome(field).unwrap_err().is_malformed());
        assert!(FieldValue::from(true).to_outcome(field).unwrap_err().is_malformed());
    }

    #[test]
    fn test_record_access() {
        let record = Record::new()
            .with("date", "2024-01-01")
            .with("therapy_on", 0)
            .with("pain_score", Some(8.0));

        assert_eq!(record.get("pain_score"), Some(&FieldValue::Number(8.0)));
        assert_eq!(record.get("sleep_hours"), None);
        assert_eq!(record.value("sleep_hours"), FieldValue::Missing);
        assert_eq!(
            record.field_names().collect::<Vec<_>>(),
            vec!["date", "pain_score", "therapy_on"]
        );
    }

    #[test]
    fn test_field_selectors() {
        let fields = FieldSelectors::default();
        assert_eq!(fields.date, "date");
        assert_eq!(fields.flag, "therapy_on");
        assert_eq!(fields.outcome, "pain_score");

        let sleep = fields.with_outcome("sleep_hours");
        assert_eq!(sleep.outcome, "sleep_hours");
        assert_eq!(sleep.flag, "therapy_on");
    }

    #[test]
    fn test_json_round_trip_turns_dates_into_text() {
        let date = ymd(2024, 1, 6);
        let record = Record::new().with("date", date).with("pain_score", 4.0);

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();

        assert_eq!(back.value("date"), FieldValue::from("2024-01-06"));
        assert_ne!(back, record);
        assert_eq!(back.value("date").to_date("date").unwrap(), date);
        assert_eq!(back.value("pain_score"), FieldValue::Number(4.0));
    }
}
