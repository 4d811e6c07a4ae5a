//! Error types for nof1-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Estimation error: {0}")]
    Core(#[from] nof1_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
}

impl Error {
    /// True when the estimator reported "not enough data yet"
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_invalid_input())
    }

    /// True when a cell could not be interpreted as a date, flag or outcome
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_malformed())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
