//! Error types for N-of-1 effect estimation
//!
//! Provides a unified error type for all nof1 crates. Callers are expected to
//! tell "bad data" ([`Error::MalformedInput`]) apart from "not enough data yet"
//! ([`Error::InvalidInput`]) and degrade accordingly.

use thiserror::Error;

/// Core error type for effect estimation
#[derive(Error, Debug)]
pub enum Error {
    /// A value could not be parsed or ordered (dates, flags, outcomes)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The data is well-formed but does not satisfy a business rule
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The flag field never takes both states, so there is no split point
    pub fn missing_flag_state(flag_field: &str) -> Self {
        Self::InvalidInput(format!(
            "flag column '{flag_field}' must include both 0 and 1"
        ))
    }

    /// One side of the split is empty after dropping missing outcomes
    pub fn insufficient_groups(n_pre: usize, n_post: usize) -> Self {
        Self::InvalidInput(format!(
            "not enough pre/post observations (pre: {n_pre}, post: {n_post})"
        ))
    }

    /// A date value that could not be parsed
    pub fn malformed_date(field: &str, value: &str) -> Self {
        Self::MalformedInput(format!("field '{field}': cannot parse date '{value}'"))
    }

    /// Create an error for empty resampler input
    pub fn empty_sample(context: &str) -> Self {
        Self::InvalidInput(format!("{context}: empty sample(s)"))
    }

    /// True for the business-rule failures ("not enough data yet")
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// True when the caller handed over data that could not be interpreted
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedInput("bad date".to_string());
        assert_eq!(err.to_string(), "Malformed input: bad date");

        let err = Error::InvalidInput("no split".to_string());
        assert_eq!(err.to_string(), "Invalid input: no split");

        let err = Error::InvalidParameter("n_boot must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: n_boot must be positive");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::missing_flag_state("therapy_on");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid input: flag column 'therapy_on' must include both 0 and 1"
        );

        let err = Error::insufficient_groups(0, 5);
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("not enough pre/post observations"));
        assert!(err.to_string().contains("pre: 0"));

        let err = Error::malformed_date("date", "yesterday");
        assert!(err.is_malformed());
        assert!(!err.is_invalid_input());
        assert!(err.to_string().contains("yesterday"));

        let err = Error::empty_sample("bootstrap");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }
}
