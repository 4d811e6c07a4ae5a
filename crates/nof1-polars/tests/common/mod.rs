//! Common test utilities for nof1-polars tests

use polars::prelude::*;

/// Ten-day pain log: therapy starts on 2024-01-06
pub fn reference_log() -> DataFrame {
    df![
        "date" => (1..=10).map(|d| format!("2024-01-{d:02}")).collect::<Vec<_>>(),
        "therapy_on" => [0i32, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        "pain_score" => [8.0, 8.0, 7.0, 8.0, 7.0, 4.0, 3.0, 4.0, 3.0, 2.0],
    ]
    .unwrap()
}

/// Extract a single f64 from a result DataFrame
pub fn extract_f64(df: &DataFrame, col_name: &str, row: usize) -> Option<f64> {
    df.column(col_name).unwrap().f64().unwrap().get(row)
}
