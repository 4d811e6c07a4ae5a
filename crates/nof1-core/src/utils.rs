//! Utility functions for working with data slices

use std::cmp::Ordering;

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use nof1_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    });
    sorted
}

/// Calculate the mean of a slice
///
/// Returns NaN for empty slices.
///
/// # Examples
///
/// ```rust
/// use nof1_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Calculate the sample standard deviation
///
/// Returns 0.0 for slices with less than 2 elements.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance: f64 = data
        .iter()
        .map(|&x| {
            let diff = x - m;
            diff * diff
        })
        .sum::<f64>()
        / (data.len() - 1) as f64;
    variance.sqrt()
}

/// Percentile of already sorted data using linear interpolation
///
/// `p` is a probability in `[0, 1]`. The rank is `p * (n - 1)` and the result
/// interpolates between the two neighbouring order statistics, the same
/// definition as the default `linear` method of common array libraries.
/// Returns NaN for empty input.
///
/// # Examples
///
/// ```rust
/// use nof1_core::utils::percentile_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&data, 0.5), 2.5);
/// assert_eq!(percentile_sorted(&data, 0.0), 1.0);
/// assert_eq!(percentile_sorted(&data, 1.0), 4.0);
/// ```
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 1.0);
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    let lower = sorted[lower_idx];
    let upper = sorted[upper_idx];
    if fraction == 0.0 || lower == upper {
        lower
    } else {
        lower + fraction * (upper - lower)
    }
}

/// Percentile of unsorted data, see [`percentile_sorted`]
pub fn percentile(data: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted(data), p)
}
