//! Chart-side helpers over generated series.

use crate::{generator::TimeSeriesPoint, types::Period};
use std::collections::HashMap;

/// Compound annual growth rate as a fraction. Non-positive inputs give 0.
pub fn cagr(start_value: f64, end_value: f64, years: f64) -> f64 {
    if start_value <= 0.0 || end_value <= 0.0 || years <= 0.0 {
        0.0
    } else {
        (end_value / start_value).powf(1.0 / years) - 1.0
    }
}

/// Year-over-year percent change of `dimension` for every point that has a
/// counterpart exactly one year earlier.
pub fn year_over_year(points: &[TimeSeriesPoint], dimension: &str) -> Vec<(Period, f64)> {
    let by_period: HashMap<Period, f64> = points
        .iter()
        .filter_map(|p| p.value(dimension).map(|v| (p.period, v)))
        .collect();

    points
        .iter()
        .filter_map(|p| {
            let current = p.value(dimension)?;
            let prior = *by_period.get(&p.period.prior_year())?;
            if prior <= 0.0 {
                return None;
            }
            Some((p.period, (current / prior - 1.0) * 100.0))
        })
        .collect()
}

/// Most recent value of `dimension`.
pub fn latest(points: &[TimeSeriesPoint], dimension: &str) -> Option<(Period, f64)> {
    points
        .iter()
        .rev()
        .find_map(|p| p.value(dimension).map(|v| (p.period, v)))
}
