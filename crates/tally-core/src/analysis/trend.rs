//! Trend detection and spending forecasts
//!
//! All functions operate on ordered numeric series (typically chronological
//! monthly totals). Short series degrade to documented fallback values
//! rather than erroring.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::types::{ForecastResult, TrendDirection};
use super::{round2, round4};

/// Default smoothing window for monthly series
pub const DEFAULT_WINDOW: usize = 3;
/// Default number of periods a forecast projects ahead
pub const DEFAULT_PERIODS_AHEAD: u32 = 3;

/// Absolute slope beyond which a series counts as trending
///
/// On the same scale as the input values; must stay at 0.05 for
/// compatibility with downstream consumers.
const SLOPE_THRESHOLD: f64 = 0.05;
/// z-multiplier for the approximate 95% confidence interval
const CONFIDENCE_Z: f64 = 1.96;
/// History required before seasonal factors are meaningful
const SEASONAL_MIN_MONTHS: usize = 12;

/// Least-squares slope and intercept of `values` against indices `0..n`
///
/// Returns slope 0 on a zero denominator (a single point).
fn ols_fit(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let x_mean = (values.len() as f64 - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };

    (slope, y_mean - slope * x_mean)
}

/// Sliding-window arithmetic means in original order
///
/// A series shorter than the window is returned unchanged (degenerate case,
/// not an error). A zero window is a programming error.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidWindow);
    }
    if values.len() < window {
        return Ok(values.to_vec());
    }

    Ok(values
        .windows(window)
        .map(|slice| slice.iter().sum::<f64>() / window as f64)
        .collect())
}

/// Classify a series as increasing, decreasing, or stable from its
/// regression slope
pub fn trend_direction(values: &[f64]) -> TrendDirection {
    if values.len() < 2 {
        return TrendDirection::InsufficientData;
    }

    let (slope, _) = ols_fit(values);

    if slope > SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Linear-regression forecast `periods_ahead` past the end of the series
///
/// Fewer than 3 points: the forecast is the last observed value (0 when
/// empty) with a `(0, 0)` interval. Otherwise the OLS line is evaluated at
/// `x = n + periods_ahead - 1`, with an interval of 1.96 residual standard
/// errors; the reported point and the interval's lower bound are clamped
/// to zero since spending cannot be negative.
pub fn forecast(historical: &[f64], periods_ahead: u32) -> ForecastResult {
    if historical.len() < 3 {
        return ForecastResult {
            forecast: historical.last().copied().unwrap_or(0.0),
            confidence_interval: (0.0, 0.0),
            trend: TrendDirection::InsufficientData,
            slope: 0.0,
        };
    }

    let n = historical.len();
    let (slope, intercept) = ols_fit(historical);

    let forecast_x = (n + periods_ahead as usize - 1) as f64;
    let point = slope * forecast_x + intercept;

    // Residual mean-square error with n - 2 degrees of freedom.
    let mse = if n > 2 {
        historical
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let residual = y - (slope * i as f64 + intercept);
                residual * residual
            })
            .sum::<f64>()
            / (n - 2) as f64
    } else {
        0.0
    };
    let margin = CONFIDENCE_Z * mse.sqrt();

    ForecastResult {
        forecast: round2(point.max(0.0)),
        confidence_interval: (round2((point - margin).max(0.0)), round2(point + margin)),
        trend: trend_direction(historical),
        slope: round4(slope),
    }
}

/// Spending factor per month relative to the overall monthly mean
///
/// With fewer than a full year of history every factor is 1.0, as is every
/// factor when the mean is not positive.
pub fn seasonal_factors(monthly_totals: &[(String, f64)]) -> BTreeMap<String, f64> {
    if monthly_totals.len() < SEASONAL_MIN_MONTHS {
        return monthly_totals
            .iter()
            .map(|(month, _)| (month.clone(), 1.0))
            .collect();
    }

    let mean =
        monthly_totals.iter().map(|(_, amount)| amount).sum::<f64>() / monthly_totals.len() as f64;

    monthly_totals
        .iter()
        .map(|(month, amount)| {
            let factor = if mean > 0.0 { amount / mean } else { 1.0 };
            (month.clone(), factor)
        })
        .collect()
}
