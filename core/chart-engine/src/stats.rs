//! FILENAME: core/chart-engine/src/stats.rs
//! PURPOSE: Descriptive statistics used by the distributional and advanced views.
//! CONTEXT: Inputs are already checked to be finite. Undefined results
//! (empty input, zero variance) come back as `None`, never NaN.

use serde::{Deserialize, Serialize};
use crate::aggregate::AggregateAccumulator;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Pearson correlation coefficient of two paired series.
/// Undefined when fewer than two pairs or either series is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let mean_x = mean(&x[..n])?;
    let mean_y = mean(&y[..n])?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Ordinary least squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits an OLS line. Undefined when fewer than two points or x is constant.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<TrendLine> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let mean_x = mean(&x[..n])?;
    let mean_y = mean(&y[..n])?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        sxy += dx * (y[i] - mean_y);
        sxx += dx * dx;
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// One histogram bar. `end` is exclusive except on the last bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Equal-width binning over [min, max]. A constant series gets a single
/// bin of width 1 starting at the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let mut acc = AggregateAccumulator::new();
    for &v in values {
        acc.add_number(v);
    }

    let (min, max) = match (acc.min, acc.max) {
        (Some(min), Some(max)) if bins > 0 => (min, max),
        _ => return Vec::new(),
    };

    if max == min {
        return vec![HistogramBin {
            start: min,
            end: min + 1.0,
            count: acc.count,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }

    result
}

/// Rounds to `places` decimals, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
