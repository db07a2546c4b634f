// ABOUTME: Daily averaging and least-squares trend lines for health metric history
// ABOUTME: Degenerate inputs return a flagged flat line instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle
#![allow(clippy::cast_precision_loss)] // Safe: statistical calculations with controlled ranges

//! Trend summaries for display
//!
//! Observations are grouped by UTC calendar date and averaged per day. The
//! daily points are kept in ascending date order (an ordered map, never hash
//! iteration order) and fitted with ordinary least squares over their 0-based
//! position in that sequence.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One timestamped observation of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    /// When the value was observed
    pub date: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

/// Average of all observations on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    /// Calendar day (UTC)
    pub date: NaiveDate,
    /// Mean of that day's observations
    pub average: f64,
}

/// Least-squares line over `(index, daily average)` points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    /// Change per day
    pub slope: f64,
    /// Value at index 0
    pub intercept: f64,
    /// Number of daily points fitted
    pub sample_size: usize,
    /// Fewer than two usable points; the line is flat at their mean
    pub insufficient_data: bool,
}

impl TrendLine {
    /// Evaluate the line at position `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    fn flat(values: &[f64]) -> Self {
        let intercept = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        Self {
            slope: 0.0,
            intercept,
            sample_size: values.len(),
            insufficient_data: true,
        }
    }
}

/// Daily averages plus their fitted trend line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Daily averages, oldest first
    pub daily: Vec<DailyAverage>,
    /// Linear fit over the daily averages
    pub trend: TrendLine,
}

/// Minimum, maximum, and mean of a set of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricAverages {
    /// Arithmetic mean
    pub average: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

/// Group observations by calendar date and average each day
///
/// Non-finite values are ignored. The result is in ascending date order.
#[must_use]
pub fn daily_averages(series: &[DatedValue]) -> Vec<DailyAverage> {
    let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for point in series.iter().filter(|p| p.value.is_finite()) {
        let entry = groups.entry(point.date.date_naive()).or_insert((0.0, 0));
        entry.0 += point.value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(date, (sum, count))| DailyAverage {
            date,
            average: sum / count as f64,
        })
        .collect()
}

/// Fit `y = slope * index + intercept` by ordinary least squares
///
/// With fewer than two points, or a zero denominator, the fit degrades to a
/// flat line at the mean of the available values and is flagged
/// `insufficient_data`.
#[must_use]
pub fn fit_trend_line(values: &[f64]) -> TrendLine {
    if values.len() < 2 {
        return TrendLine::flat(values);
    }

    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| i as f64 * y)
        .sum();
    let sum_xx: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();

    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    if denominator.abs() < f64::EPSILON {
        return TrendLine::flat(values);
    }

    let slope = n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator;
    let intercept = slope.mul_add(-sum_x, sum_y) / n;

    TrendLine {
        slope,
        intercept,
        sample_size: values.len(),
        insufficient_data: false,
    }
}

/// Daily averages and trend line for a dated series
#[must_use]
pub fn summarize_trend(series: &[DatedValue]) -> TrendSummary {
    let daily = daily_averages(series);
    let averages: Vec<f64> = daily.iter().map(|d| d.average).collect();
    let trend = fit_trend_line(&averages);

    TrendSummary { daily, trend }
}

/// Mean, minimum, and maximum of the finite values, `None` when there are none
#[must_use]
pub fn metric_averages(values: &[f64]) -> Option<MetricAverages> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let sum: f64 = finite.iter().sum();
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(MetricAverages {
        average: sum / finite.len() as f64,
        min,
        max,
    })
}
