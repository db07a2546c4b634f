// ABOUTME: Short-horizon metric prediction blending a moving average with an endpoint trend
// ABOUTME: Derives daily goals from predictions using fixed per-metric multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle
#![allow(clippy::cast_precision_loss)] // Safe: history windows are at most a few hundred days

//! Prediction and goal derivation
//!
//! The trend term is an endpoint-slope heuristic, not a least-squares estimate:
//! it measures the change from the oldest historical point to today's value and
//! normalizes it by the number of historical samples. Goal thresholds are
//! calibrated against this particular estimator.

use oracle_core::models::{DailyObservation, MetricKind, MetricPrediction, PredictionSet};

/// Round to the nearest integer, with halves rounding towards positive infinity
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Predict the next value of a metric from its history and today's observation
///
/// With no history there is nothing to detrend against, so `current` is
/// returned unchanged. Otherwise the result is
/// `round(mean(history) + (current - history[0]) / history.len())`.
#[must_use]
pub fn predict_next(history: &[f64], current: f64) -> f64 {
    let Some(&oldest) = history.first() else {
        return current;
    };

    let count = history.len() as f64;
    let average = history.iter().sum::<f64>() / count;
    let trend = (current - oldest) / count;

    round_half_up(average + trend)
}

/// Derive the daily goal for a predicted value
#[must_use]
pub fn derive_goal(predicted: f64, kind: MetricKind) -> f64 {
    round_half_up(predicted * kind.goal_multiplier())
}

/// Predicted, actual, and goal values for one metric
#[must_use]
pub fn predict_metric(history: &[f64], current: f64, kind: MetricKind) -> MetricPrediction {
    let predicted = predict_next(history, current);
    MetricPrediction {
        predicted,
        actual: current,
        goal: derive_goal(predicted, kind),
    }
}

/// Prediction triplets for all metrics
///
/// `history` supplies the chronological history of each metric; return an
/// empty slice for a history-free prediction.
#[must_use]
pub fn predict_set<'a>(
    observation: &DailyObservation,
    mut history: impl FnMut(MetricKind) -> &'a [f64],
) -> PredictionSet {
    PredictionSet::from_fn(|kind| predict_metric(history(kind), observation.value(kind), kind))
}
