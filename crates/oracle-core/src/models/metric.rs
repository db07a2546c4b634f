// ABOUTME: Metric kind enumeration and the predicted/actual/goal triplet per metric
// ABOUTME: Wire names are steps, sleep, and heartRate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use crate::constants::goals::{
    HEART_RATE_GOAL_MULTIPLIER, SLEEP_GOAL_MULTIPLIER, STEPS_GOAL_MULTIPLIER,
};
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Daily health metric tracked by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    /// Step count
    Steps,
    /// Sleep duration in minutes
    Sleep,
    /// Heart rate in beats per minute
    HeartRate,
}

impl MetricKind {
    /// All metric kinds in canonical order
    pub const ALL: [Self; 3] = [Self::Steps, Self::Sleep, Self::HeartRate];

    /// Wire name of this metric
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Sleep => "sleep",
            Self::HeartRate => "heartRate",
        }
    }

    /// Multiplier turning a predicted value into a goal
    #[must_use]
    pub const fn goal_multiplier(self) -> f64 {
        match self {
            Self::Steps => STEPS_GOAL_MULTIPLIER,
            Self::Sleep => SLEEP_GOAL_MULTIPLIER,
            Self::HeartRate => HEART_RATE_GOAL_MULTIPLIER,
        }
    }

    /// Whether exceeding the goal is the undesirable direction
    #[must_use]
    pub const fn lower_is_better(self) -> bool {
        matches!(self, Self::HeartRate)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" => Ok(Self::Steps),
            "sleep" => Ok(Self::Sleep),
            "heartRate" => Ok(Self::HeartRate),
            other => Err(AppError::invalid_input(format!(
                "Unknown metric kind: {other}"
            ))),
        }
    }
}

/// Predicted, observed, and goal values for one metric on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPrediction {
    /// Value predicted from history and today's observation
    pub predicted: f64,
    /// Value observed today
    pub actual: f64,
    /// Target derived from the prediction
    pub goal: f64,
}

/// Prediction triplets for all three metrics
///
/// The struct has exactly one field per `MetricKind`, so a prediction set with
/// a missing metric cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSet {
    /// Steps triplet
    pub steps: MetricPrediction,
    /// Sleep triplet (minutes)
    pub sleep: MetricPrediction,
    /// Heart rate triplet (bpm)
    pub heart_rate: MetricPrediction,
}

impl PredictionSet {
    /// Build a set by evaluating `f` for each metric kind
    pub fn from_fn(mut f: impl FnMut(MetricKind) -> MetricPrediction) -> Self {
        Self {
            steps: f(MetricKind::Steps),
            sleep: f(MetricKind::Sleep),
            heart_rate: f(MetricKind::HeartRate),
        }
    }

    /// Fallible variant of [`PredictionSet::from_fn`]
    pub fn try_from_fn<E>(
        mut f: impl FnMut(MetricKind) -> Result<MetricPrediction, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            steps: f(MetricKind::Steps)?,
            sleep: f(MetricKind::Sleep)?,
            heart_rate: f(MetricKind::HeartRate)?,
        })
    }

    /// Triplet for the given metric
    #[must_use]
    pub const fn get(&self, kind: MetricKind) -> &MetricPrediction {
        match kind {
            MetricKind::Steps => &self.steps,
            MetricKind::Sleep => &self.sleep,
            MetricKind::HeartRate => &self.heart_rate,
        }
    }
}
