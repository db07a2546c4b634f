// ABOUTME: Health metric trend and prediction engine
// ABOUTME: Moving-average-plus-trend prediction, goal derivation, goal evaluation, and trend lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

#![deny(unsafe_code)]

//! # Oracle Intelligence
//!
//! The engine is a stateless function of its inputs:
//!
//! ```text
//! history + today ──► predict_next ──► derive_goal ──► evaluate_goals ──► notifications
//! dated series ─────► summarize_trend (daily averages + least-squares line)
//! ```
//!
//! Nothing in this crate performs I/O. Random message selection goes through
//! the [`TemplateChooser`] trait so callers decide where randomness comes from.

/// Short-horizon prediction and goal derivation
pub mod prediction;

/// Goal comparison and notification rendering
pub mod goal_evaluation;

/// Daily averaging, linear regression, and summary statistics
pub mod statistical_analysis;

/// Random source abstraction for notification templates
pub mod template_chooser;

pub use goal_evaluation::{evaluate_goals, goal_missed, motivational_message};
pub use prediction::{derive_goal, predict_metric, predict_next, predict_set, round_half_up};
pub use statistical_analysis::{
    daily_averages, fit_trend_line, metric_averages, summarize_trend, DailyAverage, DatedValue,
    MetricAverages, TrendLine, TrendSummary,
};
pub use template_chooser::{FixedChooser, SeededChooser, TemplateChooser, ThreadRngChooser};
