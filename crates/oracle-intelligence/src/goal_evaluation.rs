// ABOUTME: Compares actual values against derived goals and emits motivational notifications
// ABOUTME: Steps and sleep notify on underperformance, heart rate notifies on overshoot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle
#![allow(clippy::cast_possible_truncation)] // Safe: gaps are bounded daily quantities

use crate::template_chooser::TemplateChooser;
use chrono::{DateTime, Utc};
use oracle_core::constants::limits::MINUTES_PER_HOUR;
use oracle_core::constants::templates::{
    GAP_PLACEHOLDER, HEART_RATE_TEMPLATES, SLEEP_TEMPLATES, STEPS_TEMPLATES,
};
use oracle_core::models::{MetricKind, MetricPrediction, NotificationEvent, PredictionSet};
use tracing::debug;

/// Whether the actual value missed the goal in the undesirable direction
#[must_use]
pub fn goal_missed(kind: MetricKind, prediction: &MetricPrediction) -> bool {
    if kind.lower_is_better() {
        prediction.actual > prediction.goal
    } else {
        prediction.actual < prediction.goal
    }
}

const fn templates_for(kind: MetricKind) -> &'static [&'static str; 3] {
    match kind {
        MetricKind::Steps => &STEPS_TEMPLATES,
        MetricKind::Sleep => &SLEEP_TEMPLATES,
        MetricKind::HeartRate => &HEART_RATE_TEMPLATES,
    }
}

/// Render a motivational message for a missed goal
///
/// Steps messages show the remaining steps exactly as computed, fractions
/// included; sleep messages show the remaining sleep in whole hours,
/// truncated (45 missing minutes reads as 0 hours).
#[must_use]
pub fn motivational_message(
    kind: MetricKind,
    prediction: &MetricPrediction,
    chooser: &dyn TemplateChooser,
) -> String {
    let templates = templates_for(kind);
    let index = chooser.choose(templates.len()).min(templates.len() - 1);
    let template = templates[index];

    let gap = prediction.goal - prediction.actual;
    match kind {
        MetricKind::Steps => template.replace(GAP_PLACEHOLDER, &gap.to_string()),
        MetricKind::Sleep => {
            let hours = (gap / MINUTES_PER_HOUR).trunc() as i64;
            template.replace(GAP_PLACEHOLDER, &hours.to_string())
        }
        MetricKind::HeartRate => template.to_owned(),
    }
}

/// Emit one notification per metric whose goal was missed
///
/// Events are produced in canonical metric order (steps, sleep, heart rate),
/// all stamped with `now` and unread.
#[must_use]
pub fn evaluate_goals(
    predictions: &PredictionSet,
    now: DateTime<Utc>,
    chooser: &dyn TemplateChooser,
) -> Vec<NotificationEvent> {
    let events: Vec<NotificationEvent> = MetricKind::ALL
        .into_iter()
        .filter(|&kind| goal_missed(kind, predictions.get(kind)))
        .map(|kind| {
            let message = motivational_message(kind, predictions.get(kind), chooser);
            NotificationEvent::new(kind, message, now)
        })
        .collect();

    debug!(
        notifications = events.len(),
        "Evaluated daily goals against actual values"
    );
    events
}
