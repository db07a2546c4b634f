// ABOUTME: Core data models for metrics, predictions, notifications, and health records
// ABOUTME: Shared by the intelligence engine, the storage layer, and the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Core data models
//!
//! All entities are scoped to a single user identifier. Nothing here holds
//! cross-user state.

/// Metric kinds and per-metric prediction triplets
pub mod metric;

/// Goal notifications
pub mod notification;

/// Prediction records, bundles, and the self/other subject variant
pub mod prediction;

/// Daily health data input and stored health records
pub mod health;

/// Scheduled medicine doses
pub mod medicine;

pub use health::{
    DailyObservation, HealthDataInput, HealthRecord, HeartRateInput, HeartRateReading,
    HeartRateSummary, SleepInput, SleepSummary, StepsSummary,
};
pub use medicine::{MedicineEntry, MedicineInput};
pub use metric::{MetricKind, MetricPrediction, PredictionSet};
pub use notification::NotificationEvent;
pub use prediction::{PredictionBundle, PredictionRecord, RecordId, Subject};
