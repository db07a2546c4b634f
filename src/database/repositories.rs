// ABOUTME: Storage boundary used by the prediction workflow
// ABOUTME: Async trait implemented by the SQLite database and by test doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::Database;
use crate::errors::AppResult;
use crate::models::{MetricKind, NotificationEvent, PredictionSet, RecordId};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Reads metric history and persists prediction records for the self flow
#[async_trait]
pub trait PredictionStorage: Send + Sync {
    /// Up to `days` daily values of `kind` dated before `before`, oldest first
    async fn get_history(
        &self,
        user_id: &str,
        kind: MetricKind,
        before: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<f64>>;

    /// Write the day's prediction record, replacing earlier predictions for the same day
    async fn save_record(
        &self,
        user_id: &str,
        date: NaiveDate,
        predictions: &PredictionSet,
        notifications: &[NotificationEvent],
    ) -> AppResult<RecordId>;

    /// Attach events to a stored record
    async fn append_notifications(
        &self,
        record_id: RecordId,
        events: &[NotificationEvent],
    ) -> AppResult<()>;
}

#[async_trait]
impl PredictionStorage for Database {
    async fn get_history(
        &self,
        user_id: &str,
        kind: MetricKind,
        before: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<f64>> {
        self.metric_history(user_id, kind, before, days).await
    }

    async fn save_record(
        &self,
        user_id: &str,
        date: NaiveDate,
        predictions: &PredictionSet,
        notifications: &[NotificationEvent],
    ) -> AppResult<RecordId> {
        self.upsert_prediction_record(user_id, date, predictions, notifications)
            .await
    }

    async fn append_notifications(
        &self,
        record_id: RecordId,
        events: &[NotificationEvent],
    ) -> AppResult<()> {
        self.append_record_notifications(record_id, events).await
    }
}
