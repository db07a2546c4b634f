// ABOUTME: Persisted prediction records and the caller-facing prediction bundle
// ABOUTME: Subject distinguishes personalized (own) from anonymous (other) predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::{NotificationEvent, PredictionSet};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a stored prediction record
pub type RecordId = Uuid;

/// Who a prediction is computed for
///
/// Only `Own` predictions read history and are persisted. `Other` predictions
/// are computed from today's data alone and never touch storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The authenticated user's own data
    Own {
        /// Owner of the history and of the persisted record
        user_id: String,
    },
    /// Someone else's data, predicted anonymously
    Other,
}

/// A user's stored prediction for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// Record identifier
    pub id: RecordId,
    /// Owning user
    pub user_id: String,
    /// Calendar day (UTC) the prediction applies to
    pub date: NaiveDate,
    /// Triplets for all metrics
    pub predictions: PredictionSet,
    /// Notifications attached to this day
    pub notifications: Vec<NotificationEvent>,
    /// First time the record was written
    pub created_at: DateTime<Utc>,
    /// Last time the predictions were rewritten
    pub updated_at: DateTime<Utc>,
}

/// Result of a prediction request, as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBundle {
    /// Triplets for all metrics
    pub predictions: PredictionSet,
    /// Events produced by goal evaluation (own predictions only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<NotificationEvent>,
    /// Persisted record (own predictions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
    /// Day the record was stored under (own predictions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl PredictionBundle {
    /// Bundle for an anonymous prediction: no record, no notifications
    #[must_use]
    pub const fn ephemeral(predictions: PredictionSet) -> Self {
        Self {
            predictions,
            notifications: Vec::new(),
            record_id: None,
            date: None,
        }
    }
}
