// ABOUTME: Goal notification events attached to a user's daily prediction record
// ABOUTME: Events are created unread and only ever flipped to read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::MetricKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Motivational notification emitted when a goal is missed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    /// Unique identifier, used to mark the event as read
    pub id: Uuid,
    /// Metric that missed its goal
    #[serde(rename = "type")]
    pub kind: MetricKind,
    /// Rendered message text
    pub message: String,
    /// When the event was created
    pub timestamp: DateTime<Utc>,
    /// Whether the user has read the event
    pub is_read: bool,
}

impl NotificationEvent {
    /// Create a new unread event
    #[must_use]
    pub fn new(kind: MetricKind, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            timestamp,
            is_read: false,
        }
    }
}
