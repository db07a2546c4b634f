// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Goal multipliers, window sizes, service names, and notification templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single flat list.

/// Notification message templates per metric kind
pub mod templates;

/// Goal offsets applied to a predicted value
///
/// Downstream notification thresholds are calibrated against these exact
/// values together with the endpoint-slope prediction heuristic.
pub mod goals {
    /// Steps goal: 10% above prediction
    pub const STEPS_GOAL_MULTIPLIER: f64 = 1.10;
    /// Sleep goal: 5% above prediction
    pub const SLEEP_GOAL_MULTIPLIER: f64 = 1.05;
    /// Heart rate goal: 5% below prediction
    pub const HEART_RATE_GOAL_MULTIPLIER: f64 = 0.95;
}

/// History and reporting windows, in days
pub mod windows {
    /// Days of history used to personalize a prediction
    pub const DEFAULT_PREDICTION_HISTORY_DAYS: u32 = 7;
    /// Upper bound for the prediction history window
    pub const MAX_PREDICTION_HISTORY_DAYS: u32 = 90;
    /// Days of history summarized by the trend endpoint
    pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 30;
    /// Days of history summarized by the averages endpoint
    pub const DEFAULT_AVERAGES_WINDOW_DAYS: u32 = 7;
    /// Upper bound for trend and averages windows
    pub const MAX_REPORT_WINDOW_DAYS: u32 = 365;
}

/// Listing limits
pub mod limits {
    /// Prediction records returned by the history listing
    pub const PREDICTION_HISTORY_LIMIT: u32 = 7;
    /// Recent records scanned for unread notifications
    pub const UNREAD_NOTIFICATION_RECORD_LIMIT: u32 = 10;
    /// Minutes per hour, used to express sleep gaps in hours
    pub const MINUTES_PER_HOUR: f64 = 60.0;
    /// Upper bound on the sleep quality score
    pub const MAX_SLEEP_QUALITY: f64 = 100.0;
    /// Longest accepted medicine name or dosage text
    pub const MAX_MEDICINE_TEXT_LEN: usize = 200;
}

/// Service identity
pub mod service_names {
    /// Name reported in logs and health checks
    pub const HEALTH_ORACLE_SERVER: &str = "health-oracle-server";
}

/// HTTP header names
pub mod headers {
    /// Caller identity header set by the upstream authentication gateway
    pub const USER_ID: &str = "x-user-id";
}
