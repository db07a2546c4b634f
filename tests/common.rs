// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, router, health data, and counting mock storage helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `health_oracle`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use chrono::{Days, NaiveDate, Utc};
use health_oracle::{
    config::environment::ServerConfig,
    database::{Database, PredictionStorage},
    errors::{AppError, AppResult},
    intelligence::{FixedChooser, TemplateChooser},
    models::{
        HealthDataInput, HealthRecord, HeartRateInput, MetricKind, NotificationEvent,
        PredictionSet, RecordId, SleepInput,
    },
    resources::ServerResources,
    server::build_router,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Server resources over an in-memory database with a fixed template choice
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::with_chooser(
        database,
        ServerConfig::default(),
        Arc::new(FixedChooser(0)),
    )))
}

/// Full application router over fresh test resources
pub async fn create_test_router() -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_resources().await?;
    Ok((build_router(Arc::clone(&resources)), resources))
}

/// Complete daily input with the given metric values
pub fn health_input(steps: f64, sleep_minutes: f64, heart_rate: f64) -> HealthDataInput {
    HealthDataInput {
        steps: Some(steps),
        hourly_steps: vec![],
        sleep: Some(SleepInput {
            duration_minutes: Some(sleep_minutes),
            quality: Some(75.0),
            ..SleepInput::default()
        }),
        heart_rate: Some(HeartRateInput {
            latest: Some(heart_rate),
            average: Some(heart_rate),
            ..HeartRateInput::default()
        }),
    }
}

/// Calendar date `days` before today (UTC)
pub fn days_ago(days: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .unwrap()
}

/// Store a health record for `days` days ago
pub async fn seed_health_record(
    database: &Database,
    user_id: &str,
    days: u64,
    steps: f64,
    sleep_minutes: f64,
    heart_rate: f64,
) -> AppResult<HealthRecord> {
    database
        .store_daily_health_data(
            user_id,
            days_ago(days),
            &health_input(steps, sleep_minutes, heart_rate),
        )
        .await
}

/// A `save_record` call captured by [`CountingStorage`]
#[derive(Debug, Clone)]
pub struct SavedRecord {
    pub id: RecordId,
    pub user_id: String,
    pub date: NaiveDate,
    pub predictions: PredictionSet,
}

/// In-memory storage double that counts every call
#[derive(Default)]
pub struct CountingStorage {
    history: HashMap<MetricKind, Vec<f64>>,
    fail_history: AtomicBool,
    pub history_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub append_calls: AtomicUsize,
    pub saved: Mutex<Vec<SavedRecord>>,
    pub history_dates: Mutex<Vec<NaiveDate>>,
    pub appended: Mutex<Vec<(RecordId, Vec<NotificationEvent>)>>,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that serves `values` as the history of `kind`
    #[must_use]
    pub fn with_history(mut self, kind: MetricKind, values: Vec<f64>) -> Self {
        self.history.insert(kind, values);
        self
    }

    /// Storage whose history reads fail as unavailable
    pub fn failing() -> Self {
        let storage = Self::default();
        storage.fail_history.store(true, Ordering::SeqCst);
        storage
    }

    /// Total number of storage calls of any kind
    pub fn total_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
            + self.save_calls.load(Ordering::SeqCst)
            + self.append_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionStorage for CountingStorage {
    async fn get_history(
        &self,
        _user_id: &str,
        kind: MetricKind,
        before: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<f64>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_dates.lock().unwrap().push(before);
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(AppError::storage_unavailable("history backend down"));
        }
        let values = self.history.get(&kind).cloned().unwrap_or_default();
        let skip = values.len().saturating_sub(days as usize);
        Ok(values.into_iter().skip(skip).collect())
    }

    async fn save_record(
        &self,
        user_id: &str,
        date: NaiveDate,
        predictions: &PredictionSet,
        _notifications: &[NotificationEvent],
    ) -> AppResult<RecordId> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let id = Uuid::new_v4();
        self.saved.lock().unwrap().push(SavedRecord {
            id,
            user_id: user_id.to_owned(),
            date,
            predictions: *predictions,
        });
        Ok(id)
    }

    async fn append_notifications(
        &self,
        record_id: RecordId,
        events: &[NotificationEvent],
    ) -> AppResult<()> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.appended
            .lock()
            .unwrap()
            .push((record_id, events.to_vec()));
        Ok(())
    }
}

/// Chooser that always picks the first template
pub fn first_template() -> Arc<dyn TemplateChooser> {
    Arc::new(FixedChooser(0))
}
