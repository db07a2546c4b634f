// ABOUTME: Prediction workflow: history-free predictions for others, persisted ones for self
// ABOUTME: Validates input, reads history, saves the daily record, and attaches goal notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use crate::constants::windows::DEFAULT_PREDICTION_HISTORY_DAYS;
use crate::database::PredictionStorage;
use crate::errors::AppResult;
use crate::intelligence::{evaluate_goals, predict_set, TemplateChooser, ThreadRngChooser};
use crate::models::{HealthDataInput, MetricKind, PredictionBundle, Subject};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Runs predictions against a storage backend
pub struct PredictionService<S: PredictionStorage + ?Sized> {
    storage: Arc<S>,
    chooser: Arc<dyn TemplateChooser>,
    history_window_days: u32,
}

impl<S: PredictionStorage + ?Sized> Clone for PredictionService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            chooser: Arc::clone(&self.chooser),
            history_window_days: self.history_window_days,
        }
    }
}

impl<S: PredictionStorage + ?Sized> PredictionService<S> {
    /// Service with random message templates and the default history window
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            chooser: Arc::new(ThreadRngChooser),
            history_window_days: DEFAULT_PREDICTION_HISTORY_DAYS,
        }
    }

    /// Replace the template chooser
    #[must_use]
    pub fn with_chooser(mut self, chooser: Arc<dyn TemplateChooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Replace the number of history days read per metric
    #[must_use]
    pub const fn with_history_window(mut self, days: u32) -> Self {
        self.history_window_days = days;
        self
    }

    /// Days of history read per metric
    #[must_use]
    pub const fn history_window_days(&self) -> u32 {
        self.history_window_days
    }

    /// Predict for either subject
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete input, or a storage error
    /// from the self flow
    pub async fn generate_prediction(
        &self,
        subject: Subject,
        input: &HealthDataInput,
    ) -> AppResult<PredictionBundle> {
        match subject {
            Subject::Own { user_id } => self.predict_for_self(&user_id, input).await,
            Subject::Other => Self::predict_for_other(input),
        }
    }

    /// History-free prediction that never touches storage
    ///
    /// # Errors
    ///
    /// Returns a validation error when a metric is missing or invalid
    pub fn predict_for_other(input: &HealthDataInput) -> AppResult<PredictionBundle> {
        let observation = input.observation()?;
        let predictions = predict_set(&observation, |_| &[][..]);

        debug!("Computed anonymous prediction");
        Ok(PredictionBundle::ephemeral(predictions))
    }

    /// Personalized prediction for the user, persisted as today's record
    ///
    /// # Errors
    ///
    /// Returns a validation error before any storage call when the input is
    /// invalid, and `StorageUnavailable` when history cannot be read or the
    /// record cannot be written
    pub async fn predict_for_self(
        &self,
        user_id: &str,
        input: &HealthDataInput,
    ) -> AppResult<PredictionBundle> {
        self.predict_for_self_at(user_id, input, Utc::now()).await
    }

    /// Self prediction as of `now`; the record is stored under `now`'s UTC date
    ///
    /// # Errors
    ///
    /// Same as [`PredictionService::predict_for_self`]
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn predict_for_self_at(
        &self,
        user_id: &str,
        input: &HealthDataInput,
        now: DateTime<Utc>,
    ) -> AppResult<PredictionBundle> {
        let observation = input.observation()?;

        let today = now.date_naive();
        let days = self.history_window_days;
        let (steps, sleep, heart_rate) = tokio::try_join!(
            self.storage.get_history(user_id, MetricKind::Steps, today, days),
            self.storage.get_history(user_id, MetricKind::Sleep, today, days),
            self.storage.get_history(user_id, MetricKind::HeartRate, today, days),
        )?;
        debug!(
            steps = steps.len(),
            sleep = sleep.len(),
            heart_rate = heart_rate.len(),
            "Loaded metric history"
        );

        let predictions = predict_set(&observation, |kind| match kind {
            MetricKind::Steps => &steps[..],
            MetricKind::Sleep => &sleep[..],
            MetricKind::HeartRate => &heart_rate[..],
        });

        let record_id = self
            .storage
            .save_record(user_id, today, &predictions, &[])
            .await?;

        let notifications = evaluate_goals(&predictions, now, self.chooser.as_ref());
        if !notifications.is_empty() {
            self.storage
                .append_notifications(record_id, &notifications)
                .await?;
        }

        info!(
            record.id = %record_id,
            notifications = notifications.len(),
            "Generated personalized prediction"
        );

        Ok(PredictionBundle {
            predictions,
            notifications,
            record_id: Some(record_id),
            date: Some(today),
        })
    }
}
