// ABOUTME: Daily health data input from the device bridge and the stored per-day health record
// ABOUTME: Validates raw input into finite observations before any computation or storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::MetricKind;
use crate::constants::limits::MAX_SLEEP_QUALITY;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single heart rate sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateReading {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
    /// Beats per minute
    pub bpm: f64,
}

/// Sleep section of the daily input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepInput {
    /// Total sleep in minutes
    pub duration_minutes: Option<f64>,
    /// Sleep quality score (0-100)
    pub quality: Option<f64>,
    /// Sleep start
    pub start_time: Option<DateTime<Utc>>,
    /// Sleep end
    pub end_time: Option<DateTime<Utc>>,
}

/// Heart rate section of the daily input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateInput {
    /// Most recent reading
    pub latest: Option<f64>,
    /// Daily average
    pub average: Option<f64>,
    /// Daily minimum
    pub min: Option<f64>,
    /// Daily maximum
    pub max: Option<f64>,
    /// Individual samples
    #[serde(default)]
    pub readings: Vec<HeartRateReading>,
}

/// Today's health data as delivered by the device bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDataInput {
    /// Step count so far today
    pub steps: Option<f64>,
    /// Steps per hour
    #[serde(default)]
    pub hourly_steps: Vec<f64>,
    /// Sleep data
    pub sleep: Option<SleepInput>,
    /// Heart rate data
    pub heart_rate: Option<HeartRateInput>,
}

/// Validated current values for each metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyObservation {
    /// Step count
    pub steps: f64,
    /// Sleep minutes
    pub sleep_minutes: f64,
    /// Heart rate (bpm)
    pub heart_rate: f64,
}

impl DailyObservation {
    /// Observed value for the given metric
    #[must_use]
    pub const fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Steps => self.steps,
            MetricKind::Sleep => self.sleep_minutes,
            MetricKind::HeartRate => self.heart_rate,
        }
    }
}

fn require_measurement(value: Option<f64>, field: &str) -> AppResult<f64> {
    let value = value.ok_or_else(|| AppError::missing_field(field))?;
    check_measurement(value, field)
}

fn check_measurement(value: f64, field: &str) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::invalid_input(format!("{field} must be a finite number"))
            .with_details(serde_json::json!({ "field": field })));
    }
    if value < 0.0 {
        return Err(AppError::out_of_range(field, "must not be negative"));
    }
    Ok(value)
}

fn optional_measurement(value: Option<f64>, field: &str) -> AppResult<Option<f64>> {
    value.map(|v| check_measurement(v, field)).transpose()
}

impl HealthDataInput {
    /// Validate the input and extract the current value of every metric
    ///
    /// The heart rate observation is the latest reading, falling back to the
    /// daily average when no latest reading was delivered.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when a metric is absent and
    /// `InvalidInput`/`ValueOutOfRange` when a value is not a finite,
    /// non-negative number.
    pub fn observation(&self) -> AppResult<DailyObservation> {
        let steps = require_measurement(self.steps, "healthData.steps")?;
        let sleep_minutes = require_measurement(
            self.sleep.as_ref().and_then(|s| s.duration_minutes),
            "healthData.sleep.durationMinutes",
        )?;
        let heart_rate = require_measurement(
            self.heart_rate
                .as_ref()
                .and_then(|hr| hr.latest.or(hr.average)),
            "healthData.heartRate.latest",
        )?;

        Ok(DailyObservation {
            steps,
            sleep_minutes,
            heart_rate,
        })
    }
}

/// Stored step data for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsSummary {
    /// Total steps
    pub count: f64,
    /// Steps per hour
    pub hourly_breakdown: Vec<f64>,
}

/// Stored sleep data for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
    /// Total sleep in minutes
    pub duration_minutes: f64,
    /// Quality score (0-100)
    pub quality: f64,
    /// Sleep start
    pub start_time: Option<DateTime<Utc>>,
    /// Sleep end
    pub end_time: Option<DateTime<Utc>>,
}

/// Stored heart rate data for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSummary {
    /// Daily average
    pub average: Option<f64>,
    /// Daily minimum
    pub min: Option<f64>,
    /// Daily maximum
    pub max: Option<f64>,
    /// Individual samples
    pub readings: Vec<HeartRateReading>,
}

/// A user's raw health data for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Calendar day (UTC)
    pub date: NaiveDate,
    /// Step data
    pub steps: StepsSummary,
    /// Sleep data
    pub sleep: SleepSummary,
    /// Heart rate data
    pub heart_rate: HeartRateSummary,
    /// First write
    pub created_at: DateTime<Utc>,
    /// Last write
    pub updated_at: DateTime<Utc>,
}

impl HealthRecord {
    /// Build a daily record from validated input
    ///
    /// # Errors
    ///
    /// Returns a validation error when steps or sleep duration is missing, a
    /// value is negative or non-finite, or sleep quality exceeds 100.
    pub fn from_input(
        user_id: impl Into<String>,
        date: NaiveDate,
        input: &HealthDataInput,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let steps = require_measurement(input.steps, "healthData.steps")?;
        for (hour, value) in input.hourly_steps.iter().enumerate() {
            check_measurement(*value, &format!("healthData.hourlySteps[{hour}]"))?;
        }

        let sleep = input.sleep.clone().unwrap_or_default();
        let duration_minutes =
            require_measurement(sleep.duration_minutes, "healthData.sleep.durationMinutes")?;
        let quality = optional_measurement(sleep.quality, "healthData.sleep.quality")?.unwrap_or(0.0);
        if quality > MAX_SLEEP_QUALITY {
            return Err(AppError::out_of_range(
                "healthData.sleep.quality",
                "must be between 0 and 100",
            ));
        }

        let heart_rate = input.heart_rate.clone().unwrap_or_default();
        let average = optional_measurement(
            heart_rate.average.or(heart_rate.latest),
            "healthData.heartRate.average",
        )?;
        let min = optional_measurement(heart_rate.min, "healthData.heartRate.min")?;
        let max = optional_measurement(heart_rate.max, "healthData.heartRate.max")?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            date,
            steps: StepsSummary {
                count: steps,
                hourly_breakdown: input.hourly_steps.clone(),
            },
            sleep: SleepSummary {
                duration_minutes,
                quality,
                start_time: sleep.start_time,
                end_time: sleep.end_time,
            },
            heart_rate: HeartRateSummary {
                average,
                min,
                max,
                readings: heart_rate.readings,
            },
            created_at: now,
            updated_at: now,
        })
    }

    /// The value of a metric used for history and trends
    #[must_use]
    pub const fn metric_value(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Steps => Some(self.steps.count),
            MetricKind::Sleep => Some(self.sleep.duration_minutes),
            MetricKind::HeartRate => self.heart_rate.average,
        }
    }
}
