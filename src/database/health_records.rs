// ABOUTME: Daily health record storage: one row per user per calendar day
// ABOUTME: Upserts raw health data and serves metric history and report windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::{
    format_date, parse_date, parse_optional_timestamp, parse_timestamp, parse_uuid, Database,
};
use crate::errors::{AppError, AppResult};
use crate::models::{
    HealthDataInput, HealthRecord, HeartRateReading, HeartRateSummary, MetricKind, SleepSummary,
    StepsSummary,
};
use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

/// Column holding the history value of each metric
const fn metric_column(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Steps => "steps_count",
        MetricKind::Sleep => "sleep_duration_minutes",
        MetricKind::HeartRate => "heart_rate_average",
    }
}

impl Database {
    pub(super) async fn migrate_health_records(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_records (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                steps_count REAL NOT NULL,
                hourly_steps TEXT NOT NULL DEFAULT '[]',
                sleep_duration_minutes REAL NOT NULL,
                sleep_quality REAL NOT NULL DEFAULT 0,
                sleep_start TEXT,
                sleep_end TEXT,
                heart_rate_average REAL,
                heart_rate_min REAL,
                heart_rate_max REAL,
                heart_rate_readings TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_health_records_user_date ON health_records(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a user's health data for `date`, replacing any earlier data for that day
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete or out-of-range input, and
    /// `StorageUnavailable` when the write fails
    pub async fn store_daily_health_data(
        &self,
        user_id: &str,
        date: NaiveDate,
        input: &HealthDataInput,
    ) -> AppResult<HealthRecord> {
        let mut record = HealthRecord::from_input(user_id, date, input, Utc::now())?;

        let row = sqlx::query(
            r"
            INSERT INTO health_records (
                id, user_id, date, steps_count, hourly_steps, sleep_duration_minutes,
                sleep_quality, sleep_start, sleep_end, heart_rate_average, heart_rate_min,
                heart_rate_max, heart_rate_readings, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT(user_id, date) DO UPDATE SET
                steps_count = excluded.steps_count,
                hourly_steps = excluded.hourly_steps,
                sleep_duration_minutes = excluded.sleep_duration_minutes,
                sleep_quality = excluded.sleep_quality,
                sleep_start = excluded.sleep_start,
                sleep_end = excluded.sleep_end,
                heart_rate_average = excluded.heart_rate_average,
                heart_rate_min = excluded.heart_rate_min,
                heart_rate_max = excluded.heart_rate_max,
                heart_rate_readings = excluded.heart_rate_readings,
                updated_at = excluded.updated_at
            RETURNING id, created_at
            ",
        )
        .bind(record.id.to_string())
        .bind(&record.user_id)
        .bind(format_date(record.date))
        .bind(record.steps.count)
        .bind(serde_json::to_string(&record.steps.hourly_breakdown)?)
        .bind(record.sleep.duration_minutes)
        .bind(record.sleep.quality)
        .bind(record.sleep.start_time.map(|t| t.to_rfc3339()))
        .bind(record.sleep.end_time.map(|t| t.to_rfc3339()))
        .bind(record.heart_rate.average)
        .bind(record.heart_rate.min)
        .bind(record.heart_rate.max)
        .bind(serde_json::to_string(&record.heart_rate.readings)?)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::storage_unavailable(format!("Failed to store health data: {e}")))?;

        let id: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;
        record.id = parse_uuid(&id)?;
        record.created_at = parse_timestamp(&created_at)?;

        debug!(user.id = %user_id, date = %record.date, "Stored daily health data");
        Ok(record)
    }

    /// Health records covering the last `days` calendar days, today included, oldest first
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the query fails and `DatabaseError`
    /// for rows that cannot be decoded
    pub async fn health_records_since(
        &self,
        user_id: &str,
        days: u32,
    ) -> AppResult<Vec<HealthRecord>> {
        let today = Utc::now().date_naive();
        let start = window_start(today, days.saturating_sub(1));

        let rows = sqlx::query(
            r"
            SELECT * FROM health_records
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            ",
        )
        .bind(user_id)
        .bind(format_date(start))
        .bind(format_date(today))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::storage_unavailable(format!("Failed to load health records: {e}")))?;

        rows.iter().map(row_to_health_record).collect()
    }

    /// One metric's values for the `days` days before `before`, oldest first
    ///
    /// Days without a value for the metric are skipped, so the result may be
    /// shorter than `days`.
    pub(super) async fn metric_history(
        &self,
        user_id: &str,
        kind: MetricKind,
        before: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<f64>> {
        let column = metric_column(kind);
        let query = format!(
            "SELECT {column} AS value FROM health_records \
             WHERE user_id = $1 AND date >= $2 AND date < $3 AND {column} IS NOT NULL \
             ORDER BY date ASC"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(format_date(window_start(before, days)))
            .bind(format_date(before))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::storage_unavailable(format!("Failed to load {kind} history: {e}")))?;

        rows.iter()
            .map(|row| row.try_get::<f64, _>("value").map_err(AppError::from))
            .collect()
    }
}

fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

fn parse_json_column<T: serde::de::DeserializeOwned>(value: &str, column: &str) -> AppResult<T> {
    serde_json::from_str(value)
        .map_err(|e| AppError::database(format!("Invalid JSON in {column}: {e}")))
}

fn row_to_health_record(row: &SqliteRow) -> AppResult<HealthRecord> {
    let id: String = row.try_get("id")?;
    let date: String = row.try_get("date")?;
    let hourly_steps: String = row.try_get("hourly_steps")?;
    let readings: String = row.try_get("heart_rate_readings")?;
    let sleep_start: Option<String> = row.try_get("sleep_start")?;
    let sleep_end: Option<String> = row.try_get("sleep_end")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(HealthRecord {
        id: parse_uuid(&id)?,
        user_id: row.try_get("user_id")?,
        date: parse_date(&date)?,
        steps: StepsSummary {
            count: row.try_get("steps_count")?,
            hourly_breakdown: parse_json_column(&hourly_steps, "hourly_steps")?,
        },
        sleep: SleepSummary {
            duration_minutes: row.try_get("sleep_duration_minutes")?,
            quality: row.try_get("sleep_quality")?,
            start_time: parse_optional_timestamp(sleep_start)?,
            end_time: parse_optional_timestamp(sleep_end)?,
        },
        heart_rate: HeartRateSummary {
            average: row.try_get("heart_rate_average")?,
            min: row.try_get("heart_rate_min")?,
            max: row.try_get("heart_rate_max")?,
            readings: parse_json_column::<Vec<HeartRateReading>>(&readings, "heart_rate_readings")?,
        },
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
