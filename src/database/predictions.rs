// ABOUTME: Prediction record and notification storage
// ABOUTME: One prediction record per user per day, notifications appended and flipped to read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::{format_date, parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{
    MetricKind, MetricPrediction, NotificationEvent, PredictionRecord, PredictionSet, RecordId,
};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_predictions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS prediction_records (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                steps_predicted REAL NOT NULL,
                steps_actual REAL NOT NULL,
                steps_goal REAL NOT NULL,
                sleep_predicted REAL NOT NULL,
                sleep_actual REAL NOT NULL,
                sleep_goal REAL NOT NULL,
                heart_rate_predicted REAL NOT NULL,
                heart_rate_actual REAL NOT NULL,
                heart_rate_goal REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS prediction_notifications (
                id TEXT PRIMARY KEY,
                record_id TEXT NOT NULL REFERENCES prediction_records(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('steps', 'sleep', 'heartRate')),
                message TEXT NOT NULL,
                created_at TEXT NOT NULL,
                is_read INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_prediction_records_user_date ON prediction_records(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_prediction_notifications_record ON prediction_notifications(record_id, is_read)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert the user's prediction record for `date` and attach `notifications`
    ///
    /// The predictions of an existing record for the same day are overwritten;
    /// its notifications are kept. Everything happens in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the write fails
    pub async fn upsert_prediction_record(
        &self,
        user_id: &str,
        date: NaiveDate,
        predictions: &PredictionSet,
        notifications: &[NotificationEvent],
    ) -> AppResult<RecordId> {
        let mut tx = self.pool.begin().await.map_err(storage_write_error)?;
        let now = Utc::now().to_rfc3339();

        let row = sqlx::query(
            r"
            INSERT INTO prediction_records (
                id, user_id, date,
                steps_predicted, steps_actual, steps_goal,
                sleep_predicted, sleep_actual, sleep_goal,
                heart_rate_predicted, heart_rate_actual, heart_rate_goal,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT(user_id, date) DO UPDATE SET
                steps_predicted = excluded.steps_predicted,
                steps_actual = excluded.steps_actual,
                steps_goal = excluded.steps_goal,
                sleep_predicted = excluded.sleep_predicted,
                sleep_actual = excluded.sleep_actual,
                sleep_goal = excluded.sleep_goal,
                heart_rate_predicted = excluded.heart_rate_predicted,
                heart_rate_actual = excluded.heart_rate_actual,
                heart_rate_goal = excluded.heart_rate_goal,
                updated_at = excluded.updated_at
            RETURNING id
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(format_date(date))
        .bind(predictions.steps.predicted)
        .bind(predictions.steps.actual)
        .bind(predictions.steps.goal)
        .bind(predictions.sleep.predicted)
        .bind(predictions.sleep.actual)
        .bind(predictions.sleep.goal)
        .bind(predictions.heart_rate.predicted)
        .bind(predictions.heart_rate.actual)
        .bind(predictions.heart_rate.goal)
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_write_error)?;

        let id: String = row.try_get("id")?;
        let record_id = parse_uuid(&id)?;

        insert_notifications(&mut tx, record_id, notifications).await?;
        tx.commit().await.map_err(storage_write_error)?;

        info!(
            user.id = %user_id,
            record.id = %record_id,
            date = %date,
            "Saved prediction record"
        );
        Ok(record_id)
    }

    /// Append notifications to an existing prediction record
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the record does not exist and
    /// `StorageUnavailable` when the write fails
    pub async fn append_record_notifications(
        &self,
        record_id: RecordId,
        events: &[NotificationEvent],
    ) -> AppResult<()> {
        if events.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(storage_write_error)?;
        insert_notifications(&mut tx, record_id, events).await?;
        tx.commit().await.map_err(storage_write_error)?;

        debug!(record.id = %record_id, count = events.len(), "Appended notifications");
        Ok(())
    }

    /// The user's most recent prediction records, newest first
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the query fails and `DatabaseError`
    /// for rows that cannot be decoded
    pub async fn prediction_history(
        &self,
        user_id: &str,
        limit: u32,
    ) -> AppResult<Vec<PredictionRecord>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM prediction_records
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_read_error)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut record = row_to_prediction_record(row)?;
            record.notifications = self.record_notifications(record.id).await?;
            records.push(record);
        }
        Ok(records)
    }

    /// Unread notifications from the user's most recent records that still have any
    ///
    /// Records are taken newest first, up to `record_limit` of them; within a
    /// record, notifications keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the query fails and `DatabaseError`
    /// for rows that cannot be decoded
    pub async fn unread_notifications(
        &self,
        user_id: &str,
        record_limit: u32,
    ) -> AppResult<Vec<NotificationEvent>> {
        let rows = sqlx::query(
            r"
            SELECT n.id, n.kind, n.message, n.created_at, n.is_read
            FROM prediction_notifications n
            JOIN (
                SELECT r.id, r.date FROM prediction_records r
                WHERE r.user_id = $1
                  AND EXISTS (
                      SELECT 1 FROM prediction_notifications u
                      WHERE u.record_id = r.id AND u.is_read = 0
                  )
                ORDER BY r.date DESC
                LIMIT $2
            ) recent ON recent.id = n.record_id
            WHERE n.is_read = 0
            ORDER BY recent.date DESC, n.rowid ASC
            ",
        )
        .bind(user_id)
        .bind(i64::from(record_limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_read_error)?;

        rows.iter().map(row_to_notification).collect()
    }

    /// Mark one of the user's notifications as read
    ///
    /// Returns `false` when no notification with that id belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the write fails
    pub async fn mark_notification_read(
        &self,
        user_id: &str,
        notification_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE prediction_notifications
            SET is_read = 1
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(notification_id.to_string())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(storage_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_notifications(&self, record_id: RecordId) -> AppResult<Vec<NotificationEvent>> {
        let rows = sqlx::query(
            r"
            SELECT id, kind, message, created_at, is_read
            FROM prediction_notifications
            WHERE record_id = $1
            ORDER BY rowid ASC
            ",
        )
        .bind(record_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_read_error)?;

        rows.iter().map(row_to_notification).collect()
    }
}

/// Insert notifications for a record, copying the owner from the record row
async fn insert_notifications(
    tx: &mut Transaction<'_, Sqlite>,
    record_id: RecordId,
    events: &[NotificationEvent],
) -> AppResult<()> {
    for event in events {
        let result = sqlx::query(
            r"
            INSERT INTO prediction_notifications (id, record_id, user_id, kind, message, created_at, is_read)
            SELECT $1, id, user_id, $2, $3, $4, $5
            FROM prediction_records
            WHERE id = $6
            ",
        )
        .bind(event.id.to_string())
        .bind(event.kind.as_str())
        .bind(&event.message)
        .bind(event.timestamp.to_rfc3339())
        .bind(event.is_read)
        .bind(record_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(storage_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Prediction record {record_id}")));
        }
    }
    Ok(())
}

fn storage_write_error(e: sqlx::Error) -> AppError {
    AppError::storage_unavailable(format!("Failed to write prediction data: {e}")).with_source(e)
}

fn storage_read_error(e: sqlx::Error) -> AppError {
    AppError::storage_unavailable(format!("Failed to read prediction data: {e}")).with_source(e)
}

fn triplet(row: &SqliteRow, prefix: &str) -> AppResult<MetricPrediction> {
    Ok(MetricPrediction {
        predicted: row.try_get(format!("{prefix}_predicted").as_str())?,
        actual: row.try_get(format!("{prefix}_actual").as_str())?,
        goal: row.try_get(format!("{prefix}_goal").as_str())?,
    })
}

fn row_to_prediction_record(row: &SqliteRow) -> AppResult<PredictionRecord> {
    let id: String = row.try_get("id")?;
    let date: String = row.try_get("date")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(PredictionRecord {
        id: parse_uuid(&id)?,
        user_id: row.try_get("user_id")?,
        date: parse_date(&date)?,
        predictions: PredictionSet {
            steps: triplet(row, "steps")?,
            sleep: triplet(row, "sleep")?,
            heart_rate: triplet(row, "heart_rate")?,
        },
        notifications: Vec::new(),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn row_to_notification(row: &SqliteRow) -> AppResult<NotificationEvent> {
    let id: String = row.try_get("id")?;
    let kind: String = row.try_get("kind")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(NotificationEvent {
        id: parse_uuid(&id)?,
        kind: kind
            .parse::<MetricKind>()
            .map_err(|e| AppError::database(e.to_string()))?,
        message: row.try_get("message")?,
        timestamp: parse_timestamp(&created_at)?,
        is_read: row.try_get("is_read")?,
    })
}
