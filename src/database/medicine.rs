// ABOUTME: Medicine schedule storage keyed to a user's calendar day
// ABOUTME: Entries are added untaken and flipped to taken by their owner only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use super::{format_date, parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{MedicineEntry, MedicineInput};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_medicine(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS medicine_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                dosage TEXT NOT NULL,
                time TEXT NOT NULL,
                taken INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_medicine_entries_user_date ON medicine_entries(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Schedule a medicine dose on the user's day
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing or overlong fields, or
    /// `StorageUnavailable` when the insert fails
    pub async fn add_medicine(
        &self,
        user_id: &str,
        date: NaiveDate,
        input: &MedicineInput,
    ) -> AppResult<MedicineEntry> {
        let entry = MedicineEntry::from_input(user_id, date, input)?;

        sqlx::query(
            r"
            INSERT INTO medicine_entries (id, user_id, date, name, dosage, time, taken, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id.to_string())
        .bind(&entry.user_id)
        .bind(format_date(entry.date))
        .bind(&entry.name)
        .bind(&entry.dosage)
        .bind(entry.time.to_rfc3339())
        .bind(entry.taken)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(storage_write_error)?;

        debug!(user_id, medicine_id = %entry.id, "Medicine scheduled");
        Ok(entry)
    }

    /// Mark a medicine dose as taken
    ///
    /// Returns `false` when no entry with that id belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the update fails
    pub async fn mark_medicine_taken(&self, user_id: &str, medicine_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE medicine_entries
            SET taken = 1
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(medicine_id.to_string())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(storage_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Medicine doses scheduled on the user's day, earliest due first
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the query fails
    pub async fn medicine_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<MedicineEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, name, dosage, time, taken
            FROM medicine_entries
            WHERE user_id = $1 AND date = $2
            ORDER BY time ASC, rowid ASC
            ",
        )
        .bind(user_id)
        .bind(format_date(date))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::storage_unavailable(format!("Failed to read medicine entries: {e}"))
                .with_source(e)
        })?;

        rows.iter().map(row_to_medicine).collect()
    }
}

fn storage_write_error(e: sqlx::Error) -> AppError {
    AppError::storage_unavailable(format!("Failed to write medicine entry: {e}")).with_source(e)
}

fn row_to_medicine(row: &SqliteRow) -> AppResult<MedicineEntry> {
    let id: String = row.try_get("id")?;
    let date: String = row.try_get("date")?;
    let time: String = row.try_get("time")?;

    Ok(MedicineEntry {
        id: parse_uuid(&id)?,
        user_id: row.try_get("user_id")?,
        date: parse_date(&date)?,
        name: row.try_get("name")?,
        dosage: row.try_get("dosage")?,
        time: parse_timestamp(&time)?,
        taken: row.try_get("taken")?,
    })
}
