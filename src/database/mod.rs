// ABOUTME: SQLite database manager for health records, predictions, notifications, and medicine
// ABOUTME: Owns the connection pool and creates the schema on startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! # Database Management
//!
//! All tables are keyed by user identifier, and the per-day tables carry a
//! `UNIQUE(user_id, date)` constraint so each user has at most one health
//! record and one prediction record per calendar day.

mod health_records;
mod medicine;
mod predictions;
mod repositories;

pub use repositories::PredictionStorage;

use crate::config::environment::DatabaseUrl;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Storage date format (`YYYY-MM-DD`), which also sorts chronologically
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database manager for health and prediction storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// An in-memory database is held on a single connection; every `SQLite`
    /// connection to `:memory:` would otherwise see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid, the database
    /// file cannot be created, or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let url = DatabaseUrl::parse_url(database_url)?;

        if let DatabaseUrl::SQLite { path } = &url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_health_records().await?;
        self.migrate_predictions().await?;
        self.migrate_medicine().await?;
        Ok(())
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the pool cannot run a query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage_unavailable(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::database(format!("Invalid stored date '{value}': {e}")))
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::database(format!("Invalid UUID '{value}': {e}")))
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{value}': {e}")))
}

fn parse_optional_timestamp(value: Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_timestamp).transpose()
}
