// ABOUTME: Application constants re-exported from oracle-core plus server defaults
// ABOUTME: Default ports, database location, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

pub use oracle_core::constants::*;

/// Server defaults used when the environment leaves a setting unset
pub mod defaults {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/health_oracle.db";
    /// Default CORS origin list
    pub const DEFAULT_CORS_ORIGINS: &str = "*";
    /// Request timeout applied to every route, in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Environment variable names
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log level fallback when `RUST_LOG` is unset
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Days of history used for personalized predictions
    pub const PREDICTION_HISTORY_DAYS: &str = "PREDICTION_HISTORY_DAYS";
    /// Default trend window in days
    pub const TREND_WINDOW_DAYS: &str = "TREND_WINDOW_DAYS";
    /// Comma-separated allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Seed for reproducible notification messages
    pub const TEMPLATE_SEED: &str = "TEMPLATE_SEED";
}
