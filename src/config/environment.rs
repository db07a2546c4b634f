// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_vars, windows};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe `SQLite` database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` connection strings or an empty path
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with("postgres://") || trimmed.starts_with("postgresql://") {
            bail!("Only SQLite databases are supported, got: {trimmed}");
        }

        let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        match path_str {
            "" => bail!("DATABASE_URL must not be empty"),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/health_oracle.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database location
    pub database: DatabaseUrl,
    /// Prediction and trend settings
    pub prediction: PredictionConfig,
    /// Allowed CORS origins; `*` allows any origin
    pub cors_allowed_origins: Vec<String>,
}

/// Settings for the prediction workflow and report windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Days of history used for personalized predictions
    pub history_window_days: u32,
    /// Default window for trend reports
    pub trend_window_days: u32,
    /// Seed for reproducible notification templates
    pub template_seed: Option<u64>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            history_window_days: windows::DEFAULT_PREDICTION_HISTORY_DAYS,
            trend_window_days: windows::DEFAULT_TREND_WINDOW_DAYS,
            template_seed: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set to an unparsable or
    /// out-of-range value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let http_port = parse_env_or(env_vars::HTTP_PORT, defaults::DEFAULT_HTTP_PORT)?;
        let database = DatabaseUrl::parse_url(&env_var_or(
            env_vars::DATABASE_URL,
            defaults::DEFAULT_DATABASE_URL,
        ))
        .context("Invalid DATABASE_URL value")?;

        let log_level = env::var("RUST_LOG")
            .or_else(|_| env::var(env_vars::LOG_LEVEL))
            .map(|level| LogLevel::from_str_or_default(&level))
            .unwrap_or_default();

        let prediction = PredictionConfig {
            history_window_days: parse_env_in_range(
                env_vars::PREDICTION_HISTORY_DAYS,
                windows::DEFAULT_PREDICTION_HISTORY_DAYS,
                1..=windows::MAX_PREDICTION_HISTORY_DAYS,
            )?,
            trend_window_days: parse_env_in_range(
                env_vars::TREND_WINDOW_DAYS,
                windows::DEFAULT_TREND_WINDOW_DAYS,
                1..=windows::MAX_REPORT_WINDOW_DAYS,
            )?,
            template_seed: parse_optional_env(env_vars::TEMPLATE_SEED)?,
        };

        let config = Self {
            http_port,
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            log_level,
            database,
            prediction,
            cors_allowed_origins: parse_origins(&env_var_or(
                env_vars::CORS_ALLOWED_ORIGINS,
                defaults::DEFAULT_CORS_ORIGINS,
            )),
        };

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Human-readable summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Health Oracle Configuration:\n\
             - Environment: {}\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Prediction History: {} days\n\
             - Trend Window: {} days\n\
             - Seeded Templates: {}",
            self.environment,
            self.http_port,
            self.log_level,
            self.database,
            self.prediction.history_window_days,
            self.prediction.trend_window_days,
            self.prediction.template_seed.is_some(),
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            log_level: LogLevel::default(),
            database: DatabaseUrl::default(),
            prediction: PredictionConfig::default(),
            cors_allowed_origins: vec![defaults::DEFAULT_CORS_ORIGINS.to_owned()],
        }
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` only when it is unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_optional_env(key)?.unwrap_or(default))
}

fn parse_optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(None),
    }
}

fn parse_env_in_range(key: &str, default: u32, range: RangeInclusive<u32>) -> Result<u32> {
    let value = parse_env_or(key, default)?;
    if !range.contains(&value) {
        bail!(
            "{key} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        );
    }
    Ok(value)
}

/// Parse comma-separated origins
fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/test.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/test.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite://tmp/oracle.db")
                .unwrap()
                .to_connection_string(),
            "sqlite:tmp/oracle.db"
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_environment_parsing() {
        assert!(Environment::from_str_or_default("prod").is_production());
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
