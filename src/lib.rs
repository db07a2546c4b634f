// ABOUTME: Main library entry point for the Health Oracle prediction service
// ABOUTME: Wires storage, the prediction engine, and the REST API together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

#![deny(unsafe_code)]

//! # Health Oracle
//!
//! A service that turns a user's daily health data (steps, sleep, heart rate)
//! into next-day predictions, derived goals, and motivational notifications,
//! and serves averages and trend lines over the stored history.
//!
//! ## Architecture
//!
//! - **Core** (`oracle-core`): errors, constants, and domain models
//! - **Intelligence** (`oracle-intelligence`): prediction, goal evaluation,
//!   and trend statistics, all pure functions
//! - **Database**: `SQLite` storage behind the [`database::PredictionStorage`] trait
//! - **Services**: the self/other prediction workflow
//! - **Routes**: the axum REST surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use health_oracle::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Health Oracle configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Caller identification from the gateway-provided user header
pub mod auth;
/// Environment-driven server configuration
pub mod config;
/// Application constants and configuration values
pub mod constants;
/// `SQLite` storage for health records, predictions, and notifications
pub mod database;
/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;
/// Production logging and structured output
pub mod logging;
/// HTTP middleware for CORS and request correlation
pub mod middleware;
/// Shared server state handed to every route
pub mod resources;
/// `HTTP` routes for predictions, health data, and health checks
pub mod routes;
/// Router assembly and the HTTP server lifecycle
pub mod server;
/// Prediction workflow orchestration
pub mod services;

/// Domain models shared with the engine crates
pub use oracle_core::models;

/// Prediction, goal evaluation, and trend statistics
pub use oracle_intelligence as intelligence;
