// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Configuration module for Health Oracle
//!
//! All settings come from environment variables (optionally loaded from a
//! `.env` file). Command line flags on the server binary override the port
//! and database location.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
