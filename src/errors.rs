// ABOUTME: Re-exports the unified error types from oracle-core
// ABOUTME: Keeps crate::errors paths stable for routes, storage, and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! # Unified Error Handling System
//!
//! The error types live in `oracle-core` so the engine crates and this crate
//! share one `AppError`. The `http-response` and `database-errors` features
//! enabled here add the axum response and `sqlx` conversions.

pub use oracle_core::errors::*;
