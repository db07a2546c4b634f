// ABOUTME: Core types and constants for the Health Oracle trend and prediction service
// ABOUTME: Foundation crate with error handling, metric models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

#![deny(unsafe_code)]

//! # Oracle Core
//!
//! Foundation crate providing shared types and constants for the Health Oracle
//! prediction service. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP rendering
//! - **constants**: Goal multipliers, window sizes, and notification templates
//! - **models**: Metric kinds, predictions, notifications, and daily health records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (metrics, predictions, notifications, health records)
pub mod models;
