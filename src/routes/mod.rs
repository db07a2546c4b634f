// ABOUTME: Route module organization for Health Oracle HTTP endpoints
// ABOUTME: Health checks, prediction endpoints, and daily health data endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Route module for Health Oracle
//!
//! Each domain module contains route definitions and thin handler functions
//! that authenticate the caller and delegate to the service and storage layers.

/// Daily health data storage, averages, and trends
pub mod health_data;
/// Health check and readiness routes
pub mod health;
/// Self and other predictions, history, and notifications
pub mod predictions;

pub use health::HealthRoutes;
pub use health_data::HealthDataRoutes;
pub use predictions::PredictionRoutes;
