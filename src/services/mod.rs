// ABOUTME: Service layer between route handlers and the engine and storage
// ABOUTME: Prediction workflow orchestration and health report assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Business logic extracted from route handlers

/// Averages and trend reports over stored health records
pub mod health_reports;
/// Self and other prediction workflows
pub mod prediction;

pub use health_reports::{health_averages, health_trends, HealthAverages, HealthTrends};
pub use prediction::PredictionService;
