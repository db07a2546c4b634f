// ABOUTME: Route handlers for daily health data: storage, averages, trend reports, and medicine
// ABOUTME: Report windows are counted in calendar days ending today
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use crate::auth::authenticate;
use crate::constants::windows::{DEFAULT_AVERAGES_WINDOW_DAYS, MAX_REPORT_WINDOW_DAYS};
use crate::errors::AppError;
use crate::models::{HealthDataInput, MedicineInput};
use crate::resources::ServerResources;
use crate::services::{health_averages, health_trends};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Query parameters of the report endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WindowQuery {
    /// Number of calendar days to cover, today included
    pub days: Option<u32>,
}

impl WindowQuery {
    /// Requested window, or `default` when absent
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for zero or more than a year
    pub fn days_or(self, default: u32) -> Result<u32, AppError> {
        let days = self.days.unwrap_or(default);
        if days == 0 || days > MAX_REPORT_WINDOW_DAYS {
            return Err(AppError::out_of_range(
                "days",
                format!("must be between 1 and {MAX_REPORT_WINDOW_DAYS}"),
            ));
        }
        Ok(days)
    }
}

/// Response for marking a medicine dose as taken
#[derive(Debug, Serialize, Deserialize)]
pub struct MedicineTakenResponse {
    /// Always `true`; failures are reported as errors
    pub success: bool,
}

/// Health data routes handler
pub struct HealthDataRoutes;

impl HealthDataRoutes {
    /// Create all health data routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health/daily", post(Self::handle_store_daily))
            .route("/api/health/averages", get(Self::handle_averages))
            .route("/api/health/trends", get(Self::handle_trends))
            .route(
                "/api/health/medicine",
                post(Self::handle_add_medicine).get(Self::handle_list_medicine),
            )
            .route(
                "/api/health/medicine/:id/taken",
                put(Self::handle_medicine_taken),
            )
            .with_state(resources)
    }

    /// Handle POST /api/health/daily - Store today's health data
    async fn handle_store_daily(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<HealthDataInput>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let Json(input) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;

        let today = Utc::now().date_naive();
        let record = resources
            .database
            .store_daily_health_data(&auth.user_id, today, &input)
            .await?;

        info!(user.id = %auth.user_id, date = %today, "Daily health data stored");
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle GET /api/health/averages - Per-metric mean, min, and max
    async fn handle_averages(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<WindowQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let days = query.days_or(DEFAULT_AVERAGES_WINDOW_DAYS)?;

        let records = resources
            .database
            .health_records_since(&auth.user_id, days)
            .await?;

        Ok((StatusCode::OK, Json(health_averages(&records))).into_response())
    }

    /// Handle GET /api/health/trends - Per-metric daily averages and trend lines
    async fn handle_trends(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<WindowQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let days = query.days_or(resources.config.prediction.trend_window_days)?;

        let records = resources
            .database
            .health_records_since(&auth.user_id, days)
            .await?;

        Ok((StatusCode::OK, Json(health_trends(&records))).into_response())
    }

    /// Handle POST /api/health/medicine - Schedule a dose on today's record
    async fn handle_add_medicine(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<MedicineInput>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let Json(input) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;

        let today = Utc::now().date_naive();
        let entry = resources
            .database
            .add_medicine(&auth.user_id, today, &input)
            .await?;

        info!(user.id = %auth.user_id, medicine.id = %entry.id, "Medicine scheduled");
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    /// Handle GET /api/health/medicine - Today's scheduled doses
    async fn handle_list_medicine(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;

        let entries = resources
            .database
            .medicine_for_day(&auth.user_id, Utc::now().date_naive())
            .await?;

        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle PUT /api/health/medicine/:id/taken - Mark a dose as taken
    async fn handle_medicine_taken(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let medicine_id = Uuid::parse_str(&id)
            .map_err(|_| AppError::invalid_input("Invalid medicine id format"))?;

        let updated = resources
            .database
            .mark_medicine_taken(&auth.user_id, medicine_id)
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Medicine {medicine_id}")));
        }

        info!(user.id = %auth.user_id, medicine.id = %medicine_id, "Medicine marked taken");
        Ok((StatusCode::OK, Json(MedicineTakenResponse { success: true })).into_response())
    }
}
