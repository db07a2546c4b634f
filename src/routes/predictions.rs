// ABOUTME: Route handlers for predictions: self and other predictions, history, notifications
// ABOUTME: Only self predictions read history, persist records, and produce notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Prediction routes
//!
//! All endpoints identify the caller through the gateway user header.
//! `POST /api/predictions/other` computes a history-free prediction and never
//! touches storage.

use crate::auth::authenticate;
use crate::constants::limits::{PREDICTION_HISTORY_LIMIT, UNREAD_NOTIFICATION_RECORD_LIMIT};
use crate::errors::AppError;
use crate::models::{HealthDataInput, Subject};
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Body of both prediction endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// Today's health data
    pub health_data: Option<HealthDataInput>,
}

/// Response for marking a notification as read
#[derive(Debug, Serialize, Deserialize)]
pub struct MarkReadResponse {
    /// Always `true`; failures are reported as errors
    pub success: bool,
}

/// Prediction routes handler
pub struct PredictionRoutes;

impl PredictionRoutes {
    /// Create all prediction routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/predictions/self", post(Self::handle_predict_self))
            .route("/api/predictions/other", post(Self::handle_predict_other))
            .route("/api/predictions/history", get(Self::handle_history))
            .route(
                "/api/predictions/notifications",
                get(Self::handle_notifications),
            )
            .route(
                "/api/predictions/notifications/:id/read",
                put(Self::handle_mark_read),
            )
            .with_state(resources)
    }

    /// Unwrap the request body, turning extractor failures into API errors
    fn health_data(
        body: Result<Json<PredictionRequest>, JsonRejection>,
    ) -> Result<HealthDataInput, AppError> {
        let Json(request) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;
        request
            .health_data
            .ok_or_else(|| AppError::missing_field("healthData"))
    }

    /// Handle POST /api/predictions/self - Personalized, persisted prediction
    async fn handle_predict_self(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<PredictionRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let input = Self::health_data(body)?;

        let bundle = resources
            .predictions
            .generate_prediction(
                Subject::Own {
                    user_id: auth.user_id,
                },
                &input,
            )
            .await?;

        Ok((StatusCode::OK, Json(bundle)).into_response())
    }

    /// Handle POST /api/predictions/other - Anonymous prediction, nothing stored
    async fn handle_predict_other(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<PredictionRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        authenticate(&headers)?;
        let input = Self::health_data(body)?;

        let bundle = resources
            .predictions
            .generate_prediction(Subject::Other, &input)
            .await?;

        Ok((StatusCode::OK, Json(bundle)).into_response())
    }

    /// Handle GET /api/predictions/history - Most recent prediction records
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;

        let records = resources
            .database
            .prediction_history(&auth.user_id, PREDICTION_HISTORY_LIMIT)
            .await?;

        Ok((StatusCode::OK, Json(records)).into_response())
    }

    /// Handle GET /api/predictions/notifications - Unread notifications
    async fn handle_notifications(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;

        let notifications = resources
            .database
            .unread_notifications(&auth.user_id, UNREAD_NOTIFICATION_RECORD_LIMIT)
            .await?;

        Ok((StatusCode::OK, Json(notifications)).into_response())
    }

    /// Handle PUT /api/predictions/notifications/:id/read - Mark as read
    async fn handle_mark_read(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers)?;
        let notification_id = Uuid::parse_str(&id)
            .map_err(|_| AppError::invalid_input("Invalid notification id format"))?;

        let updated = resources
            .database
            .mark_notification_read(&auth.user_id, notification_id)
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Notification {notification_id}")));
        }

        info!(user.id = %auth.user_id, notification.id = %notification_id, "Notification marked read");
        Ok((StatusCode::OK, Json(MarkReadResponse { success: true })).into_response())
    }
}
