// ABOUTME: End-to-end HTTP tests for the prediction, health data, and health check routes
// ABOUTME: Drives the full router with tower oneshot requests over an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use common::{create_test_router, seed_health_record};
use health_oracle::middleware::REQUEST_ID_HEADER;
use serde_json::{json, Value};
use std::error::Error;
use tower::ServiceExt;
use uuid::Uuid;

const USER_HEADER: &str = "x-user-id";

fn health_data_body(steps: f64) -> Value {
    json!({
        "healthData": {
            "steps": steps,
            "sleep": { "durationMinutes": 420, "quality": 80 },
            "heartRate": { "latest": 70, "average": 68 }
        }
    })
}

fn request(method: Method, uri: &str, user: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Result<Value, Box<dyn Error>> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_requests_without_user_header_are_unauthorized() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    for (method, uri) in [
        (Method::POST, "/api/predictions/self"),
        (Method::POST, "/api/predictions/other"),
        (Method::GET, "/api/predictions/history"),
        (Method::GET, "/api/predictions/notifications"),
        (Method::GET, "/api/health/averages"),
    ] {
        let response = send(&app, request(method, uri, None, Some(&health_data_body(1.0)))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let body = json_body(response).await?;
        assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
    }
    Ok(())
}

#[tokio::test]
async fn test_predict_other_returns_ephemeral_bundle() -> Result<(), Box<dyn Error>> {
    let (app, resources) = create_test_router().await?;

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/predictions/other",
            Some("user-1"),
            Some(&health_data_body(5000.0)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await?;
    assert_eq!(body["predictions"]["steps"]["predicted"], 5000.0);
    assert_eq!(body["predictions"]["steps"]["goal"], 5500.0);
    assert_eq!(body["predictions"]["heartRate"]["actual"], 70.0);
    assert!(body.get("recordId").is_none());
    assert!(body.get("notifications").is_none());

    let history = resources.database.prediction_history("user-1", 7).await?;
    assert!(history.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_predict_self_persists_and_lists_notifications() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/predictions/self",
            Some("user-1"),
            Some(&health_data_body(5000.0)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bundle = json_body(response).await?;
    let record_id = bundle["recordId"].as_str().unwrap().to_owned();
    assert!(bundle["date"].is_string());
    let notifications = bundle["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[0]["type"], "steps");
    assert_eq!(notifications[0]["isRead"], false);

    let history = json_body(
        send(
            &app,
            request(Method::GET, "/api/predictions/history", Some("user-1"), None),
        )
        .await,
    )
    .await?;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"], record_id.as_str());

    let unread = json_body(
        send(
            &app,
            request(
                Method::GET,
                "/api/predictions/notifications",
                Some("user-1"),
                None,
            ),
        )
        .await,
    )
    .await?;
    assert_eq!(unread.as_array().unwrap().len(), 3);

    let other_user = json_body(
        send(
            &app,
            request(
                Method::GET,
                "/api/predictions/notifications",
                Some("user-2"),
                None,
            ),
        )
        .await,
    )
    .await?;
    assert!(other_user.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_mark_notification_read() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let bundle = json_body(
        send(
            &app,
            request(
                Method::POST,
                "/api/predictions/self",
                Some("user-1"),
                Some(&health_data_body(5000.0)),
            ),
        )
        .await,
    )
    .await?;
    let notification_id = bundle["notifications"][0]["id"].as_str().unwrap().to_owned();
    let uri = format!("/api/predictions/notifications/{notification_id}/read");

    let foreign = send(&app, request(Method::PUT, &uri, Some("user-2"), None)).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request(Method::PUT, &uri, Some("user-1"), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?["success"], true);

    let unread = json_body(
        send(
            &app,
            request(
                Method::GET,
                "/api/predictions/notifications",
                Some("user-1"),
                None,
            ),
        )
        .await,
    )
    .await?;
    assert_eq!(unread.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_mark_read_rejects_bad_and_unknown_ids() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let bad = send(
        &app,
        request(
            Method::PUT,
            "/api/predictions/notifications/not-a-uuid/read",
            Some("user-1"),
            None,
        ),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let unknown_uri = format!("/api/predictions/notifications/{}/read", Uuid::new_v4());
    let unknown = send(&app, request(Method::PUT, &unknown_uri, Some("user-1"), None)).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(unknown).await?["error"]["code"], "RESOURCE_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_prediction_validation_errors() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let missing = send(
        &app,
        request(
            Method::POST,
            "/api/predictions/self",
            Some("user-1"),
            Some(&json!({})),
        ),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(missing).await?["error"]["code"],
        "MISSING_REQUIRED_FIELD"
    );

    let no_sleep = json!({ "healthData": { "steps": 100, "heartRate": { "latest": 60 } } });
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/predictions/other",
            Some("user-1"),
            Some(&no_sleep),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert_eq!(
        body["error"]["details"]["field"],
        "healthData.sleep.durationMinutes"
    );

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/api/predictions/self")
        .header(USER_HEADER, "user-1")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    assert_eq!(send(&app, malformed).await.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_store_daily_and_report_endpoints() -> Result<(), Box<dyn Error>> {
    let (app, resources) = create_test_router().await?;
    seed_health_record(&resources.database, "user-1", 2, 4000.0, 400.0, 60.0).await?;
    seed_health_record(&resources.database, "user-1", 1, 6000.0, 440.0, 64.0).await?;

    let daily = json!({
        "steps": 8000,
        "hourlySteps": [500, 1500],
        "sleep": { "durationMinutes": 480 },
        "heartRate": { "average": 62 }
    });
    let stored = send(
        &app,
        request(Method::POST, "/api/health/daily", Some("user-1"), Some(&daily)),
    )
    .await;
    assert_eq!(stored.status(), StatusCode::OK);

    let averages = json_body(
        send(
            &app,
            request(Method::GET, "/api/health/averages", Some("user-1"), None),
        )
        .await,
    )
    .await?;
    assert_eq!(averages["steps"]["average"], 6000.0);
    assert_eq!(averages["steps"]["min"], 4000.0);
    assert_eq!(averages["sleep"]["max"], 480.0);
    assert_eq!(averages["heartRate"]["average"], 62.0);

    let trends = json_body(
        send(
            &app,
            request(Method::GET, "/api/health/trends?days=7", Some("user-1"), None),
        )
        .await,
    )
    .await?;
    assert_eq!(trends["steps"]["daily"].as_array().unwrap().len(), 3);
    assert_eq!(trends["steps"]["trend"]["slope"], 2000.0);
    assert_eq!(trends["steps"]["trend"]["insufficientData"], false);

    let narrow = json_body(
        send(
            &app,
            request(
                Method::GET,
                "/api/health/averages?days=1",
                Some("user-1"),
                None,
            ),
        )
        .await,
    )
    .await?;
    assert_eq!(narrow["steps"]["average"], 8000.0);
    Ok(())
}

#[tokio::test]
async fn test_report_window_bounds() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    for uri in ["/api/health/averages?days=0", "/api/health/trends?days=366"] {
        let response = send(&app, request(Method::GET, uri, Some("user-1"), None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }

    let empty = json_body(
        send(
            &app,
            request(Method::GET, "/api/health/averages", Some("user-1"), None),
        )
        .await,
    )
    .await?;
    assert!(empty["steps"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_health_and_readiness() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let health = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(health.status(), StatusCode::OK);
    assert!(health.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(json_body(health).await?["status"], "healthy");

    let ready = send(&app, request(Method::GET, "/ready", None, None)).await;
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(json_body(ready).await?["status"], "ready");
    Ok(())
}

#[tokio::test]
async fn test_incoming_request_id_is_echoed() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;
    let request_id = Uuid::new_v4().to_string();

    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, &request_id)
        .body(Body::empty())?;
    let response = send(&app, request).await;

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap().to_str()?,
        request_id
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let response = send(&app, request(Method::GET, "/api/unknown", Some("user-1"), None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await?["error"]["code"], "RESOURCE_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_medicine_schedule_and_mark_taken() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;
    let dose = json!({ "name": "Metformin", "dosage": "500mg", "time": "2025-03-14T08:00:00Z" });

    let response = send(
        &app,
        request(Method::POST, "/api/health/medicine", Some("user-1"), Some(&dose)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry = json_body(response).await?;
    assert_eq!(entry["name"], "Metformin");
    assert_eq!(entry["taken"], false);
    let uri = format!("/api/health/medicine/{}/taken", entry["id"].as_str().unwrap());

    let foreign = send(&app, request(Method::PUT, &uri, Some("user-2"), None)).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request(Method::PUT, &uri, Some("user-1"), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?["success"], true);

    let today = json_body(
        send(
            &app,
            request(Method::GET, "/api/health/medicine", Some("user-1"), None),
        )
        .await,
    )
    .await?;
    assert_eq!(today.as_array().unwrap().len(), 1);
    assert_eq!(today[0]["taken"], true);
    Ok(())
}

#[tokio::test]
async fn test_medicine_rejects_missing_fields_and_bad_ids() -> Result<(), Box<dyn Error>> {
    let (app, _) = create_test_router().await?;

    let no_dosage = json!({ "name": "Metformin", "time": "2025-03-14T08:00:00Z" });
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/health/medicine",
            Some("user-1"),
            Some(&no_dosage),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await?["error"]["code"], "MISSING_REQUIRED_FIELD");

    let bad = send(
        &app,
        request(
            Method::PUT,
            "/api/health/medicine/not-a-uuid/taken",
            Some("user-1"),
            None,
        ),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let unauthenticated = send(
        &app,
        request(Method::GET, "/api/health/medicine", None, None),
    )
    .await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
