// ABOUTME: Integration tests for prediction record and notification storage in SQLite
// ABOUTME: Covers same-day upserts, history ordering, unread queries, and read marking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::{Days, NaiveDate, Utc};
use common::create_test_database;
use health_oracle::{
    database::PredictionStorage,
    errors::ErrorCode,
    models::{MetricKind, MetricPrediction, NotificationEvent, PredictionSet},
};
use uuid::Uuid;

const EPSILON: f64 = 1e-9;

fn prediction_set(steps: f64) -> PredictionSet {
    PredictionSet::from_fn(|kind| {
        let value = match kind {
            MetricKind::Steps => steps,
            MetricKind::Sleep => 420.0,
            MetricKind::HeartRate => 65.0,
        };
        MetricPrediction {
            predicted: value,
            actual: value,
            goal: value,
        }
    })
}

fn event(kind: MetricKind, message: &str) -> NotificationEvent {
    NotificationEvent::new(kind, message, Utc::now())
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

#[tokio::test]
async fn test_same_day_upsert_overwrites_predictions_and_keeps_notifications() {
    let db = create_test_database().await.unwrap();

    let first = db
        .upsert_prediction_record(
            "user-1",
            date(10),
            &prediction_set(5000.0),
            &[event(MetricKind::Steps, "first")],
        )
        .await
        .unwrap();
    let second = db
        .upsert_prediction_record(
            "user-1",
            date(10),
            &prediction_set(6000.0),
            &[event(MetricKind::Sleep, "second")],
        )
        .await
        .unwrap();

    assert_eq!(first, second);

    let history = db.prediction_history("user-1", 7).await.unwrap();
    assert_eq!(history.len(), 1);
    assert!((history[0].predictions.steps.predicted - 6000.0).abs() < EPSILON);

    let messages: Vec<&str> = history[0]
        .notifications
        .iter()
        .map(|n| n.message.as_str())
        .collect();
    assert_eq!(messages, vec!["first", "second"]);
}

#[tokio::test]
async fn test_prediction_history_is_newest_first_and_limited() {
    let db = create_test_database().await.unwrap();
    for day in [3, 1, 5, 2, 4] {
        db.save_record("user-1", date(day), &prediction_set(1000.0), &[])
            .await
            .unwrap();
    }
    db.save_record("user-2", date(6), &prediction_set(1000.0), &[])
        .await
        .unwrap();

    let history = db.prediction_history("user-1", 3).await.unwrap();
    let dates: Vec<NaiveDate> = history.iter().map(|r| r.date).collect();

    assert_eq!(dates, vec![date(5), date(4), date(3)]);
    assert!(history.iter().all(|r| r.user_id == "user-1"));
}

#[tokio::test]
async fn test_append_notifications_to_missing_record_is_not_found() {
    let db = create_test_database().await.unwrap();

    let err = db
        .append_notifications(Uuid::new_v4(), &[event(MetricKind::Steps, "orphan")])
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_unread_notifications_newest_record_first() {
    let db = create_test_database().await.unwrap();

    let older = db
        .save_record("user-1", date(1), &prediction_set(1000.0), &[])
        .await
        .unwrap();
    db.append_notifications(
        older,
        &[
            event(MetricKind::Steps, "old steps"),
            event(MetricKind::Sleep, "old sleep"),
        ],
    )
    .await
    .unwrap();

    let newer = db
        .save_record("user-1", date(2), &prediction_set(1000.0), &[])
        .await
        .unwrap();
    db.append_notifications(newer, &[event(MetricKind::HeartRate, "new heart")])
        .await
        .unwrap();

    let unread = db.unread_notifications("user-1", 10).await.unwrap();
    let messages: Vec<&str> = unread.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["new heart", "old steps", "old sleep"]);

    let limited = db.unread_notifications("user-1", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].message, "new heart");

    assert!(db.unread_notifications("user-2", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_notification_read_only_for_owner() {
    let db = create_test_database().await.unwrap();
    let notification = event(MetricKind::Steps, "keep moving");
    let notification_id = notification.id;

    db.upsert_prediction_record("user-1", date(1), &prediction_set(1000.0), &[notification])
        .await
        .unwrap();

    assert!(!db
        .mark_notification_read("intruder", notification_id)
        .await
        .unwrap());
    assert_eq!(db.unread_notifications("user-1", 10).await.unwrap().len(), 1);

    assert!(db
        .mark_notification_read("user-1", notification_id)
        .await
        .unwrap());
    assert!(db.unread_notifications("user-1", 10).await.unwrap().is_empty());

    let history = db.prediction_history("user-1", 7).await.unwrap();
    assert!(history[0].notifications[0].is_read);
}

#[tokio::test]
async fn test_records_with_only_read_notifications_are_skipped() {
    let db = create_test_database().await.unwrap();
    let read = event(MetricKind::Steps, "already seen");
    let read_id = read.id;
    db.upsert_prediction_record("user-1", date(2), &prediction_set(1000.0), &[read])
        .await
        .unwrap();
    db.upsert_prediction_record(
        "user-1",
        date(1),
        &prediction_set(1000.0),
        &[event(MetricKind::Sleep, "still unread")],
    )
    .await
    .unwrap();
    db.mark_notification_read("user-1", read_id).await.unwrap();

    let unread = db.unread_notifications("user-1", 1).await.unwrap();

    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].message, "still unread");
}

#[tokio::test]
async fn test_storage_history_excludes_today() {
    let db = create_test_database().await.unwrap();
    let today = Utc::now().date_naive();
    let input = common::health_input(4000.0, 400.0, 60.0);

    db.store_daily_health_data("user-1", today, &input)
        .await
        .unwrap();
    db.store_daily_health_data(
        "user-1",
        today.checked_sub_days(Days::new(1)).unwrap(),
        &common::health_input(3000.0, 380.0, 62.0),
    )
    .await
    .unwrap();

    let steps = db
        .get_history("user-1", MetricKind::Steps, today, 7)
        .await
        .unwrap();

    assert_eq!(steps, vec![3000.0]);
}
