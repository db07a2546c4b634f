// ABOUTME: Per-metric averages and trend summaries over stored daily health records
// ABOUTME: Days missing a metric value are skipped rather than counted as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use crate::intelligence::{metric_averages, summarize_trend, DatedValue, MetricAverages, TrendSummary};
use crate::models::{HealthRecord, MetricKind};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Averages for each metric; `None` when no record carries the metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAverages {
    /// Step count statistics
    pub steps: Option<MetricAverages>,
    /// Sleep minutes statistics
    pub sleep: Option<MetricAverages>,
    /// Heart rate statistics
    pub heart_rate: Option<MetricAverages>,
}

/// Daily averages and trend line for each metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTrends {
    /// Step count trend
    pub steps: TrendSummary,
    /// Sleep minutes trend
    pub sleep: TrendSummary,
    /// Heart rate trend
    pub heart_rate: TrendSummary,
}

fn values(records: &[HealthRecord], kind: MetricKind) -> Vec<f64> {
    records.iter().filter_map(|r| r.metric_value(kind)).collect()
}

fn dated_values(records: &[HealthRecord], kind: MetricKind) -> Vec<DatedValue> {
    records
        .iter()
        .filter_map(|r| {
            r.metric_value(kind).map(|value| DatedValue {
                date: r.date.and_time(NaiveTime::MIN).and_utc(),
                value,
            })
        })
        .collect()
}

/// Mean, minimum, and maximum of each metric across `records`
#[must_use]
pub fn health_averages(records: &[HealthRecord]) -> HealthAverages {
    HealthAverages {
        steps: metric_averages(&values(records, MetricKind::Steps)),
        sleep: metric_averages(&values(records, MetricKind::Sleep)),
        heart_rate: metric_averages(&values(records, MetricKind::HeartRate)),
    }
}

/// Trend summary of each metric across `records`
#[must_use]
pub fn health_trends(records: &[HealthRecord]) -> HealthTrends {
    HealthTrends {
        steps: summarize_trend(&dated_values(records, MetricKind::Steps)),
        sleep: summarize_trend(&dated_values(records, MetricKind::Sleep)),
        heart_rate: summarize_trend(&dated_values(records, MetricKind::HeartRate)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthDataInput, HeartRateInput, SleepInput};
    use chrono::{NaiveDate, Utc};

    fn record(day: u32, steps: f64, sleep: f64, heart_rate: Option<f64>) -> HealthRecord {
        let input = HealthDataInput {
            steps: Some(steps),
            sleep: Some(SleepInput {
                duration_minutes: Some(sleep),
                ..SleepInput::default()
            }),
            heart_rate: Some(HeartRateInput {
                average: heart_rate,
                ..HeartRateInput::default()
            }),
            ..HealthDataInput::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        HealthRecord::from_input("user-1", date, &input, Utc::now()).unwrap()
    }

    #[test]
    fn test_averages_skip_missing_heart_rate() {
        let records = vec![
            record(1, 6000.0, 420.0, Some(60.0)),
            record(2, 8000.0, 400.0, None),
            record(3, 10000.0, 380.0, Some(70.0)),
        ];

        let averages = health_averages(&records);

        let steps = averages.steps.unwrap();
        assert!((steps.average - 8000.0).abs() < f64::EPSILON);
        let heart_rate = averages.heart_rate.unwrap();
        assert!((heart_rate.average - 65.0).abs() < f64::EPSILON);
        assert!((heart_rate.min - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_averages_without_records_are_null() {
        let json = serde_json::to_value(health_averages(&[])).unwrap();
        assert!(json["steps"].is_null());
        assert!(json["heartRate"].is_null());
    }

    #[test]
    fn test_trends_follow_record_dates() {
        let records = vec![
            record(1, 5000.0, 400.0, Some(70.0)),
            record(2, 6000.0, 400.0, Some(68.0)),
            record(3, 7000.0, 400.0, Some(66.0)),
        ];

        let trends = health_trends(&records);

        assert_eq!(trends.steps.daily.len(), 3);
        assert!((trends.steps.trend.slope - 1000.0).abs() < 1e-9);
        assert!((trends.heart_rate.trend.slope + 2.0).abs() < 1e-9);
        assert!(trends.sleep.trend.slope.abs() < 1e-9);
    }
}
