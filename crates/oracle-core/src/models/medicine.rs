// ABOUTME: Medicine schedule entries attached to a user's calendar day
// ABOUTME: Entries start untaken and are flipped to taken by their owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use crate::constants::limits::MAX_MEDICINE_TEXT_LEN;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Medicine dose as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineInput {
    /// Medicine name
    pub name: Option<String>,
    /// Free-form dosage, e.g. "500mg"
    pub dosage: Option<String>,
    /// When the dose is due
    pub time: Option<DateTime<Utc>>,
}

/// Scheduled medicine dose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Calendar day (UTC) the entry was scheduled on
    pub date: NaiveDate,
    /// Medicine name
    pub name: String,
    /// Free-form dosage
    pub dosage: String,
    /// When the dose is due
    pub time: DateTime<Utc>,
    /// Whether the dose was taken
    pub taken: bool,
}

fn require_text(value: Option<&str>, field: &str) -> AppResult<String> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))?;
    if value.chars().count() > MAX_MEDICINE_TEXT_LEN {
        return Err(AppError::out_of_range(
            field,
            format!("must be at most {MAX_MEDICINE_TEXT_LEN} characters"),
        ));
    }
    Ok(value.to_owned())
}

impl MedicineEntry {
    /// Build an untaken entry from client input
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when name, dosage, or time is absent or
    /// blank, and `ValueOutOfRange` for overlong text
    pub fn from_input(
        user_id: impl Into<String>,
        date: NaiveDate,
        input: &MedicineInput,
    ) -> AppResult<Self> {
        let name = require_text(input.name.as_deref(), "name")?;
        let dosage = require_text(input.dosage.as_deref(), "dosage")?;
        let time = input.time.ok_or_else(|| AppError::missing_field("time"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            date,
            name,
            dosage,
            time,
            taken: false,
        })
    }
}
