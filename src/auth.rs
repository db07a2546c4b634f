// ABOUTME: Caller identification from the user header set by the upstream authentication gateway
// ABOUTME: Token verification happens before requests reach this service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! # Caller Authentication
//!
//! Requests arrive through a gateway that has already verified the caller's
//! token and forwards the user identifier in the `x-user-id` header. This
//! module only extracts and sanity-checks that identifier.

use crate::constants::headers::USER_ID;
use crate::errors::{AppError, AppResult};
use axum::http::HeaderMap;
use tracing::debug;

/// Longest user identifier accepted from the gateway
const MAX_USER_ID_LEN: usize = 128;

/// Result of a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user identifier
    pub user_id: String,
}

/// Extract the authenticated user from request headers
///
/// # Errors
///
/// Returns `AuthRequired` when the header is absent and `AuthInvalid` when
/// it is empty, not valid UTF-8, too long, or contains whitespace
pub fn authenticate(headers: &HeaderMap) -> AppResult<AuthResult> {
    let value = headers.get(USER_ID).ok_or_else(AppError::auth_required)?;
    let user_id = value
        .to_str()
        .map_err(|_| AppError::auth_invalid("User header is not valid UTF-8"))?
        .trim();

    if user_id.is_empty() {
        return Err(AppError::auth_invalid("User header is empty"));
    }
    if user_id.len() > MAX_USER_ID_LEN || user_id.chars().any(char::is_whitespace) {
        return Err(AppError::auth_invalid("User header is malformed"));
    }

    debug!(user.id = %user_id, "Authenticated request");
    Ok(AuthResult {
        user_id: user_id.to_owned(),
    })
}
