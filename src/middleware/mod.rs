// ABOUTME: HTTP middleware for cross-origin access and request correlation
// ABOUTME: CORS configuration and request ID assignment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

/// CORS configuration for browser clients
pub mod cors;
/// Request ID generation and propagation
pub mod request_id;

pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
