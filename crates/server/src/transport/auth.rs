// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional bearer auth for MCP clients.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::AppState;
use crate::error::ErrorCode;

/// Routes reachable without a token.
const PUBLIC_PATHS: &[&str] = &["/health"];

/// Compare in time independent of where the first mismatch is.
fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.len() == expected.len()
        && presented.bytes().zip(expected.bytes()).fold(0u8, |diff, (p, e)| diff | (p ^ e)) == 0
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION)?.to_str().ok()?.strip_prefix("Bearer ")
}

/// Check the request's bearer token. `expected == None` disables auth.
pub fn check_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ErrorCode> {
    match expected {
        None => Ok(()),
        Some(expected) => match bearer_token(headers) {
            Some(token) if tokens_match(token, expected) => Ok(()),
            _ => Err(ErrorCode::Unauthorized),
        },
    }
}

/// Middleware rejecting unauthenticated MCP traffic with a JSON-RPC 401.
pub async fn require_bearer(State(s): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let public = PUBLIC_PATHS.contains(&req.uri().path());
    match check_bearer(req.headers(), s.auth_token.as_deref()) {
        Err(code) if !public => code.to_http_response(Value::Null, "Unauthorized").into_response(),
        _ => next.run(req).await,
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
