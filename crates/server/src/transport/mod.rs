// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP and stdio bindings onto the session router.

pub mod auth;
pub mod sse;
pub mod stdio;
pub mod streamable;

use std::sync::Arc;

use axum::extract::State;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::session::{SessionRouter, TransportKind};

/// Header carrying the session id on the streamable HTTP binding.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Shared state for the HTTP bindings.
pub struct AppState {
    pub router: Arc<SessionRouter>,
    /// Bearer token required from clients. `None` disables auth.
    pub auth_token: Option<String>,
    pub transport: TransportKind,
}

/// Build the axum `Router` for the configured binding.
pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        // Health (no auth)
        .route("/health", get(health))
        .route("/sessions", get(list_sessions));

    let routes = match state.transport {
        TransportKind::Sse => routes
            .route("/sse", get(sse::open_stream))
            .route("/messages", post(sse::post_message)),
        _ => routes.route(
            "/mcp",
            post(streamable::post_message)
                .get(streamable::open_stream)
                .delete(streamable::delete_session),
        ),
    };

    routes
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "transport": s.transport.as_str(),
        "sessions": s.router.len(),
    }))
}

async fn list_sessions(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    Json(s.router.list())
}
