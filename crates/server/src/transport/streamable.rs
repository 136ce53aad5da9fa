// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streamable HTTP binding: one `/mcp` endpoint, session id in the
//! `mcp-session-id` header.
//!
//! POST answers each request with a plain JSON body. GET opens an SSE
//! stream for server-initiated messages. DELETE ends the session.

use std::any::Any;
use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{AppState, SESSION_HEADER};
use crate::error::{ProtocolError, SessionError, TransportClosed};
use crate::protocol::{JsonRpcMessage, JsonRpcResponse};
use crate::session::{SendFuture, TransportHandle, TransportKind};

const STREAM_CAPACITY: usize = 64;

/// Server-to-client side of a streamable HTTP session. Replies to POSTs go
/// back in the HTTP response; only unsolicited messages use this handle.
pub struct StreamableHandle {
    tx: broadcast::Sender<Value>,
    cancel: CancellationToken,
}

impl StreamableHandle {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(STREAM_CAPACITY);
        Self { tx, cancel: CancellationToken::new() }
    }

    /// Stream of pushed messages, ending when the session closes.
    fn subscribe(&self) -> impl Stream<Item = Value> + Send + 'static {
        BroadcastStream::new(self.tx.subscribe())
            .filter_map(|m| async move { m.ok() })
            .take_until(self.cancel.clone().cancelled_owned())
    }
}

impl Default for StreamableHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportHandle for StreamableHandle {
    fn kind(&self) -> TransportKind {
        TransportKind::StreamableHttp
    }

    fn send<'a>(&'a self, message: Value) -> SendFuture<'a> {
        Box::pin(async move {
            if self.cancel.is_cancelled() {
                return Err(TransportClosed);
            }
            // No open GET stream: there is nobody to deliver to.
            if self.tx.send(message).is_err() {
                debug!("no listener for server-initiated message");
            }
            Ok(())
        })
    }

    fn close(&self) {
        self.cancel.cancel();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

fn with_session_header(mut resp: Response, id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(id) {
        resp.headers_mut().insert(SESSION_HEADER, value);
    }
    resp
}

fn reply(response: Option<JsonRpcResponse>) -> Response {
    match response {
        Some(r) => Json(r).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn protocol_error(e: ProtocolError) -> Response {
    e.code().to_http_response(Value::Null, e.to_string()).into_response()
}

fn session_error(e: SessionError) -> Response {
    e.code().to_http_response(Value::Null, e.to_string()).into_response()
}

/// `POST /mcp`
pub async fn post_message(
    State(s): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let message = match JsonRpcMessage::parse(&body) {
        Ok(m) => m,
        Err(e) => return protocol_error(e),
    };

    match session_id(&headers) {
        None => match s.router.initiate(message, Box::new(StreamableHandle::new())).await {
            Ok((id, response)) => with_session_header(reply(response), &id),
            Err(e) => protocol_error(e),
        },
        Some(id) => match s.router.route_message(&id, message).await {
            Ok(response) => with_session_header(reply(response), &id),
            Err(e) => session_error(e),
        },
    }
}

/// `GET /mcp`: standalone SSE stream for server-initiated messages.
pub async fn open_stream(State(s): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(id) = session_id(&headers) else {
        return protocol_error(ProtocolError::MissingSession);
    };
    let Some(session) = s.router.get(&id) else {
        return session_error(SessionError::NotFound(id));
    };
    let Some(handle) = session.transport().as_any().downcast_ref::<StreamableHandle>() else {
        return protocol_error(ProtocolError::InvalidRequest(format!(
            "session {id} has no streamable HTTP transport"
        )));
    };

    let events = handle.subscribe().map(|msg| {
        Ok::<_, Infallible>(Event::default().event("message").data(msg.to_string()))
    });
    with_session_header(Sse::new(events).keep_alive(KeepAlive::default()).into_response(), &id)
}

/// `DELETE /mcp`
pub async fn delete_session(State(s): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(id) = session_id(&headers) else {
        return protocol_error(ProtocolError::MissingSession);
    };
    if s.router.close_session(&id) {
        StatusCode::OK.into_response()
    } else {
        session_error(SessionError::NotFound(id))
    }
}
