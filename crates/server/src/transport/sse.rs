// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP+SSE push binding.
//!
//! `GET /sse` opens the session and announces its POST endpoint in a first
//! `endpoint` event. Client messages arrive on `POST /messages?sessionId=`
//! and every reply is pushed back on the stream as a `message` event.

use std::any::Any;
use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::{stream, StreamExt};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use super::AppState;
use crate::error::{ProtocolError, SessionError, TransportClosed};
use crate::protocol::JsonRpcMessage;
use crate::session::{SendFuture, SessionRouter, TransportHandle, TransportKind};

const STREAM_CAPACITY: usize = 64;

pub struct SseHandle {
    tx: mpsc::Sender<Value>,
    cancel: CancellationToken,
}

impl TransportHandle for SseHandle {
    fn kind(&self) -> TransportKind {
        TransportKind::Sse
    }

    fn send<'a>(&'a self, message: Value) -> SendFuture<'a> {
        Box::pin(async move {
            if self.cancel.is_cancelled() {
                return Err(TransportClosed);
            }
            self.tx.send(message).await.map_err(|_| TransportClosed)
        })
    }

    fn close(&self) {
        self.cancel.cancel();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Closes the session when the response stream is dropped, which is how
/// axum reports a client disconnect.
struct CloseOnDrop {
    router: Arc<SessionRouter>,
    id: String,
}

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        self.router.close_session(&self.id);
    }
}

/// `GET /sse`
pub async fn open_stream(State(s): State<Arc<AppState>>) -> Response {
    let (tx, rx) = mpsc::channel(STREAM_CAPACITY);
    let cancel = CancellationToken::new();
    let id = s.router.open_session(Box::new(SseHandle { tx, cancel: cancel.clone() }));
    let guard = CloseOnDrop { router: Arc::clone(&s.router), id: id.clone() };

    let endpoint = Event::default().event("endpoint").data(format!("/messages?sessionId={id}"));
    let messages = ReceiverStream::new(rx)
        .map(|msg| Event::default().event("message").data(msg.to_string()));
    let events = stream::once(async move { endpoint })
        .chain(messages)
        .take_until(cancel.cancelled_owned())
        .map(move |event| {
            let _guard = &guard;
            Ok::<_, Infallible>(event)
        });

    Sse::new(events).keep_alive(KeepAlive::default()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// `POST /messages?sessionId=<id>`
pub async fn post_message(
    State(s): State<Arc<AppState>>,
    Query(q): Query<MessagesQuery>,
    body: Bytes,
) -> Response {
    let Some(id) = q.session_id.filter(|id| !id.is_empty()) else {
        let e = ProtocolError::MissingSession;
        return e.code().to_http_response(Value::Null, e.to_string()).into_response();
    };
    if !s.router.contains(&id) {
        let e = SessionError::NotFound(id);
        return e.code().to_http_response(Value::Null, e.to_string()).into_response();
    }
    let message = match JsonRpcMessage::parse(&body) {
        Ok(m) => m,
        Err(e) => return e.code().to_http_response(Value::Null, e.to_string()).into_response(),
    };

    match s.router.route_and_push(&id, message).await {
        Ok(()) => (StatusCode::ACCEPTED, "Accepted").into_response(),
        Err(e) => e.code().to_http_response(Value::Null, e.to_string()).into_response(),
    }
}
