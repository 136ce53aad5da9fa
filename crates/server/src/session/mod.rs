// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sessions and the transport capability they own.

pub mod router;

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

pub use self::router::SessionRouter;
use crate::error::TransportClosed;
use crate::handler::McpHandler;

pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), TransportClosed>> + Send + 'a>>;

/// Which binding a session arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    StreamableHttp,
    Sse,
    Stdio,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StreamableHttp => "streamable-http",
            Self::Sse => "sse",
            Self::Stdio => "stdio",
        }
    }
}

/// Server-to-client half of one connection.
///
/// The router only ever talks to a session's connection through this trait.
pub trait TransportHandle: Send + Sync + 'static {
    fn kind(&self) -> TransportKind;

    /// Deliver one server message to the client.
    fn send<'a>(&'a self, message: Value) -> SendFuture<'a>;

    /// Release the connection. Idempotent.
    fn close(&self);

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Uninitialized,
    Open,
    Closed,
}

/// Diagnostic snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub transport: TransportKind,
    pub state: SessionState,
    pub age_secs: u64,
    pub idle_secs: u64,
}

/// One client connection and its private protocol handler.
pub struct Session {
    id: String,
    transport: Box<dyn TransportHandle>,
    handler: tokio::sync::Mutex<McpHandler>,
    state: Mutex<SessionState>,
    created_at: Instant,
    last_activity: Mutex<Instant>,
}

impl Session {
    fn new(id: String, transport: Box<dyn TransportHandle>, handler: McpHandler) -> Self {
        let now = Instant::now();
        Self {
            id,
            transport,
            handler: tokio::sync::Mutex::new(handler),
            state: Mutex::new(SessionState::Uninitialized),
            created_at: now,
            last_activity: Mutex::new(now),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    pub fn transport(&self) -> &dyn TransportHandle {
        self.transport.as_ref()
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id.clone(),
            transport: self.transport.kind(),
            state: self.state(),
            age_secs: self.created_at.elapsed().as_secs(),
            idle_secs: self.last_activity.lock().elapsed().as_secs(),
        }
    }

    fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    fn mark_open(&self) {
        let mut state = self.state.lock();
        if *state == SessionState::Uninitialized {
            *state = SessionState::Open;
        }
    }

    /// Returns true only for the call that performed the transition.
    fn mark_closed(&self) -> bool {
        let mut state = self.state.lock();
        if *state == SessionState::Closed {
            return false;
        }
        *state = SessionState::Closed;
        true
    }
}
