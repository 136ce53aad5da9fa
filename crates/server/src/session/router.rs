// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session id to session mapping.
//!
//! Every teardown source (client DELETE, dropped stream, stdin EOF,
//! process shutdown) ends in [`SessionRouter::close_session`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{Session, SessionInfo, SessionState, TransportHandle};
use crate::error::{ProtocolError, SessionError};
use crate::handler::McpHandler;
use crate::protocol::{JsonRpcMessage, JsonRpcResponse};
use crate::tools::Toolbox;

pub struct SessionRouter {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    toolbox: Arc<dyn Toolbox>,
}

impl SessionRouter {
    pub fn new(toolbox: Arc<dyn Toolbox>) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), toolbox }
    }

    /// Register a connection under a freshly generated id with its own handler.
    pub fn open_session(&self, transport: Box<dyn TransportHandle>) -> String {
        let kind = transport.kind();
        let mut sessions = self.sessions.write();
        let id = loop {
            let candidate = uuid::Uuid::new_v4().to_string();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        let handler = McpHandler::new(Arc::clone(&self.toolbox));
        sessions.insert(id.clone(), Arc::new(Session::new(id.clone(), transport, handler)));
        drop(sessions);

        info!(session_id = %id, transport = kind.as_str(), "session opened");
        id
    }

    /// Open a session for a client that presented no id. Only a well-formed
    /// `initialize` qualifies; anything else is rejected before state is
    /// created. A session whose `initialize` still fails is closed again.
    pub async fn initiate(
        &self,
        message: JsonRpcMessage,
        transport: Box<dyn TransportHandle>,
    ) -> Result<(String, Option<JsonRpcResponse>), ProtocolError> {
        message.check_initiation()?;
        let id = self.open_session(transport);
        match self.route_message(&id, message).await {
            Ok(Some(response)) if response.is_error() => {
                self.close_session(&id);
                let reason = response.error.map(|e| e.message).unwrap_or_default();
                Err(ProtocolError::InvalidRequest(reason))
            }
            Ok(response) => Ok((id, response)),
            // Closed between open and first message.
            Err(_) => Err(ProtocolError::MissingSession),
        }
    }

    /// Hand `message` to the session's handler and return its reply.
    ///
    /// Messages for one session are processed one at a time in arrival order.
    pub async fn route_message(
        &self,
        id: &str,
        message: JsonRpcMessage,
    ) -> Result<Option<JsonRpcResponse>, SessionError> {
        let session = self.get(id).ok_or_else(|| SessionError::NotFound(id.to_owned()))?;
        let mut handler = session.handler.lock().await;
        self.process(&session, &mut handler, message).await
    }

    /// Like [`route_message`](Self::route_message), but the reply goes out on
    /// the session's own transport before the next message is taken. A
    /// transport that cannot deliver tears the session down.
    pub async fn route_and_push(
        &self,
        id: &str,
        message: JsonRpcMessage,
    ) -> Result<(), SessionError> {
        let session = self.get(id).ok_or_else(|| SessionError::NotFound(id.to_owned()))?;
        let mut handler = session.handler.lock().await;
        let Some(response) = self.process(&session, &mut handler, message).await? else {
            return Ok(());
        };
        let value = match serde_json::to_value(&response) {
            Ok(value) => value,
            Err(e) => {
                error!(session_id = %id, err = %e, "failed to encode response");
                return Ok(());
            }
        };
        if session.transport().send(value).await.is_err() {
            drop(handler);
            warn!(session_id = %id, "transport gone while pushing response");
            self.close_session(id);
        }
        Ok(())
    }

    async fn process(
        &self,
        session: &Session,
        handler: &mut McpHandler,
        message: JsonRpcMessage,
    ) -> Result<Option<JsonRpcResponse>, SessionError> {
        if session.state() == SessionState::Closed {
            return Err(SessionError::NotFound(session.id().to_owned()));
        }
        session.touch();

        let initiating = message.is_initialize();
        debug!(session_id = %session.id(), method = message.method().unwrap_or("-"), "routing");
        let response = handler.handle(message).await;
        if initiating && response.as_ref().is_some_and(|r| !r.is_error()) {
            session.mark_open();
        }
        Ok(response)
    }

    /// Push a server-initiated message to a session's client.
    pub async fn send(&self, id: &str, message: Value) -> Result<(), SessionError> {
        let session = self.get(id).ok_or_else(|| SessionError::NotFound(id.to_owned()))?;
        if session.transport().send(message).await.is_err() {
            self.close_session(id);
            return Err(SessionError::NotFound(id.to_owned()));
        }
        Ok(())
    }

    /// Remove and release a session. Safe to call repeatedly or
    /// concurrently; returns whether an entry was removed.
    pub fn close_session(&self, id: &str) -> bool {
        let Some(session) = self.sessions.write().remove(id) else {
            return false;
        };
        if session.mark_closed() {
            session.transport().close();
            info!(session_id = %id, "session closed");
        }
        true
    }

    /// Close every session. Used on process shutdown.
    pub fn close_all(&self) -> usize {
        let ids: Vec<String> = self.sessions.read().keys().cloned().collect();
        ids.iter().filter(|id| self.close_session(id)).count()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn list(&self) -> Vec<SessionInfo> {
        let mut list: Vec<SessionInfo> = self.sessions.read().values().map(|s| s.info()).collect();
        list.sort_by(|a, b| b.age_secs.cmp(&a.age_secs).then_with(|| a.id.cmp(&b.id)));
        list
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
