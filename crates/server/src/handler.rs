// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session MCP protocol handler.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ErrorCode;
use crate::protocol::{
    negotiate_version, InitializeParams, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse,
};
use crate::tools::Toolbox;

pub const SERVER_NAME: &str = "bcs-trade-api";

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Protocol state for exactly one session. Never shared between sessions.
pub struct McpHandler {
    toolbox: Arc<dyn Toolbox>,
    protocol_version: Option<&'static str>,
    client_info: Option<Value>,
    initialized: bool,
}

impl McpHandler {
    pub fn new(toolbox: Arc<dyn Toolbox>) -> Self {
        Self { toolbox, protocol_version: None, client_info: None, initialized: false }
    }

    /// Revision agreed during `initialize`, if it happened.
    pub fn protocol_version(&self) -> Option<&'static str> {
        self.protocol_version
    }

    pub fn client_info(&self) -> Option<&Value> {
        self.client_info.as_ref()
    }

    /// Whether the client sent `notifications/initialized`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Process one message. Requests always yield a response; notifications
    /// and client responses yield `None`.
    pub async fn handle(&mut self, message: JsonRpcMessage) -> Option<JsonRpcResponse> {
        match message {
            JsonRpcMessage::Request(req) => Some(self.request(req).await),
            JsonRpcMessage::Notification(n) => {
                self.notification(n);
                None
            }
            JsonRpcMessage::Response(_) => None,
        }
    }

    async fn request(&mut self, req: JsonRpcRequest) -> JsonRpcResponse {
        let JsonRpcRequest { id, method, params } = req;
        let outcome = match method.as_str() {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.toolbox.list() })),
            "tools/call" => self.call_tool(params).await,
            other => Err((ErrorCode::MethodNotFound, format!("Method not found: {other}"))),
        };
        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::failure(id, code.to_rpc_error(message)),
        }
    }

    fn notification(&mut self, n: JsonRpcNotification) {
        match n.method.as_str() {
            "notifications/initialized" => self.initialized = true,
            other => debug!(method = other, "ignoring notification"),
        }
    }

    fn initialize(&mut self, params: Value) -> Result<Value, (ErrorCode, String)> {
        let params = InitializeParams::decode(&params)
            .map_err(|e| (ErrorCode::InvalidParams, format!("invalid initialize params: {e}")))?;

        let version = negotiate_version(params.protocol_version.as_deref());
        self.protocol_version = Some(version);
        self.client_info = params.client_info;

        Ok(json!({
            "protocolVersion": version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        }))
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (ErrorCode, String)> {
        let params: CallParams = serde_json::from_value(params)
            .map_err(|e| (ErrorCode::InvalidParams, format!("invalid tools/call params: {e}")))?;
        debug!(tool = %params.name, "tools/call");
        match self.toolbox.call(&params.name, params.arguments).await {
            Ok(output) => Ok(output.into_result()),
            Err(e) => Err((e.code(), e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
