// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-RPC 2.0 envelopes as used by MCP.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

pub const JSONRPC_VERSION: &str = "2.0";

/// Newest protocol revision this server speaks; offered when the client
/// asks for one we do not know.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

/// Method name of the session-initiating request.
pub const INITIALIZE: &str = "initialize";

/// `initialize` params. Absent params decode as all-default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub client_info: Option<Value>,
}

impl InitializeParams {
    pub fn decode(params: &Value) -> Result<Self, serde_json::Error> {
        if params.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(params)
    }
}

/// A request expecting a response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    pub id: Value,
    pub method: String,
    pub params: Value,
}

/// A fire-and-forget message.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcNotification {
    pub method: String,
    pub params: Value,
}

/// One inbound client message, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
    /// A reply to a server-initiated request. Accepted and dropped.
    Response(Value),
}

impl JsonRpcMessage {
    /// Decode raw body bytes. Not JSON at all is a parse error; JSON that is
    /// not a single JSON-RPC 2.0 object is an invalid request.
    pub fn parse(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| ProtocolError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut obj) = value else {
            if value.is_array() {
                return Err(ProtocolError::InvalidRequest("batch requests are not supported".into()));
            }
            return Err(ProtocolError::InvalidRequest("expected a JSON object".into()));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(ProtocolError::InvalidRequest("jsonrpc must be \"2.0\"".into()));
        }

        let id = obj.remove("id").filter(|id| !id.is_null());
        match obj.remove("method") {
            Some(Value::String(method)) => {
                let params = obj.remove("params").unwrap_or(Value::Null);
                Ok(match id {
                    Some(id) => Self::Request(JsonRpcRequest { id, method, params }),
                    None => Self::Notification(JsonRpcNotification { method, params }),
                })
            }
            Some(_) => Err(ProtocolError::InvalidRequest("method must be a string".into())),
            None if id.is_some() && (obj.contains_key("result") || obj.contains_key("error")) => {
                Ok(Self::Response(Value::Object(obj)))
            }
            None => Err(ProtocolError::InvalidRequest("missing method".into())),
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Request(req) => Some(&req.method),
            Self::Notification(n) => Some(&n.method),
            Self::Response(_) => None,
        }
    }

    /// Whether this is the request that may open a session.
    pub fn is_initialize(&self) -> bool {
        matches!(self, Self::Request(req) if req.method == INITIALIZE)
    }

    /// Accept this message as the first one of a new session: an
    /// `initialize` request whose params decode.
    pub fn check_initiation(&self) -> Result<InitializeParams, ProtocolError> {
        match self {
            Self::Request(req) if req.method == INITIALIZE => InitializeParams::decode(&req.params)
                .map_err(|e| ProtocolError::InvalidRequest(format!("invalid initialize params: {e}"))),
            _ => Err(ProtocolError::MissingSession),
        }
    }

    pub fn expects_response(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

/// Error object inside a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Outbound response. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_owned(), id, result: Some(result), error: None }
    }

    pub fn failure(id: Value, error: JsonRpcError) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_owned(), id, result: None, error: Some(error) }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Pick the protocol revision to answer `initialize` with.
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|r| SUPPORTED_PROTOCOL_VERSIONS.iter().copied().find(|v| *v == r))
        .unwrap_or(LATEST_PROTOCOL_VERSION)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
