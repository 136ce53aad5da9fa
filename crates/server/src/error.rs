// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{JsonRpcError, JsonRpcResponse};

/// Error codes surfaced to MCP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    NoSession,
    SessionNotFound,
    Unauthorized,
    Internal,
}

impl ErrorCode {
    /// HTTP status when the condition ends the HTTP exchange. Method and
    /// parameter errors travel inside a normal 200 response.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ParseError | Self::InvalidRequest | Self::NoSession => 400,
            Self::MethodNotFound | Self::InvalidParams => 200,
            Self::SessionNotFound => 404,
            Self::Unauthorized => 401,
            Self::Internal => 500,
        }
    }

    pub fn rpc_code(&self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::Internal => -32603,
            Self::NoSession | Self::Unauthorized => -32000,
            Self::SessionNotFound => -32001,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::MethodNotFound => "METHOD_NOT_FOUND",
            Self::InvalidParams => "INVALID_PARAMS",
            Self::NoSession => "NO_SESSION",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Internal => "INTERNAL",
        }
    }

    pub fn to_rpc_error(&self, message: impl Into<String>) -> JsonRpcError {
        JsonRpcError { code: self.rpc_code(), message: message.into(), data: None }
    }

    /// JSON-RPC error envelope with the matching HTTP status. `id` is `null`
    /// when the failing message could not be attributed to a request.
    pub fn to_http_response(
        &self,
        id: Value,
        message: impl Into<String>,
    ) -> (StatusCode, Json<JsonRpcResponse>) {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(JsonRpcResponse::failure(id, self.to_rpc_error(message))))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup failure in the session router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Never issued, or already torn down.
    NotFound(String),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::SessionNotFound,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(_) => f.write_str("Session not found"),
        }
    }
}

impl std::error::Error for SessionError {}

/// A message rejected before any session state was touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Body was not JSON.
    Parse(String),
    /// JSON, but not a usable JSON-RPC 2.0 message.
    InvalidRequest(String),
    /// No session id and the message is not `initialize`.
    MissingSession,
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ErrorCode::ParseError,
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::MissingSession => ErrorCode::NoSession,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::InvalidRequest(e) => write!(f, "Invalid Request: {e}"),
            Self::MissingSession => f.write_str("Bad Request: No valid session ID provided"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// The client side of a transport is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportClosed;

impl fmt::Display for TransportClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("transport closed")
    }
}

impl std::error::Error for TransportClosed {}

/// Tool invocation rejected before reaching the BCS API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    UnknownTool(String),
    InvalidArguments { tool: String, reason: String },
}

impl ToolError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidParams
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "Tool {name} not found"),
            Self::InvalidArguments { tool, reason } => {
                write!(f, "Invalid arguments for tool {tool}: {reason}")
            }
        }
    }
}

impl std::error::Error for ToolError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
