// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Failure of the refresh-token exchange.
///
/// `Clone` because a single renewal outcome is handed to every caller that
/// was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token endpoint answered with a non-2xx status.
    Rejected { status: u16, body: String },
    /// The exchange never produced a response (connect, TLS, I/O).
    Transport(String),
    /// A 2xx response whose body could not be decoded.
    InvalidResponse(String),
}

impl AuthError {
    /// HTTP status reported by the token endpoint, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, body } => write!(f, "auth failed ({status}): {body}"),
            Self::Transport(msg) => write!(f, "auth request failed: {msg}"),
            Self::InvalidResponse(msg) => write!(f, "auth response invalid: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// A remote API call answered with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BCS API {} {} -> {}: {}", self.method, self.path, self.status, self.body)
    }
}

impl std::error::Error for ApiError {}

/// Any failure of an outbound call through [`crate::http::ApiClient`].
#[derive(Debug)]
pub enum ClientError {
    Auth(AuthError),
    Api(ApiError),
    /// Request could not be built or sent.
    Transport(reqwest::Error),
    /// 2xx response with a body that is not valid JSON.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(e) => e.fmt(f),
            Self::Api(e) => e.fmt(f),
            Self::Transport(e) => write!(f, "request failed: {e}"),
            Self::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Auth(e) => Some(e),
            Self::Api(e) => Some(e),
            Self::Transport(e) => Some(e),
            Self::Decode(_) => None,
        }
    }
}

impl From<AuthError> for ClientError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<ApiError> for ClientError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}
