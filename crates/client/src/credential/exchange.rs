// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh-token exchange against the BCS Keycloak realm.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Token endpoint path, relative to the API base URL.
pub const TOKEN_PATH: &str = "/trade-api-keycloak/realms/tradeapi/protocol/openid-connect/token";

/// Body of a successful token response.
///
/// Only `access_token`, `expires_in` and `refresh_token` drive renewal; the
/// remaining fields are passed through to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, rename = "not-before-policy", skip_serializing_if = "Option::is_none")]
    pub not_before_policy: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Performs one refresh-token exchange.
///
/// Object-safe for use as `Arc<dyn TokenExchange>`.
pub trait TokenExchange: Send + Sync {
    fn exchange<'a>(
        &'a self,
        client_id: &'a str,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<TokenResponse, AuthError>> + Send + 'a>>;
}

/// [`TokenExchange`] over HTTP: form-encoded `grant_type=refresh_token`.
pub struct HttpTokenExchange {
    http: reqwest::Client,
    token_url: String,
}

impl HttpTokenExchange {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, token_url: format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/')) }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    async fn do_exchange(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse, AuthError> {
        let resp = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", client_id),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| AuthError::Transport(format!("read body: {e}")))?;

        if !status.is_success() {
            return Err(AuthError::Rejected { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }
}

impl TokenExchange for HttpTokenExchange {
    fn exchange<'a>(
        &'a self,
        client_id: &'a str,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<TokenResponse, AuthError>> + Send + 'a>> {
        Box::pin(self.do_exchange(client_id, refresh_token))
    }
}

#[cfg(test)]
#[path = "exchange_tests.rs"]
mod tests;
