// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound request primitive shared by every API module.

use reqwest::Method;
use serde::Serialize;

use crate::credential::CredentialManager;
use crate::error::{ApiError, ClientError};

/// Optional query string and JSON body for [`ApiClient::request`].
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn query<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            query: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            body: None,
        }
    }

    pub fn json(body: &impl Serialize) -> Result<Self, ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Self { query: Vec::new(), body: Some(body) })
    }
}

/// Authenticated HTTP client for the BCS Trade API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    credentials: CredentialManager,
}

impl ApiClient {
    pub fn new(base_url: &str, http: reqwest::Client, credentials: CredentialManager) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), http, credentials }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Perform one authenticated call and decode the JSON response.
    ///
    /// The access token is renewed first when stale. A non-2xx answer is
    /// returned as [`ApiError`] and never retried.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<serde_json::Value, ClientError> {
        let token = self.credentials.ensure_valid().await?;

        let url = format!("{}{}", self.base_url, path);
        let url = if opts.query.is_empty() {
            reqwest::Url::parse(&url)
        } else {
            reqwest::Url::parse_with_params(&url, &opts.query)
        }
        .map_err(|e| ClientError::Decode(format!("invalid url {url}: {e}")))?;

        let mut req = self.http.request(method.clone(), url).bearer_auth(token);
        if let Some(ref body) = opts.body {
            req = req.json(body);
        }

        tracing::debug!(%method, path, "bcs api request");
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError {
                method: method.to_string(),
                path: path.to_owned(),
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
