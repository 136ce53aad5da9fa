// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::Method;

use crate::error::ClientError;
use crate::http::{ApiClient, RequestOptions};

/// Portfolio positions and trading limits.
pub struct PortfolioApi<'a> {
    http: &'a ApiClient,
}

impl<'a> PortfolioApi<'a> {
    pub(crate) fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    /// Positions, valuations and P/L of the brokerage account.
    pub async fn portfolio(&self) -> Result<serde_json::Value, ClientError> {
        self.http
            .request(Method::GET, "/trade-api-bff-portfolio/api/v1/portfolio", RequestOptions::default())
            .await
    }

    /// Depo, money and futures limits.
    pub async fn limits(&self) -> Result<serde_json::Value, ClientError> {
        self.http
            .request(Method::GET, "/trade-api-bff-limit/api/v1/limits", RequestOptions::default())
            .await
    }
}
