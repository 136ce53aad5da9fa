// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client for the BCS Trade API.
//!
//! [`BcsClient`] owns one [`credential::CredentialManager`] and hands an
//! authenticated [`http::ApiClient`] to each API module.

pub mod api;
pub mod credential;
pub mod error;
pub mod http;

#[cfg(test)]
mod test_support;

use std::sync::{Arc, Once};

use crate::api::{
    InstrumentsApi, MarginApi, MarketDataApi, OrdersApi, PortfolioApi, ScheduleApi,
};
use crate::credential::{CredentialManager, Credentials, HttpTokenExchange, TokenExchange};
use crate::error::{AuthError, ClientError};
use crate::http::ApiClient;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://be.broker.ru";

/// Default OAuth client identity (read-only scope).
pub const DEFAULT_CLIENT_ID: &str = "trade-api-read";

static CRYPTO_INIT: Once = Once::new();

/// Install the ring crypto provider for reqwest/rustls.
/// Safe to call multiple times; only the first call has effect.
pub fn ensure_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Connection settings for [`BcsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub client_id: String,
    pub refresh_token: String,
}

impl ClientConfig {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Facade over every API module, sharing one credential manager.
pub struct BcsClient {
    api: ApiClient,
}

impl BcsClient {
    /// Build a client that renews tokens against the BCS token endpoint.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        ensure_crypto();
        let http = reqwest::Client::builder().build()?;
        let exchange = Arc::new(HttpTokenExchange::new(http.clone(), &config.base_url));
        Ok(Self::with_exchange(config, http, exchange))
    }

    /// Build a client around a caller-supplied token exchange.
    pub fn with_exchange(
        config: ClientConfig,
        http: reqwest::Client,
        exchange: Arc<dyn TokenExchange>,
    ) -> Self {
        let credentials = CredentialManager::new(config.client_id, config.refresh_token, exchange);
        Self { api: ApiClient::new(&config.base_url, http, credentials) }
    }

    /// Force a refresh-token exchange (joins one already in flight).
    pub async fn authenticate(&self) -> Result<Credentials, AuthError> {
        self.api.credentials().renew().await
    }

    pub fn credentials(&self) -> &CredentialManager {
        self.api.credentials()
    }

    pub fn http(&self) -> &ApiClient {
        &self.api
    }

    pub fn portfolio(&self) -> PortfolioApi<'_> {
        PortfolioApi::new(&self.api)
    }

    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.api)
    }

    pub fn instruments(&self) -> InstrumentsApi<'_> {
        InstrumentsApi::new(&self.api)
    }

    pub fn market_data(&self) -> MarketDataApi<'_> {
        MarketDataApi::new(&self.api)
    }

    pub fn schedule(&self) -> ScheduleApi<'_> {
        ScheduleApi::new(&self.api)
    }

    pub fn margin(&self) -> MarginApi<'_> {
        MarginApi::new(&self.api)
    }
}
