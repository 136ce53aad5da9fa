// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access-credential lifecycle.
//!
//! Holds the refresh token for one client identity and mints short-lived
//! access tokens from it on demand. Renewal is single-flight: whoever finds
//! the cached token stale starts one exchange, and every caller that arrives
//! while it is pending awaits that same exchange and sees its outcome.
//!
//! No timeout is applied to the exchange. A token endpoint that never answers
//! blocks every waiting caller.

pub mod exchange;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{FutureExt, Shared};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub use exchange::{HttpTokenExchange, TokenExchange, TokenResponse};

use crate::error::AuthError;

/// An access token is considered stale this long before its reported expiry.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

type RenewalFuture = Pin<Box<dyn Future<Output = Result<Credentials, AuthError>> + Send>>;
type SharedRenewal = Shared<RenewalFuture>;

/// Result of a successful renewal. The refresh token is never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl From<TokenResponse> for Credentials {
    fn from(t: TokenResponse) -> Self {
        Self {
            access_token: t.access_token,
            expires_in: t.expires_in,
            refresh_expires_in: t.refresh_expires_in,
            token_type: t.token_type,
            scope: t.scope,
        }
    }
}

/// Point-in-time view of the manager, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub has_access_token: bool,
    /// Seconds until the cached token goes stale; `None` when absent or stale.
    pub fresh_for_secs: Option<u64>,
    pub renewing: bool,
    pub renewals: u64,
}

/// Owns the access/refresh credential pair for one client identity.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct CredentialManager {
    inner: Arc<Inner>,
}

struct Inner {
    client_id: String,
    exchange: Arc<dyn TokenExchange>,
    state: Mutex<CredentialState>,
}

struct CredentialState {
    access_token: Option<String>,
    access_expires_at: Option<Instant>,
    refresh_token: String,
    in_flight: Option<SharedRenewal>,
    renewals: u64,
}

impl CredentialState {
    fn fresh_token(&self, now: Instant) -> Option<&str> {
        match (&self.access_token, self.access_expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token),
            _ => None,
        }
    }
}

impl CredentialManager {
    pub fn new(
        client_id: impl Into<String>,
        refresh_token: impl Into<String>,
        exchange: Arc<dyn TokenExchange>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                client_id: client_id.into(),
                exchange,
                state: Mutex::new(CredentialState {
                    access_token: None,
                    access_expires_at: None,
                    refresh_token: refresh_token.into(),
                    in_flight: None,
                    renewals: 0,
                }),
            }),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    /// Return a fresh access token, renewing first if the cached one is
    /// missing or stale.
    pub async fn ensure_valid(&self) -> Result<String, AuthError> {
        let renewal = {
            let mut state = self.inner.state.lock();
            if let Some(token) = state.fresh_token(Instant::now()) {
                return Ok(token.to_owned());
            }
            self.join_or_start(&mut state)
        };
        renewal.await.map(|creds| creds.access_token)
    }

    /// Exchange the refresh token now, regardless of freshness.
    ///
    /// Joins the pending renewal when one is already running, so a manual
    /// trigger can never race an automatic one over the rotated refresh token.
    pub async fn renew(&self) -> Result<Credentials, AuthError> {
        let renewal = {
            let mut state = self.inner.state.lock();
            self.join_or_start(&mut state)
        };
        renewal.await
    }

    pub fn status(&self) -> CredentialStatus {
        let state = self.inner.state.lock();
        let now = Instant::now();
        CredentialStatus {
            has_access_token: state.access_token.is_some(),
            fresh_for_secs: state
                .fresh_token(now)
                .and(state.access_expires_at)
                .map(|at| at.saturating_duration_since(now).as_secs()),
            renewing: state.in_flight.is_some(),
            renewals: state.renewals,
        }
    }

    fn join_or_start(&self, state: &mut CredentialState) -> SharedRenewal {
        if let Some(pending) = &state.in_flight {
            debug!("joining in-flight credential renewal");
            return pending.clone();
        }

        let inner = Arc::clone(&self.inner);
        let refresh_token = state.refresh_token.clone();
        let renewal: RenewalFuture = Box::pin(async move { inner.run_renewal(refresh_token).await });
        let shared = renewal.shared();
        state.in_flight = Some(shared.clone());
        shared
    }
}

impl Inner {
    async fn run_renewal(&self, refresh_token: String) -> Result<Credentials, AuthError> {
        debug!(client_id = %self.client_id, "renewing access credential");
        let result = self.exchange.exchange(&self.client_id, &refresh_token).await;
        let received_at = Instant::now();
        let result = result.and_then(|token| match stale_at(received_at, token.expires_in) {
            Some(at) => Ok((token, at)),
            None => Err(AuthError::InvalidResponse(format!(
                "expires_in out of range: {}",
                token.expires_in
            ))),
        });

        let mut state = self.state.lock();
        state.in_flight = None;
        match result {
            Ok((token, expires_at)) => {
                state.access_token = Some(token.access_token.clone());
                state.access_expires_at = Some(expires_at);
                if let Some(ref rotated) = token.refresh_token {
                    state.refresh_token = rotated.clone();
                }
                state.renewals += 1;
                info!(expires_in = token.expires_in, "access credential renewed");
                Ok(Credentials::from(token))
            }
            Err(e) => {
                warn!(err = %e, "access credential renewal failed");
                Err(e)
            }
        }
    }
}

/// Instant from which a token received at `received_at` must not be used.
/// `None` when `expires_in` does not fit the clock.
pub(crate) fn stale_at(received_at: Instant, expires_in: u64) -> Option<Instant> {
    received_at.checked_add(Duration::from_secs(expires_in).saturating_sub(EXPIRY_MARGIN))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
