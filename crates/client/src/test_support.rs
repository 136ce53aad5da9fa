// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fakes shared by the client's unit tests.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::credential::{TokenExchange, TokenResponse};
use crate::error::AuthError;
use crate::{BcsClient, ClientConfig};

/// Token exchange that always succeeds with `at-<n>`.
#[derive(Default)]
pub struct CountingExchange {
    pub calls: AtomicU32,
}

impl TokenExchange for CountingExchange {
    fn exchange<'a>(
        &'a self,
        _client_id: &'a str,
        _refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<TokenResponse, AuthError>> + Send + 'a>> {
        Box::pin(async move {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(TokenResponse {
                access_token: format!("at-{n}"),
                expires_in: 3600,
                refresh_token: None,
                refresh_expires_in: None,
                token_type: Some("Bearer".to_owned()),
                not_before_policy: None,
                session_state: None,
                scope: Some("openid".to_owned()),
            })
        })
    }
}

/// One request observed by [`MockApi`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Catch-all BCS API stand-in that records requests and answers with a
/// configurable status and body.
pub struct MockApi {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    reply: Arc<Mutex<(u16, String)>>,
}

impl MockApi {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Mutex::new((200, r#"{"ok":true}"#.to_owned())));

        let seen = Arc::clone(&requests);
        let answer = Arc::clone(&reply);
        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
                let seen = Arc::clone(&seen);
                let answer = Arc::clone(&answer);
                async move {
                    seen.lock().push(Recorded {
                        method: method.to_string(),
                        path: uri.path().to_owned(),
                        query: uri.query().map(str::to_owned),
                        authorization: headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned),
                        body: String::from_utf8_lossy(&body).into_owned(),
                    });
                    let (status, text) = answer.lock().clone();
                    (StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), text)
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, requests, reply }
    }

    pub fn reply_with(&self, status: u16, body: &str) {
        *self.reply.lock() = (status, body.to_owned());
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().expect("no request recorded")
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client pointed at this mock with a counting token exchange.
    pub fn client(&self) -> (BcsClient, Arc<CountingExchange>) {
        crate::ensure_crypto();
        let exchange = Arc::new(CountingExchange::default());
        let config = ClientConfig {
            base_url: self.base_url(),
            client_id: "trade-api-read".to_owned(),
            refresh_token: "rt".to_owned(),
        };
        let http = reqwest::Client::builder().build().expect("client");
        let client =
            BcsClient::with_exchange(config, http, Arc::clone(&exchange) as Arc<dyn TokenExchange>);
        (client, exchange)
    }
}
