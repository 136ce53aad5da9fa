// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fakes shared by the server's unit tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use bcs_client::credential::exchange::TOKEN_PATH;
use bcs_client::{BcsClient, ClientConfig};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::tools::{ToolDescriptor, ToolFuture, ToolOutput, Toolbox};
use crate::error::ToolError;

/// One API request observed by [`MockBcs`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

/// BCS stand-in: a token endpoint minting `at-<n>` plus a catch-all API
/// route answering with a configurable status and body.
pub struct MockBcs {
    pub addr: SocketAddr,
    pub token_calls: Arc<AtomicU32>,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    reply: Arc<Mutex<(u16, String)>>,
}

impl MockBcs {
    pub async fn start() -> Self {
        let token_calls = Arc::new(AtomicU32::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Mutex::new((200, r#"{"ok":true}"#.to_owned())));

        let calls = Arc::clone(&token_calls);
        let seen = Arc::clone(&requests);
        let answer = Arc::clone(&reply);
        let app = Router::new()
            .route(
                TOKEN_PATH,
                post(move || {
                    let calls = Arc::clone(&calls);
                    async move {
                        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                        Json(json!({
                            "access_token": format!("at-{n}"),
                            "expires_in": 3600,
                            "refresh_token": format!("rt-{n}"),
                            "token_type": "Bearer",
                            "scope": "openid trade-api-read",
                        }))
                    }
                }),
            )
            .fallback(move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
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
                        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
                    });
                    let (status, text) = answer.lock().clone();
                    (StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), text)
                }
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, token_calls, requests, reply }
    }

    pub fn reply_with(&self, status: u16, body: &str) {
        *self.reply.lock() = (status, body.to_owned());
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().expect("no request recorded")
    }

    pub fn client(&self) -> Arc<BcsClient> {
        let config = ClientConfig {
            base_url: format!("http://{}", self.addr),
            client_id: "trade-api-read".to_owned(),
            refresh_token: "rt-0".to_owned(),
        };
        Arc::new(BcsClient::new(config).expect("client"))
    }
}

/// Toolbox with one `echo` tool and no network access.
pub struct EchoToolbox;

impl Toolbox for EchoToolbox {
    fn list(&self) -> Vec<ToolDescriptor> {
        vec![ToolDescriptor {
            name: "echo",
            description: "Echo the arguments back",
            input_schema: json!({ "type": "object" }),
        }]
    }

    fn call<'a>(&'a self, name: &'a str, args: Value) -> ToolFuture<'a> {
        Box::pin(async move {
            match name {
                "echo" => Ok(ToolOutput::json(&args)),
                "fail" => Ok(ToolOutput::failure("upstream said no")),
                _ => Err(ToolError::UnknownTool(name.to_owned())),
            }
        })
    }
}
