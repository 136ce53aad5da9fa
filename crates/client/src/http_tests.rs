// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::atomic::Ordering;

use reqwest::Method;

use super::*;
use crate::test_support::MockApi;

#[tokio::test]
async fn request_sends_bearer_from_credential_manager() {
    let mock = MockApi::start().await;
    let (client, exchange) = mock.client();

    let value = client
        .http()
        .request(Method::GET, "/some/path", RequestOptions::default())
        .await
        .expect("request");

    assert_eq!(value, serde_json::json!({ "ok": true }));
    let req = mock.last();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/some/path");
    assert_eq!(req.authorization.as_deref(), Some("Bearer at-1"));
    assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cached_token_reused_across_requests() {
    let mock = MockApi::start().await;
    let (client, exchange) = mock.client();

    for _ in 0..5 {
        client.http().request(Method::GET, "/p", RequestOptions::default()).await.expect("request");
    }

    assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.requests.lock().len(), 5);
}

#[tokio::test]
async fn request_encodes_query_and_json_body() {
    let mock = MockApi::start().await;
    let (client, _exchange) = mock.client();

    let mut opts = RequestOptions::query([("a", "1"), ("b", "x y")]);
    opts.body = Some(serde_json::json!({ "k": "v" }));
    client.http().request(Method::POST, "/q", opts).await.expect("request");

    let req = mock.last();
    assert_eq!(req.query.as_deref(), Some("a=1&b=x+y"));
    assert_eq!(req.json_body(), serde_json::json!({ "k": "v" }));
}

#[tokio::test]
async fn non_2xx_is_api_error_with_context() {
    let mock = MockApi::start().await;
    mock.reply_with(403, "forbidden: trade-api-write required");
    let (client, exchange) = mock.client();

    let err = client
        .http()
        .request(Method::POST, "/trade-api-bff-operations/api/v1/orders", RequestOptions::default())
        .await
        .expect_err("should fail");

    match err {
        ClientError::Api(api) => {
            assert_eq!(api.method, "POST");
            assert_eq!(api.path, "/trade-api-bff-operations/api/v1/orders");
            assert_eq!(api.status, 403);
            assert_eq!(api.body, "forbidden: trade-api-write required");
        }
        other => unreachable!("expected ApiError, got {other}"),
    }
    // No re-authentication after a confirmed API error.
    assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.requests.lock().len(), 1);
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let mock = MockApi::start().await;
    mock.reply_with(200, "");
    let (client, _exchange) = mock.client();

    let value =
        client.http().request(Method::GET, "/e", RequestOptions::default()).await.expect("request");
    assert_eq!(value, serde_json::Value::Null);
}

#[tokio::test]
async fn invalid_json_success_body_is_decode_error() {
    let mock = MockApi::start().await;
    mock.reply_with(200, "<html>");
    let (client, _exchange) = mock.client();

    let err = client
        .http()
        .request(Method::GET, "/e", RequestOptions::default())
        .await
        .expect_err("should fail");
    assert!(matches!(err, ClientError::Decode(_)));
}
