// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::atomic::Ordering;

use serde_json::json;

use super::*;
use crate::test_support::MockBcs;

const ID_A: &str = "6f1d2c3b-4a59-4e8f-9b7a-0c1d2e3f4a5b";
const ID_B: &str = "0b5a3a2e-8f0c-4d7e-9a53-1a2b3c4d5e6f";

#[test]
fn catalogue_lists_thirteen_unique_tools() {
    let tools = catalog::descriptors();
    assert_eq!(tools.len(), 13);
    let mut names: Vec<&str> = tools.iter().map(|t| t.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 13);
    for t in &tools {
        assert_eq!(t.input_schema["type"], "object", "{}", t.name);
    }
}

#[test]
fn descriptor_serializes_input_schema_camel_case() -> anyhow::Result<()> {
    let tools = catalog::descriptors();
    let create = tools.iter().find(|t| t.name == "create_order").ok_or_else(|| anyhow::anyhow!("missing"))?;
    let value = serde_json::to_value(create)?;
    assert!(value.get("inputSchema").is_some());
    assert_eq!(value["inputSchema"]["properties"]["side"]["enum"], json!(["1", "2"]));
    Ok(())
}

#[test]
fn failure_output_sets_is_error() {
    let out = ToolOutput::failure("BCS API GET /x -> 500: boom").into_result();
    assert_eq!(out["isError"], true);
    assert_eq!(out["content"][0]["type"], "text");
    assert_eq!(out["content"][0]["text"], "Error: BCS API GET /x -> 500: boom");

    let ok = ToolOutput::json(&json!({ "a": 1 })).into_result();
    assert!(ok.get("isError").is_none());
    assert_eq!(ok["content"][0]["text"], "{\n  \"a\": 1\n}");
}

#[tokio::test]
async fn portfolio_tool_returns_pretty_json() -> anyhow::Result<()> {
    let mock = MockBcs::start().await;
    mock.reply_with(200, r#"{"positions":[{"ticker":"SBER"}]}"#);
    let tools = TradeTools::new(mock.client());

    let out = tools.call("get_portfolio", Value::Null).await?;
    assert!(!out.is_error);
    let parsed: Value = serde_json::from_str(&out.text)?;
    assert_eq!(parsed["positions"][0]["ticker"], "SBER");
    assert!(out.text.contains('\n'));

    let req = mock.last();
    assert_eq!(req.path, "/trade-api-bff-portfolio/api/v1/portfolio");
    assert_eq!(req.authorization.as_deref(), Some("Bearer at-1"));
    Ok(())
}

#[tokio::test]
async fn create_order_sends_numeric_side_and_type() -> anyhow::Result<()> {
    let mock = MockBcs::start().await;
    let tools = TradeTools::new(mock.client());

    let args = json!({
        "clientOrderId": ID_A,
        "side": "2",
        "orderType": "1",
        "orderQuantity": 5,
        "ticker": "GAZP",
        "classCode": "TQBR",
    });
    let out = tools.call("create_order", args).await?;
    assert!(!out.is_error, "{}", out.text);

    let req = mock.last();
    assert_eq!(req.method, "POST");
    assert_eq!(req.body["side"], 2);
    assert_eq!(req.body["orderType"], 1);
    assert_eq!(req.body["clientOrderId"], ID_A);
    Ok(())
}

#[tokio::test]
async fn cancel_order_posts_new_client_id() -> anyhow::Result<()> {
    let mock = MockBcs::start().await;
    let tools = TradeTools::new(mock.client());

    let args = json!({ "originalClientOrderId": ID_A, "clientOrderId": ID_B });
    tools.call("cancel_order", args).await?;

    let req = mock.last();
    assert_eq!(req.path, format!("/trade-api-bff-operations/api/v1/orders/{ID_A}/cancel"));
    assert_eq!(req.body, json!({ "clientOrderId": ID_B }));
    Ok(())
}

#[tokio::test]
async fn api_failure_is_tool_error_not_protocol_error() -> anyhow::Result<()> {
    let mock = MockBcs::start().await;
    mock.reply_with(403, "insufficient scope");
    let tools = TradeTools::new(mock.client());

    let out = tools.call("get_limits", json!({})).await?;
    assert!(out.is_error);
    assert!(out.text.starts_with("Error: "));
    assert!(out.text.contains("403"));
    assert!(out.text.contains("insufficient scope"));
    Ok(())
}

#[tokio::test]
async fn invalid_arguments_never_reach_upstream() {
    let mock = MockBcs::start().await;
    let tools = TradeTools::new(mock.client());

    let err = tools
        .call("get_order_status", json!({ "originalClientOrderId": "nope" }))
        .await
        .expect_err("rejected");
    assert!(matches!(err, ToolError::InvalidArguments { .. }));
    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 0);
    assert!(mock.requests.lock().is_empty());
}

#[tokio::test]
async fn unknown_tool_is_error() {
    let mock = MockBcs::start().await;
    let tools = TradeTools::new(mock.client());
    let err = tools.call("place_bet", json!({})).await.expect_err("unknown");
    assert_eq!(err, ToolError::UnknownTool("place_bet".into()));
}

#[tokio::test]
async fn authenticate_reports_expiry_and_scope() -> anyhow::Result<()> {
    let mock = MockBcs::start().await;
    let client = mock.client();
    let tools = TradeTools::new(Arc::clone(&client));

    let out = tools.call("authenticate", json!({})).await?;
    let parsed: Value = serde_json::from_str(&out.text)?;
    assert_eq!(parsed["expires_in"], 3600);
    assert_eq!(parsed["scope"], "openid trade-api-read");
    assert!(parsed.get("access_token").is_none());

    // Subsequent calls reuse the token minted by the manual renewal.
    tools.call("get_discounts", json!({})).await?;
    assert_eq!(mock.token_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer at-1"));
    Ok(())
}

#[tokio::test]
async fn instruments_by_type_joins_categories() -> anyhow::Result<()> {
    let mock = MockBcs::start().await;
    let tools = TradeTools::new(mock.client());

    tools
        .call("search_instruments_by_type", json!({ "type": ["BONDS", "ETF"] }))
        .await?;
    assert_eq!(mock.last().query.as_deref(), Some("type=BONDS%2CETF"));
    Ok(())
}
