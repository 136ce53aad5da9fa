// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MCP tools backed by the BCS Trade API.

pub mod args;
pub mod catalog;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bcs_client::api::CandlesRequest;
use bcs_client::error::ClientError;
use bcs_client::BcsClient;
use serde_json::{json, Value};
use tracing::{debug, warn};

pub use self::catalog::ToolDescriptor;
use self::args::{
    parse, CancelOrderArgs, CandlesArgs, CreateOrderArgs, InstrumentTypeArgs, ModifyOrderArgs,
    NoArgs, OrderStatusArgs, ScheduleArgs, TickersArgs, TradingStatusArgs,
};
use crate::error::ToolError;

pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<ToolOutput, ToolError>> + Send + 'a>>;

/// Text content returned from a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    /// Pretty-printed JSON.
    pub fn json(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self { text, is_error: false }
    }

    /// A failure reported to the model rather than the protocol.
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self { text: format!("Error: {message}"), is_error: true }
    }

    /// `tools/call` result body.
    pub fn into_result(self) -> Value {
        let mut result = json!({ "content": [{ "type": "text", "text": self.text }] });
        if self.is_error {
            result["isError"] = Value::Bool(true);
        }
        result
    }
}

/// Tool registry seen by the protocol handler.
pub trait Toolbox: Send + Sync {
    fn list(&self) -> Vec<ToolDescriptor>;

    /// Run `name`. Unknown tools and malformed arguments are `Err`;
    /// upstream failures are an `Ok` output with `is_error` set.
    fn call<'a>(&'a self, name: &'a str, args: Value) -> ToolFuture<'a>;
}

/// The 13 trading tools, sharing one client across all sessions.
pub struct TradeTools {
    client: Arc<BcsClient>,
}

impl TradeTools {
    pub fn new(client: Arc<BcsClient>) -> Self {
        Self { client }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<ToolOutput, ToolError> {
        let client = &self.client;
        let result = match name {
            "authenticate" => {
                parse::<NoArgs>(name, args)?;
                return Ok(match client.authenticate().await {
                    Ok(creds) => ToolOutput::json(&json!({
                        "message": "Authenticated",
                        "expires_in": creds.expires_in,
                        "scope": creds.scope,
                    })),
                    Err(e) => {
                        warn!(err = %e, "manual authentication failed");
                        ToolOutput::failure(e)
                    }
                });
            }
            "get_portfolio" => {
                parse::<NoArgs>(name, args)?;
                client.portfolio().portfolio().await
            }
            "get_limits" => {
                parse::<NoArgs>(name, args)?;
                client.portfolio().limits().await
            }
            "create_order" => {
                let order = parse::<CreateOrderArgs>(name, args)?.into_request().map_err(
                    |reason| ToolError::InvalidArguments { tool: name.to_owned(), reason },
                )?;
                client.orders().create(&order).await
            }
            "modify_order" => {
                let (original, change) = parse::<ModifyOrderArgs>(name, args)?.into_request();
                client.orders().modify(&original, &change).await
            }
            "cancel_order" => {
                let a = parse::<CancelOrderArgs>(name, args)?;
                client.orders().cancel(&a.original_client_order_id, &a.client_order_id).await
            }
            "get_order_status" => {
                let a = parse::<OrderStatusArgs>(name, args)?;
                client.orders().status(&a.original_client_order_id).await
            }
            "search_instruments_by_ticker" => {
                let a = parse::<TickersArgs>(name, args)?;
                client.instruments().by_tickers(&a.tickers).await
            }
            "search_instruments_by_type" => {
                let a = parse::<InstrumentTypeArgs>(name, args)?;
                client.instruments().by_type(&a.types, a.base_asset_ticker.as_deref()).await
            }
            "get_candles" => {
                let req = CandlesRequest::from(parse::<CandlesArgs>(name, args)?);
                client.market_data().candles(&req).await
            }
            "get_trading_schedule" => {
                let a = parse::<ScheduleArgs>(name, args)?;
                client.schedule().daily(&a.class_code, &a.ticker).await
            }
            "get_trading_status" => {
                let a = parse::<TradingStatusArgs>(name, args)?;
                client.schedule().status(&a.class_code).await
            }
            "get_discounts" => {
                parse::<NoArgs>(name, args)?;
                client.margin().discounts().await
            }
            _ => return Err(ToolError::UnknownTool(name.to_owned())),
        };
        Ok(finish(name, result))
    }
}

fn finish(tool: &str, result: Result<Value, ClientError>) -> ToolOutput {
    match result {
        Ok(value) => {
            debug!(tool, "tool call succeeded");
            ToolOutput::json(&value)
        }
        Err(e) => {
            warn!(tool, err = %e, "tool call failed");
            ToolOutput::failure(e)
        }
    }
}

impl Toolbox for TradeTools {
    fn list(&self) -> Vec<ToolDescriptor> {
        catalog::descriptors()
    }

    fn call<'a>(&'a self, name: &'a str, args: Value) -> ToolFuture<'a> {
        Box::pin(self.dispatch(name, args))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
