// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool argument decoding and validation.

use bcs_client::api::{
    CandlesRequest, InstrumentType, ModifyOrderRequest, OrderRequest, OrderSide, OrderType,
    TimeFrame,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ToolError;

/// Checks that serde alone cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Decode `args` for `tool`. A missing arguments object is treated as `{}`.
pub fn parse<T: DeserializeOwned + Validate>(tool: &str, args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { Value::Object(Default::default()) } else { args };
    let invalid = |reason: String| ToolError::InvalidArguments { tool: tool.to_owned(), reason };
    let parsed: T = serde_json::from_value(args).map_err(|e| invalid(e.to_string()))?;
    parsed.validate().map_err(invalid)?;
    Ok(parsed)
}

fn uuid(field: &str, value: &str) -> Result<(), String> {
    // Hyphenated form only.
    if value.len() == 36 && uuid::Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(format!("{field} must be a UUID"))
    }
}

fn positive_qty(field: &str, value: u64) -> Result<(), String> {
    if value == 0 {
        return Err(format!("{field} must be a positive integer"));
    }
    Ok(())
}

fn positive_price(field: &str, value: f64) -> Result<(), String> {
    if !(value.is_finite() && value > 0.0) {
        return Err(format!("{field} must be greater than 0"));
    }
    Ok(())
}

fn order_side(value: &str) -> Result<OrderSide, String> {
    match value {
        "1" => Ok(OrderSide::Buy),
        "2" => Ok(OrderSide::Sell),
        other => Err(format!("side must be \"1\" (buy) or \"2\" (sell), got {other:?}")),
    }
}

fn order_type(value: &str) -> Result<OrderType, String> {
    match value {
        "1" => Ok(OrderType::Market),
        "2" => Ok(OrderType::Limit),
        other => Err(format!("orderType must be \"1\" (market) or \"2\" (limit), got {other:?}")),
    }
}

/// No arguments.
#[derive(Debug, Default, Deserialize)]
pub struct NoArgs {}

impl Validate for NoArgs {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderArgs {
    pub client_order_id: String,
    pub side: String,
    pub order_type: String,
    pub order_quantity: u64,
    pub ticker: String,
    pub class_code: String,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Validate for CreateOrderArgs {
    fn validate(&self) -> Result<(), String> {
        uuid("clientOrderId", &self.client_order_id)?;
        order_side(&self.side)?;
        order_type(&self.order_type)?;
        positive_qty("orderQuantity", self.order_quantity)?;
        if let Some(price) = self.price {
            positive_price("price", price)?;
        }
        Ok(())
    }
}

impl CreateOrderArgs {
    pub fn into_request(self) -> Result<OrderRequest, String> {
        Ok(OrderRequest {
            side: order_side(&self.side)?,
            order_type: order_type(&self.order_type)?,
            client_order_id: self.client_order_id,
            order_quantity: self.order_quantity,
            ticker: self.ticker,
            class_code: self.class_code,
            price: self.price,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderArgs {
    pub original_client_order_id: String,
    pub client_order_id: String,
    pub price: f64,
    pub order_quantity: u64,
    pub class_code: String,
}

impl Validate for ModifyOrderArgs {
    fn validate(&self) -> Result<(), String> {
        uuid("originalClientOrderId", &self.original_client_order_id)?;
        uuid("clientOrderId", &self.client_order_id)?;
        positive_price("price", self.price)?;
        positive_qty("orderQuantity", self.order_quantity)
    }
}

impl ModifyOrderArgs {
    pub fn into_request(self) -> (String, ModifyOrderRequest) {
        let change = ModifyOrderRequest {
            client_order_id: self.client_order_id,
            price: self.price,
            order_quantity: self.order_quantity,
            class_code: self.class_code,
        };
        (self.original_client_order_id, change)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderArgs {
    pub original_client_order_id: String,
    pub client_order_id: String,
}

impl Validate for CancelOrderArgs {
    fn validate(&self) -> Result<(), String> {
        uuid("originalClientOrderId", &self.original_client_order_id)?;
        uuid("clientOrderId", &self.client_order_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusArgs {
    pub original_client_order_id: String,
}

impl Validate for OrderStatusArgs {
    fn validate(&self) -> Result<(), String> {
        uuid("originalClientOrderId", &self.original_client_order_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct TickersArgs {
    pub tickers: Vec<String>,
}

impl Validate for TickersArgs {
    fn validate(&self) -> Result<(), String> {
        if self.tickers.is_empty() {
            return Err("tickers must contain at least one ticker".into());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentTypeArgs {
    #[serde(rename = "type")]
    pub types: Vec<InstrumentType>,
    #[serde(default)]
    pub base_asset_ticker: Option<String>,
}

impl Validate for InstrumentTypeArgs {
    fn validate(&self) -> Result<(), String> {
        if self.types.is_empty() {
            return Err("type must contain at least one instrument type".into());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlesArgs {
    pub ticker: String,
    pub class_code: String,
    pub start_date: String,
    pub end_date: String,
    pub time_frame: TimeFrame,
}

impl Validate for CandlesArgs {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl From<CandlesArgs> for CandlesRequest {
    fn from(a: CandlesArgs) -> Self {
        Self {
            class_code: a.class_code,
            ticker: a.ticker,
            start_date: a.start_date,
            end_date: a.end_date,
            time_frame: a.time_frame,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleArgs {
    pub class_code: String,
    pub ticker: String,
}

impl Validate for ScheduleArgs {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingStatusArgs {
    pub class_code: String,
}

impl Validate for TradingStatusArgs {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
