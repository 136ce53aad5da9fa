// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Names, descriptions and input schemas advertised by `tools/list`.

use bcs_client::api::{InstrumentType, TimeFrame};
use serde::Serialize;
use serde_json::{json, Value};

/// One entry of the `tools/list` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn tool(name: &'static str, description: &'static str, input_schema: Value) -> ToolDescriptor {
    ToolDescriptor { name, description, input_schema }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "object", "properties": properties, "required": required })
}

fn empty() -> Value {
    object(json!({}), &[])
}

fn uuid_field(description: &str) -> Value {
    json!({ "type": "string", "format": "uuid", "description": description })
}

fn string_field(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    let time_frames: Vec<&str> = TimeFrame::ALL.iter().map(TimeFrame::as_str).collect();
    let instrument_types: Vec<&str> =
        InstrumentType::ALL.iter().map(InstrumentType::as_str).collect();

    vec![
        tool(
            "authenticate",
            "Exchange the refresh token for a new access token. Runs automatically on expiry; \
             call manually to check credentials.",
            empty(),
        ),
        tool(
            "get_portfolio",
            "Portfolio positions with valuations, P/L and weights for every asset on the account.",
            empty(),
        ),
        tool(
            "get_limits",
            "Limits: depoLimit (securities and currencies), moneyLimit (cash), futureHolding, \
             futuresLimit.",
            empty(),
        ),
        tool(
            "create_order",
            "Place a market or limit buy/sell order on MOEX. Requires the trade-api-write scope.",
            object(
                json!({
                    "clientOrderId": uuid_field("Client-generated unique order UUID"),
                    "side": { "type": "string", "enum": ["1", "2"], "description": "1 = buy, 2 = sell" },
                    "orderType": { "type": "string", "enum": ["1", "2"], "description": "1 = market, 2 = limit" },
                    "orderQuantity": { "type": "integer", "exclusiveMinimum": 0, "description": "Quantity in units" },
                    "ticker": string_field("Instrument ticker, e.g. SBER"),
                    "classCode": string_field("Board class code, e.g. TQBR"),
                    "price": { "type": "number", "exclusiveMinimum": 0, "description": "Limit price (required for limit orders)" }
                }),
                &["clientOrderId", "side", "orderType", "orderQuantity", "ticker", "classCode"],
            ),
        ),
        tool(
            "modify_order",
            "Replace an existing order (cancel and re-place). Requires the trade-api-write scope.",
            object(
                json!({
                    "originalClientOrderId": uuid_field("UUID of the order to replace"),
                    "clientOrderId": uuid_field("New UUID for the replacement order"),
                    "price": { "type": "number", "exclusiveMinimum": 0, "description": "New price" },
                    "orderQuantity": { "type": "integer", "exclusiveMinimum": 0, "description": "New quantity" },
                    "classCode": string_field("Board class code")
                }),
                &["originalClientOrderId", "clientOrderId", "price", "orderQuantity", "classCode"],
            ),
        ),
        tool(
            "cancel_order",
            "Cancel an existing order. Requires the trade-api-write scope.",
            object(
                json!({
                    "originalClientOrderId": uuid_field("UUID of the order to cancel"),
                    "clientOrderId": uuid_field("New UUID for the cancel request")
                }),
                &["originalClientOrderId", "clientOrderId"],
            ),
        ),
        tool(
            "get_order_status",
            "Order status: orderStatus 0=New, 1=PartiallyFill, 2=Fill, 4=Canceled, 5=Replaced, \
             8=Rejected.",
            object(
                json!({ "originalClientOrderId": uuid_field("UUID of the order to inspect") }),
                &["originalClientOrderId"],
            ),
        ),
        tool(
            "search_instruments_by_ticker",
            "Look up instruments by ticker: ISIN, face value, accrued interest, coupon rate, \
             maturity and more.",
            object(
                json!({
                    "tickers": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "Tickers, e.g. [\"SBER\", \"GAZP\"]"
                    }
                }),
                &["tickers"],
            ),
        ),
        tool(
            "search_instruments_by_type",
            "Search instruments by category (STOCK, BONDS, ETF, FUTURES, OPTIONS, ...). \
             OPTIONS needs baseAssetTicker.",
            object(
                json!({
                    "type": {
                        "type": "array",
                        "items": { "type": "string", "enum": instrument_types },
                        "minItems": 1,
                        "description": "Instrument categories"
                    },
                    "baseAssetTicker": string_field("Underlying ticker (required for OPTIONS)")
                }),
                &["type"],
            ),
        ),
        tool(
            "get_candles",
            "Historical OHLCV candles. Time frames: M1, M5, M15, M30, H1, H4, D, W, MN.",
            object(
                json!({
                    "ticker": string_field("Instrument ticker"),
                    "classCode": string_field("Board class code, e.g. TQBR"),
                    "startDate": string_field("Period start, ISO 8601, e.g. 2025-01-01T00:00:00Z"),
                    "endDate": string_field("Period end, ISO 8601, e.g. 2025-02-15T23:59:59Z"),
                    "timeFrame": { "type": "string", "enum": time_frames, "description": "Candle interval" }
                }),
                &["ticker", "classCode", "startDate", "endDate", "timeFrame"],
            ),
        ),
        tool(
            "get_trading_schedule",
            "Daily trading schedule: sessions, open/close times, trading-day flag.",
            object(
                json!({
                    "classCode": string_field("Board class code, e.g. TQBR"),
                    "ticker": string_field("Instrument ticker")
                }),
                &["classCode", "ticker"],
            ),
        ),
        tool(
            "get_trading_status",
            "Current trading status of a board: session type, OPEN/CLOSE.",
            object(
                json!({ "classCode": string_field("Board class code, e.g. TQBR (case-sensitive)") }),
                &["classCode"],
            ),
        ),
        tool(
            "get_discounts",
            "Margin discounts (long/short rates) for all instruments.",
            empty(),
        ),
    ]
}
