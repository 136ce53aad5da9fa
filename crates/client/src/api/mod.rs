// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request formatting for the BCS REST surface.
//!
//! Each module borrows the shared [`ApiClient`](crate::http::ApiClient) and
//! returns the decoded JSON body as-is.

mod instruments;
mod margin;
mod market_data;
mod orders;
mod portfolio;
mod schedule;

pub use instruments::InstrumentsApi;
pub use margin::MarginApi;
pub use market_data::MarketDataApi;
pub use orders::OrdersApi;
pub use portfolio::PortfolioApi;
pub use schedule::ScheduleApi;

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

// -- Orders -------------------------------------------------------------------

/// Order direction. Serialized as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy = 1,
    Sell = 2,
}

/// Order kind. Serialized as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market = 1,
    Limit = 2,
}

impl Serialize for OrderSide {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(*self as u8)
    }
}

impl Serialize for OrderType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(*self as u8)
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub client_order_id: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub order_quantity: u64,
    pub ticker: String,
    pub class_code: String,
    /// Required for limit orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Body of `POST /orders/{id}` (cancel-and-replace).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderRequest {
    pub client_order_id: String,
    pub price: f64,
    pub order_quantity: u64,
    pub class_code: String,
}

// -- Market data --------------------------------------------------------------

/// Candle interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrame {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D,
    W,
    MN,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 9] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H4,
        Self::D,
        Self::W,
        Self::MN,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M5 => "M5",
            Self::M15 => "M15",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H4 => "H4",
            Self::D => "D",
            Self::W => "W",
            Self::MN => "MN",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query for historical OHLCV candles. Dates are ISO 8601 strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandlesRequest {
    pub class_code: String,
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    pub time_frame: TimeFrame,
}

// -- Instruments --------------------------------------------------------------

/// Instrument category accepted by the `by-type` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    Currency,
    Stock,
    ForeignStock,
    Bonds,
    Notes,
    DepositaryReceipts,
    EuroBonds,
    MutualFunds,
    Etf,
    Futures,
    Options,
    Goods,
    Indices,
}

impl InstrumentType {
    pub const ALL: [InstrumentType; 13] = [
        Self::Currency,
        Self::Stock,
        Self::ForeignStock,
        Self::Bonds,
        Self::Notes,
        Self::DepositaryReceipts,
        Self::EuroBonds,
        Self::MutualFunds,
        Self::Etf,
        Self::Futures,
        Self::Options,
        Self::Goods,
        Self::Indices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "CURRENCY",
            Self::Stock => "STOCK",
            Self::ForeignStock => "FOREIGN_STOCK",
            Self::Bonds => "BONDS",
            Self::Notes => "NOTES",
            Self::DepositaryReceipts => "DEPOSITARY_RECEIPTS",
            Self::EuroBonds => "EURO_BONDS",
            Self::MutualFunds => "MUTUAL_FUNDS",
            Self::Etf => "ETF",
            Self::Futures => "FUTURES",
            Self::Options => "OPTIONS",
            Self::Goods => "GOODS",
            Self::Indices => "INDICES",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
