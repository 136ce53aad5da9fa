// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::Method;

use crate::api::InstrumentType;
use crate::error::ClientError;
use crate::http::{ApiClient, RequestOptions};

const INSTRUMENTS_PATH: &str = "/trade-api-information-service/api/v1/instruments";

/// Instrument lookup by ticker or category.
pub struct InstrumentsApi<'a> {
    http: &'a ApiClient,
}

impl<'a> InstrumentsApi<'a> {
    pub(crate) fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    pub async fn by_tickers(&self, tickers: &[String]) -> Result<serde_json::Value, ClientError> {
        let body = serde_json::json!({ "tickers": tickers });
        let path = format!("{INSTRUMENTS_PATH}/by-tickers");
        self.http.request(Method::POST, &path, RequestOptions::json(&body)?).await
    }

    /// Search by category. Options additionally need the underlying ticker.
    pub async fn by_type(
        &self,
        types: &[InstrumentType],
        base_asset_ticker: Option<&str>,
    ) -> Result<serde_json::Value, ClientError> {
        let joined = types.iter().map(InstrumentType::as_str).collect::<Vec<_>>().join(",");
        let mut query = vec![("type".to_owned(), joined)];
        if let Some(base) = base_asset_ticker.filter(|b| !b.is_empty()) {
            query.push(("baseAssetTicker".to_owned(), base.to_owned()));
        }
        let path = format!("{INSTRUMENTS_PATH}/by-type");
        self.http.request(Method::GET, &path, RequestOptions::query(query)).await
    }
}
