// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::Method;

use crate::api::CandlesRequest;
use crate::error::ClientError;
use crate::http::{ApiClient, RequestOptions};

pub struct MarketDataApi<'a> {
    http: &'a ApiClient,
}

impl<'a> MarketDataApi<'a> {
    pub(crate) fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    /// Historical OHLCV candles.
    pub async fn candles(&self, req: &CandlesRequest) -> Result<serde_json::Value, ClientError> {
        let query = RequestOptions::query([
            ("classCode", req.class_code.as_str()),
            ("ticker", req.ticker.as_str()),
            ("startDate", req.start_date.as_str()),
            ("endDate", req.end_date.as_str()),
            ("timeFrame", req.time_frame.as_str()),
        ]);
        self.http
            .request(Method::GET, "/trade-api-market-data-connector/api/v1/candles-chart", query)
            .await
    }
}
