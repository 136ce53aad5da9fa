// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::Method;

use crate::error::ClientError;
use crate::http::{ApiClient, RequestOptions};

pub struct MarginApi<'a> {
    http: &'a ApiClient,
}

impl<'a> MarginApi<'a> {
    pub(crate) fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    /// Long/short margin discounts for every instrument.
    pub async fn discounts(&self) -> Result<serde_json::Value, ClientError> {
        self.http
            .request(
                Method::GET,
                "/trade-api-bff-marginal-indicators/api/v1/instruments-discounts",
                RequestOptions::default(),
            )
            .await
    }
}
