// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::Method;

use crate::api::{ModifyOrderRequest, OrderRequest};
use crate::error::ClientError;
use crate::http::{ApiClient, RequestOptions};

const ORDERS_PATH: &str = "/trade-api-bff-operations/api/v1/orders";

/// Order placement, replacement, cancellation and status.
pub struct OrdersApi<'a> {
    http: &'a ApiClient,
}

impl<'a> OrdersApi<'a> {
    pub(crate) fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    pub async fn create(&self, order: &OrderRequest) -> Result<serde_json::Value, ClientError> {
        self.http.request(Method::POST, ORDERS_PATH, RequestOptions::json(order)?).await
    }

    /// Replace an existing order (the exchange cancels it and places a new one).
    pub async fn modify(
        &self,
        original_client_order_id: &str,
        change: &ModifyOrderRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!("{ORDERS_PATH}/{original_client_order_id}");
        self.http.request(Method::POST, &path, RequestOptions::json(change)?).await
    }

    pub async fn cancel(
        &self,
        original_client_order_id: &str,
        client_order_id: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!("{ORDERS_PATH}/{original_client_order_id}/cancel");
        let body = serde_json::json!({ "clientOrderId": client_order_id });
        self.http.request(Method::POST, &path, RequestOptions::json(&body)?).await
    }

    pub async fn status(
        &self,
        original_client_order_id: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!("{ORDERS_PATH}/{original_client_order_id}");
        self.http.request(Method::GET, &path, RequestOptions::default()).await
    }
}
