// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::Method;

use crate::error::ClientError;
use crate::http::{ApiClient, RequestOptions};

const SCHEDULE_PATH: &str = "/trade-api-information-service/api/v1/trading-schedule";

/// Trading sessions and venue status.
pub struct ScheduleApi<'a> {
    http: &'a ApiClient,
}

impl<'a> ScheduleApi<'a> {
    pub(crate) fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    pub async fn daily(
        &self,
        class_code: &str,
        ticker: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!("{SCHEDULE_PATH}/daily-schedule");
        let query = RequestOptions::query([("classCode", class_code), ("ticker", ticker)]);
        self.http.request(Method::GET, &path, query).await
    }

    /// Current session type and OPEN/CLOSE state of a board. `class_code` is case-sensitive.
    pub async fn status(&self, class_code: &str) -> Result<serde_json::Value, ClientError> {
        let path = format!("{SCHEDULE_PATH}/status");
        self.http.request(Method::GET, &path, RequestOptions::query([("classCode", class_code)])).await
    }
}
