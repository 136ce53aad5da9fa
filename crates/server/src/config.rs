// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bcs_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_CLIENT_ID};
use clap::{Parser, ValueEnum};

use crate::session::TransportKind;

/// Which binding the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportMode {
    /// Streamable HTTP on `/mcp`.
    Http,
    /// HTTP+SSE push on `/sse` and `/messages`.
    Sse,
    /// One session over stdin/stdout.
    Stdio,
}

impl TransportMode {
    pub fn kind(&self) -> TransportKind {
        match self {
            Self::Http => TransportKind::StreamableHttp,
            Self::Sse => TransportKind::Sse,
            Self::Stdio => TransportKind::Stdio,
        }
    }
}

/// MCP server for the BCS Trade API.
#[derive(Debug, Clone, Parser)]
#[command(name = "bcs-mcp", version, about)]
pub struct Config {
    /// Refresh token issued by the BCS web terminal.
    #[arg(long, env = "BCS_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: String,

    /// OAuth client: trade-api-read or trade-api-write.
    #[arg(long, env = "BCS_CLIENT_ID", default_value = DEFAULT_CLIENT_ID)]
    pub client_id: String,

    /// Trade API base URL.
    #[arg(long, env = "BCS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// MCP transport.
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = TransportMode::Http)]
    pub transport: TransportMode,

    /// Host to bind on.
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "MCP_PORT", default_value_t = 7491)]
    pub port: u16,

    /// Bearer token for MCP clients. If unset, auth is disabled.
    #[arg(long, env = "MCP_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Log format (json or text).
    #[arg(long, env = "MCP_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "MCP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_token.trim().is_empty() {
            anyhow::bail!("BCS_REFRESH_TOKEN must not be empty");
        }
        if self.client_id.trim().is_empty() {
            anyhow::bail!("--client-id must not be empty");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!("--base-url must start with http:// or https://");
        }
        if !matches!(self.log_format.as_str(), "json" | "text") {
            anyhow::bail!("--log-format must be json or text");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            client_id: self.client_id.clone(),
            refresh_token: self.refresh_token.trim().to_owned(),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
