// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MCP server exposing the BCS Trade API as tools.

pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod session;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use bcs_client::BcsClient;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, TransportMode};
use crate::session::SessionRouter;
use crate::tools::TradeTools;
use crate::transport::{build_router, AppState};

/// Install the global subscriber. Logs go to stderr so stdout stays free
/// for the stdio transport.
pub fn init_tracing(config: &Config) {
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.log_format.as_str() {
        "json" => fmt::fmt().with_env_filter(filter).with_writer(std::io::stderr).json().try_init(),
        _ => fmt::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init(),
    };
    // Already installed (a second call, or a test harness): keep the first.
    drop(result);
}

/// Run the server until ctrl-c (or EOF on stdin for the stdio transport).
pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = Arc::new(BcsClient::new(config.client_config())?);
    let router = Arc::new(SessionRouter::new(Arc::new(TradeTools::new(client))));

    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    info!(
        transport = config.transport.kind().as_str(),
        client_id = %config.client_id,
        base_url = %config.base_url,
        "bcs-mcp starting"
    );

    if config.transport == TransportMode::Stdio {
        return transport::stdio::serve(router, tokio::io::stdin(), tokio::io::stdout(), shutdown)
            .await;
    }

    let state = Arc::new(AppState {
        router: Arc::clone(&router),
        auth_token: config.auth_token.clone(),
        transport: config.transport.kind(),
    });
    let app = build_router(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");

    // Open SSE streams only end once their session is closed, so sessions
    // must be torn down before axum waits for connections to drain.
    let drain = Arc::clone(&router);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            let closed = drain.close_all();
            info!(closed, "shutting down");
        })
        .await?;

    router.close_all();
    Ok(())
}

fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(err = %e, "failed to listen for ctrl-c");
            return;
        }
        info!("received ctrl-c");
        shutdown.cancel();
    });
}
