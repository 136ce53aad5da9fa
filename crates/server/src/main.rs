// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing::error;

use bcs_mcp::config::Config;
use bcs_mcp::{init_tracing, run};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("error: {e}");
        std::process::exit(2);
    }

    init_tracing(&config);
    bcs_client::ensure_crypto();

    // Exit from inside the runtime: a pending stdin read would otherwise
    // hold runtime shutdown open.
    match run(config).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!("fatal: {e:#}");
            std::process::exit(1);
        }
    }
}
