// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use serde_json::json;
use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::*;
use crate::test_support::EchoToolbox;

async fn read_lines<R: AsyncRead + Unpin>(reader: R) -> anyhow::Result<Vec<Value>> {
    let mut out = Vec::new();
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}

#[tokio::test]
async fn answers_in_order_and_closes_on_eof() -> anyhow::Result<()> {
    let router = Arc::new(SessionRouter::new(Arc::new(EchoToolbox)));
    let (mut client_w, server_r) = duplex(4096);
    let (server_w, client_r) = duplex(4096);

    let task =
        tokio::spawn(serve(Arc::clone(&router), server_r, server_w, CancellationToken::new()));

    client_w
        .write_all(
            concat!(
                r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
                "\n",
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
                "\n\n",
                r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
                "\n",
                "not json\n",
            )
            .as_bytes(),
        )
        .await?;
    drop(client_w);

    task.await??;
    let replies = read_lines(client_r).await?;

    assert_eq!(replies.len(), 3, "{replies:?}");
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(replies[1]["id"], 2);
    assert_eq!(replies[1]["result"]["tools"][0]["name"], "echo");
    assert_eq!(replies[2]["id"], Value::Null);
    assert_eq!(replies[2]["error"]["code"], -32700);

    assert!(router.is_empty());
    Ok(())
}

#[tokio::test]
async fn shutdown_closes_session() -> anyhow::Result<()> {
    let router = Arc::new(SessionRouter::new(Arc::new(EchoToolbox)));
    let (mut client_w, server_r) = duplex(4096);
    let (server_w, client_r) = duplex(4096);
    let shutdown = CancellationToken::new();

    let task = tokio::spawn(serve(Arc::clone(&router), server_r, server_w, shutdown.clone()));
    client_w.write_all(b"{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"method\":\"ping\"}\n").await?;

    // Wait for the reply before shutting down.
    let mut lines = BufReader::new(client_r).lines();
    let first = tokio::time::timeout(Duration::from_secs(5), lines.next_line()).await??;
    let first: Value = serde_json::from_str(&first.unwrap_or_default())?;
    assert_eq!(first, json!({ "jsonrpc": "2.0", "id": "a", "result": {} }));
    assert_eq!(router.len(), 1);

    shutdown.cancel();
    task.await??;
    assert!(router.is_empty());
    Ok(())
}
