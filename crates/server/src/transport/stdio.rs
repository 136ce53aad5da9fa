// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newline-delimited JSON-RPC over a byte stream pair (stdin/stdout).
//!
//! The process serves exactly one session; EOF on input closes it.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::TransportClosed;
use crate::protocol::{JsonRpcMessage, JsonRpcResponse};
use crate::session::{SendFuture, SessionRouter, TransportHandle, TransportKind};

const OUTBOX_CAPACITY: usize = 64;

pub struct StdioHandle {
    tx: mpsc::Sender<Value>,
    cancel: CancellationToken,
}

impl TransportHandle for StdioHandle {
    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }

    fn send<'a>(&'a self, message: Value) -> SendFuture<'a> {
        Box::pin(async move {
            if self.cancel.is_cancelled() {
                return Err(TransportClosed);
            }
            self.tx.send(message).await.map_err(|_| TransportClosed)
        })
    }

    fn close(&self) {
        self.cancel.cancel();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Serve one session over `reader`/`writer` until EOF or `shutdown`.
pub async fn serve<R, W>(
    router: Arc<SessionRouter>,
    reader: R,
    writer: W,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(OUTBOX_CAPACITY);
    let cancel = CancellationToken::new();
    let errors = tx.clone();
    let id = router.open_session(Box::new(StdioHandle { tx, cancel: cancel.clone() }));
    let writer_task = tokio::spawn(write_loop(writer, rx, cancel.clone()));

    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed");
                break;
            }
            Err(e) => {
                warn!(err = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match JsonRpcMessage::parse(line.as_bytes()) {
            Ok(message) => {
                if let Err(e) = router.route_and_push(&id, message).await {
                    warn!(session_id = %id, err = %e, "stdio session gone");
                    break;
                }
            }
            Err(e) => {
                let reply = JsonRpcResponse::failure(Value::Null, e.code().to_rpc_error(e.to_string()));
                let value = serde_json::to_value(reply)?;
                if errors.send(value).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(errors);
    router.close_session(&id);
    writer_task.await??;
    info!("stdio transport finished");
    Ok(())
}

async fn write_loop<W>(
    mut writer: W,
    mut rx: mpsc::Receiver<Value>,
    cancel: CancellationToken,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            biased;
            msg = rx.recv() => match msg {
                Some(msg) => write_line(&mut writer, &msg).await?,
                None => break,
            },
            _ = cancel.cancelled() => {
                // Flush whatever was queued before the close.
                while let Ok(msg) = rx.try_recv() {
                    write_line(&mut writer, &msg).await?;
                }
                break;
            }
        }
    }
    writer.shutdown().await
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, msg: &Value) -> std::io::Result<()> {
    let mut line = msg.to_string();
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
#[path = "stdio_tests.rs"]
mod tests;
