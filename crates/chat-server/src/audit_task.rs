//! Audit log writer.
//!
//! One task owns the `messages.txt` handle and appends every line it
//! receives. Handlers never touch the file: [`ChannelAuditSink`] only
//! formats and enqueues, so a slow disk never delays a response.
//!
//! Failures stay local. A closed channel surfaces as a
//! `LogWriteError` to the message service (which logs it); a failed
//! write is logged here and the loop moves on to the next line.

use std::path::{Path, PathBuf};

use chat_core::{AuditSink, LogWriteError, Message};
use chat_protocol::format_log_line;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::types::{AuditRx, AuditTx};

/// [`AuditSink`] that forwards formatted lines to [`run_audit_writer`].
#[derive(Debug, Clone)]
pub struct ChannelAuditSink {
    tx: AuditTx,
}

impl ChannelAuditSink {
    pub fn new(tx: AuditTx) -> Self {
        ChannelAuditSink { tx }
    }
}

impl AuditSink for ChannelAuditSink {
    fn record(&self, message: &Message) -> Result<(), LogWriteError> {
        self.tx
            .send(format_log_line(message))
            .map_err(|_| LogWriteError("audit writer is not running".to_string()))
    }
}

/// Run the audit writer loop until every sender is dropped.
pub async fn run_audit_writer(path: PathBuf, mut rx: AuditRx) {
    let mut file: Option<File> = None;

    while let Some(line) = rx.recv().await {
        if file.is_none() {
            match open_append(&path).await {
                Ok(f) => file = Some(f),
                Err(e) => {
                    error!(path = %path.display(), error = %e, "cannot open audit log");
                    continue;
                }
            }
        }

        if let Some(f) = file.as_mut() {
            if let Err(e) = write_line(f, &line).await {
                error!(path = %path.display(), error = %e, "error writing audit log");
                // Reopen on the next line in case the file was rotated away.
                file = None;
            } else {
                debug!("audit: {}", line);
            }
        }
    }

    info!("Audit writer shutting down (channel closed)");
}

async fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path).await
}

async fn write_line(file: &mut File, line: &str) -> std::io::Result<()> {
    let data = format!("{}\n", line);
    file.write_all(data.as_bytes()).await?;
    file.flush().await
}
