//! Listener and top-level server wiring.
//!
//! This module:
//! - Opens the configured message store.
//! - Builds the room and typing services around it.
//! - Spawns a single audit writer task that owns `messages.txt`.
//! - Serves the HTTP routes until the listener fails.
//!
//! Handlers live in `routes`; the writer loop in `audit_task`.

use std::sync::Arc;

use anyhow::{Context, Result};
use chat_core::{MemoryStore, MessageStore, RoomService, TypingService};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

use crate::audit_task::{run_audit_writer, ChannelAuditSink};
use crate::config::{Config, StoreKind};
use crate::routes;
use crate::sqlite_store::SqliteStore;
use crate::types::{AppState, AuditRx, AuditTx};

/// Open the message store selected by `config`.
pub fn open_store(config: &Config) -> Result<Arc<dyn MessageStore>> {
    let store: Arc<dyn MessageStore> = match config.store {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Sqlite => Arc::new(
            SqliteStore::open(&config.db_path)
                .with_context(|| format!("opening {}", config.db_path.display()))?,
        ),
    };
    Ok(store)
}

/// Assemble handler state over `store`.
///
/// Returns the receiving end of the audit channel; the caller is
/// expected to hand it to [`run_audit_writer`].
pub fn build_state(store: Arc<dyn MessageStore>, config: &Config) -> (AppState, AuditRx) {
    let (audit_tx, audit_rx): (AuditTx, AuditRx) = mpsc::unbounded_channel();
    let audit = Arc::new(ChannelAuditSink::new(audit_tx));

    let state = AppState {
        rooms: RoomService::new(store, audit),
        typing: Arc::new(TypingService::new(config.typing_window)),
    };
    (state, audit_rx)
}

/// Serve on an already-bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    let store = open_store(&config)?;
    serve_with_store(listener, store, config).await
}

/// Serve on an already-bound listener over an explicit message store.
pub async fn serve_with_store(
    listener: TcpListener,
    store: Arc<dyn MessageStore>,
    config: Config,
) -> Result<()> {
    let (state, audit_rx) = build_state(store, &config);

    // Spawn the audit writer.
    {
        let log_path = config.log_path.clone();
        tokio::spawn(async move {
            run_audit_writer(log_path, audit_rx).await;
        });
    }

    info!(
        store = %config.store,
        log = %config.log_path.display(),
        typing_window_ms = config.typing_window.as_millis() as u64,
        "relay ready"
    );

    axum::serve(listener, routes::router(state))
        .await
        .context("http server failed")
}

/// Bind the configured address and serve.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on {}", addr);

    serve(listener, config).await
}
