//! Shared types for the relay HTTP server.
//!
//! This module defines:
//! - `AppState`: the services every handler sees
//! - channel aliases between the audit sink and the audit writer task

use std::sync::Arc;

use chat_core::{RoomService, TypingService};
use tokio::sync::mpsc;

/// State handed to every request handler.
///
/// Cheap to clone; both services sit behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomService,
    pub typing: Arc<TypingService>,
}

/// Formatted audit lines flowing from request handlers to the writer task.
pub type AuditTx = mpsc::UnboundedSender<String>;
pub type AuditRx = mpsc::UnboundedReceiver<String>;
