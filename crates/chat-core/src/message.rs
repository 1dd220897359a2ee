//! Stored chat message.
//!
//! Messages are immutable once appended; the storage backend only
//! ever hands out clones.

use chrono::{DateTime, Local};

/// Local wall-clock format stamped on every message, e.g. `3:07:42 PM`.
pub const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// A single message in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author identifier as supplied by the client.
    pub user_id: String,

    /// Trimmed message body, never empty.
    pub text: String,

    /// Human-readable local time the server accepted the message.
    pub time: String,

    /// Room key the message was posted to.
    pub room: String,

    /// Client-supplied device fingerprint, diagnostic only.
    pub fingerprint: Option<String>,
}

impl Message {
    /// Build a message stamped with the given instant.
    pub fn new_at(
        room: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        fingerprint: Option<String>,
        at: DateTime<Local>,
    ) -> Self {
        Message {
            user_id: user_id.into(),
            text: text.into(),
            time: format_time(at),
            room: room.into(),
            fingerprint,
        }
    }

    /// Build a message stamped with the current local time.
    pub fn new_now(
        room: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        fingerprint: Option<String>,
    ) -> Self {
        Self::new_at(room, user_id, text, fingerprint, Local::now())
    }
}

/// Render a timestamp with [`TIME_FORMAT`].
pub fn format_time(at: DateTime<Local>) -> String {
    at.format(TIME_FORMAT).to_string()
}
