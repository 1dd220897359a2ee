//! Audit log line format.
//!
//! One line per accepted message:
//!
//! ```text
//! [time] (userId) text :: fingerprint [#room]
//! ```
//!
//! A message without a fingerprint is written with
//! [`NO_FINGERPRINT`] in that position. The returned string carries
//! no trailing newline; the writer adds it.

use chat_core::Message;

/// Placeholder written when the client sent no fingerprint.
pub const NO_FINGERPRINT: &str = "no fingerprint";

/// Format a stored message as an audit log line.
pub fn format_log_line(msg: &Message) -> String {
    format!(
        "[{}] ({}) {} :: {} [#{}]",
        msg.time,
        msg.user_id,
        msg.text,
        msg.fingerprint.as_deref().unwrap_or(NO_FINGERPRINT),
        msg.room
    )
}
