//! chat-protocol
//!
//! Wire-level shapes for the room relay.
//!
//! This crate turns logical `chat_core` values into what travels over
//! HTTP and what lands in the audit log:
//!
//! - [`wire_types`] : JSON request/response bodies (camelCase)
//! - [`log_codec`]  : the `messages.txt` line format

pub mod wire_types;
pub mod log_codec;

pub use wire_types::{
    MessageView,
    PostMessageBody,
    TypingBody,
    TypingStatusQuery,
    TypingStatusView,
};
pub use log_codec::{format_log_line, NO_FINGERPRINT};
