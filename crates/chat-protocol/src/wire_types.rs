//! JSON bodies exchanged with the HTTP edge.
//!
//! Field names follow the browser client's camelCase. Request fields
//! are all optional at this layer so a missing field can be reported
//! as a 400 rather than a decode failure.

use chat_core::Message;
use serde::{Deserialize, Serialize};

/// Body of `POST /message/{room}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Body of `POST /typing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// Query string of `GET /typing-status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingStatusQuery {
    #[serde(default)]
    pub room: Option<String>,
}

/// Response of `GET /typing-status`: `{"typingUser": ".."}` or `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStatusView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_user: Option<String>,
}

/// One element of the `GET /messages/{room}` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub user_id: String,
    pub text: String,
    pub time: String,
    #[serde(default)]
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl From<&Message> for MessageView {
    fn from(m: &Message) -> Self {
        MessageView {
            user_id: m.user_id.clone(),
            text: m.text.clone(),
            time: m.time.clone(),
            room: m.room.clone(),
            fingerprint: m.fingerprint.clone(),
        }
    }
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        MessageView {
            user_id: m.user_id,
            text: m.text,
            time: m.time,
            room: m.room,
            fingerprint: m.fingerprint,
        }
    }
}
