// crates/chat-client/src/network.rs

use anyhow::{anyhow, Result};
use chat_protocol::{MessageView, PostMessageBody, TypingBody, TypingStatusView};
use tracing::debug;

/// HTTP calls against one relay server.
#[derive(Debug, Clone)]
pub struct RelayConnection {
    base_url: String,
    http: reqwest::Client,
}

impl RelayConnection {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{route}/{room}` with `room` percent-encoded as one path
    /// segment, so `#`, `?` and `/` stay part of the room key.
    pub fn room_url(&self, route: &str, room: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .push(route)
            .push(room);
        Ok(url)
    }

    pub async fn fetch_messages(&self, room: &str) -> Result<Vec<MessageView>> {
        let url = self.room_url("messages", room)?;
        let messages = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(messages)
    }

    pub async fn send_message(
        &self,
        room: &str,
        user_id: &str,
        text: &str,
        fingerprint: &str,
    ) -> Result<String> {
        let url = self.room_url("message", room)?;
        let body = PostMessageBody {
            message: Some(text.to_string()),
            user_id: Some(user_id.to_string()),
            fingerprint: Some(fingerprint.to_string()),
        };
        let ack = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!("Sent message to #{}: {}", room, ack);
        Ok(ack)
    }

    pub async fn notify_typing(&self, room: &str, user_id: &str) -> Result<()> {
        let url = format!("{}/typing", self.base_url);
        let body = TypingBody {
            user_id: Some(user_id.to_string()),
            room: Some(room.to_string()),
        };
        self.http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn typing_status(&self, room: &str) -> Result<Option<String>> {
        let url = format!("{}/typing-status", self.base_url);
        let status: TypingStatusView = self
            .http
            .get(&url)
            .query(&[("room", room)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status.typing_user)
    }
}
