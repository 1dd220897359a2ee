// crates/chat-client/src/app.rs

//! Room poll loop.
//!
//! Input is read a whole line at a time, so the only "input change" this
//! client sees is the line itself. It pings `/typing` right before posting
//! that line; other users usually see the message and the indicator on the
//! same poll, so the indicator is effectively cosmetic for this client.
//! Incoming typing indicators from other clients are shown as usual.

use anyhow::Result;
use chat_protocol::MessageView;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::network::RelayConnection;

pub const SEND_FAILED: &str = "FAILED TO SEND MESSAGE";
pub const SEND_OK: &str = "message sent";

/// What has already been shown for the current room.
#[derive(Debug, Default)]
pub struct RoomView {
    pub room: String,
    pub user_id: String,
    shown: usize,
    typing_shown: Option<String>,
}

impl RoomView {
    pub fn new(room: &str, user_id: &str) -> Self {
        Self {
            room: room.to_string(),
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    /// Feed a fresh `GET /messages` result; returns the lines to print.
    ///
    /// History is append-only, so anything past `shown` is new. A
    /// shorter history means the server lost its state; reprint all.
    pub fn absorb_messages(&mut self, messages: &[MessageView]) -> Vec<String> {
        if messages.len() < self.shown {
            self.shown = 0;
        }
        let lines = messages[self.shown..]
            .iter()
            .map(|m| format!("[{}] ({}) {}", m.time, m.user_id, m.text))
            .collect();
        self.shown = messages.len();
        lines
    }

    /// Feed a fresh `GET /typing-status` result; returns a line to print
    /// when someone else started typing.
    pub fn absorb_typing(&mut self, typing_user: Option<String>) -> Option<String> {
        match typing_user {
            Some(user) if user != self.user_id => {
                if self.typing_shown.as_deref() == Some(user.as_str()) {
                    return None;
                }
                let line = format!("{} is typing...", user);
                self.typing_shown = Some(user);
                Some(line)
            }
            _ => {
                self.typing_shown = None;
                None
            }
        }
    }
}

/// Poll the room and relay stdin lines until stdin closes.
pub async fn run(
    conn: RelayConnection,
    config: &ClientConfig,
    mut view: RoomView,
    fingerprint: &str,
) -> Result<()> {
    println!(
        "Connected to #{} on {} as {}",
        view.room,
        conn.base_url(),
        view.user_id
    );

    let mut messages_tick = interval(config.messages_interval());
    messages_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut typing_tick = interval(config.typing_interval());
    typing_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = messages_tick.tick() => {
                refresh_messages(&conn, &mut view).await;
            }
            _ = typing_tick.tick() => {
                match conn.typing_status(&view.room).await {
                    Ok(user) => {
                        if let Some(line) = view.absorb_typing(user) {
                            println!("{}", line);
                        }
                    }
                    Err(e) => warn!("Typing poll error: {}", e),
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed, leaving #{}", view.room);
                    break;
                };
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }

                if let Err(e) = conn.notify_typing(&view.room, &view.user_id).await {
                    warn!("Typing notify failed: {}", e);
                }

                match conn.send_message(&view.room, &view.user_id, text, fingerprint).await {
                    Ok(_) => {
                        println!("{}", SEND_OK);
                        refresh_messages(&conn, &mut view).await;
                    }
                    Err(e) => {
                        warn!("Send failed: {}", e);
                        println!("{}", SEND_FAILED);
                    }
                }
            }
        }
    }

    Ok(())
}

async fn refresh_messages(conn: &RelayConnection, view: &mut RoomView) {
    match conn.fetch_messages(&view.room).await {
        Ok(messages) => {
            for line in view.absorb_messages(&messages) {
                println!("{}", line);
            }
        }
        Err(e) => warn!("Message poll error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(user: &str, text: &str) -> MessageView {
        MessageView {
            user_id: user.into(),
            text: text.into(),
            time: "1:00:00 PM".into(),
            room: "lobby".into(),
            fingerprint: None,
        }
    }

    #[test]
    fn only_new_messages_are_printed() {
        let mut rv = RoomView::new("lobby", "me");
        let mut history = vec![view("a", "one")];

        assert_eq!(rv.absorb_messages(&history), vec!["[1:00:00 PM] (a) one"]);
        assert!(rv.absorb_messages(&history).is_empty());

        history.push(view("b", "two"));
        assert_eq!(rv.absorb_messages(&history), vec!["[1:00:00 PM] (b) two"]);
    }

    #[test]
    fn shrunken_history_is_reprinted() {
        let mut rv = RoomView::new("lobby", "me");
        rv.absorb_messages(&[view("a", "one"), view("a", "two")]);

        let lines = rv.absorb_messages(&[view("c", "fresh")]);
        assert_eq!(lines, vec!["[1:00:00 PM] (c) fresh"]);
    }

    #[test]
    fn own_typing_is_not_announced() {
        let mut rv = RoomView::new("lobby", "me");
        assert_eq!(rv.absorb_typing(Some("me".into())), None);
    }

    #[test]
    fn typing_is_announced_once_per_typer() {
        let mut rv = RoomView::new("lobby", "me");
        assert_eq!(
            rv.absorb_typing(Some("bob".into())).as_deref(),
            Some("bob is typing...")
        );
        assert_eq!(rv.absorb_typing(Some("bob".into())), None);

        assert_eq!(
            rv.absorb_typing(Some("eve".into())).as_deref(),
            Some("eve is typing...")
        );

        assert_eq!(rv.absorb_typing(None), None);
        assert_eq!(
            rv.absorb_typing(Some("eve".into())).as_deref(),
            Some("eve is typing...")
        );
    }
}
