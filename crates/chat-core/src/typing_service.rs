//! Typing service.
//!
//! Records typing pings into a [`TypingTracker`] and answers "who is
//! typing" for a room. A slot counts only while it is younger than the
//! freshness window; expiry is evaluated on read.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ChatError;
use crate::typing::TypingTracker;

/// How long a typing ping stays visible.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_millis(3000);

/// Validating front for the typing tracker.
#[derive(Debug)]
pub struct TypingService {
    tracker: TypingTracker,
    window: Duration,
}

impl Default for TypingService {
    fn default() -> Self {
        TypingService::new(DEFAULT_FRESHNESS_WINDOW)
    }
}

impl TypingService {
    pub fn new(window: Duration) -> Self {
        TypingService {
            tracker: TypingTracker::new(),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record that `user_id` is typing in `room` right now.
    pub fn notify_typing(&self, room: &str, user_id: &str) -> Result<(), ChatError> {
        self.notify_typing_at(room, user_id, Instant::now())
    }

    /// Same as [`notify_typing`](Self::notify_typing) with an explicit clock.
    pub fn notify_typing_at(
        &self,
        room: &str,
        user_id: &str,
        now: Instant,
    ) -> Result<(), ChatError> {
        if room.trim().is_empty() {
            return Err(ChatError::Validation("room"));
        }
        if user_id.trim().is_empty() {
            return Err(ChatError::Validation("userId"));
        }

        self.tracker.record(room, user_id, now);
        debug!(room, user_id, "typing");
        Ok(())
    }

    /// The user currently typing in `room`, if their ping is still fresh.
    pub fn typing_status(&self, room: &str) -> Option<String> {
        self.typing_status_at(room, Instant::now())
    }

    /// Same as [`typing_status`](Self::typing_status) with an explicit clock.
    pub fn typing_status_at(&self, room: &str, now: Instant) -> Option<String> {
        let slot = self.tracker.slot(room)?;
        if now.saturating_duration_since(slot.at) < self.window {
            Some(slot.user_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ping_is_visible() {
        let svc = TypingService::default();
        let t0 = Instant::now();
        svc.notify_typing_at("lobby", "u2", t0).unwrap();

        assert_eq!(
            svc.typing_status_at("lobby", t0 + Duration::from_millis(2999)),
            Some("u2".to_string())
        );
    }

    #[test]
    fn ping_expires_at_the_window_boundary() {
        let svc = TypingService::default();
        let t0 = Instant::now();
        svc.notify_typing_at("lobby", "u2", t0).unwrap();

        assert_eq!(svc.typing_status_at("lobby", t0 + Duration::from_millis(3000)), None);
        assert_eq!(svc.typing_status_at("lobby", t0 + Duration::from_millis(3100)), None);
    }

    #[test]
    fn last_writer_wins() {
        let svc = TypingService::default();
        let t0 = Instant::now();
        svc.notify_typing_at("lobby", "a", t0).unwrap();
        svc.notify_typing_at("lobby", "b", t0 + Duration::from_millis(5))
            .unwrap();

        assert_eq!(
            svc.typing_status_at("lobby", t0 + Duration::from_millis(10)),
            Some("b".to_string())
        );
    }

    #[test]
    fn new_ping_refreshes_the_window() {
        let svc = TypingService::default();
        let t0 = Instant::now();
        svc.notify_typing_at("lobby", "a", t0).unwrap();
        svc.notify_typing_at("lobby", "a", t0 + Duration::from_millis(2500))
            .unwrap();

        assert_eq!(
            svc.typing_status_at("lobby", t0 + Duration::from_millis(4000)),
            Some("a".to_string())
        );
    }

    #[test]
    fn unknown_room_has_nobody_typing() {
        let svc = TypingService::default();
        assert_eq!(svc.typing_status("quiet"), None);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let svc = TypingService::default();
        assert!(matches!(
            svc.notify_typing("", "u1"),
            Err(ChatError::Validation("room"))
        ));
        assert!(matches!(
            svc.notify_typing("lobby", " "),
            Err(ChatError::Validation("userId"))
        ));
        assert_eq!(svc.typing_status("lobby"), None);
    }

    #[test]
    fn custom_window_is_honoured() {
        let svc = TypingService::new(Duration::from_millis(100));
        let t0 = Instant::now();
        svc.notify_typing_at("r", "u", t0).unwrap();

        assert_eq!(svc.window(), Duration::from_millis(100));
        assert!(svc.typing_status_at("r", t0 + Duration::from_millis(99)).is_some());
        assert!(svc.typing_status_at("r", t0 + Duration::from_millis(100)).is_none());
    }
}
