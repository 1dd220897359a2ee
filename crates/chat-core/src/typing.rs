//! Per-room "who is typing" slots.
//!
//! Each room holds at most one slot. A new ping overwrites whatever
//! was there, so the slot always names the most recent typer.
//! Nothing is evicted; staleness is judged by the reader.

use std::time::Instant;

use dashmap::DashMap;

/// The most recent typing ping for a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSlot {
    pub user_id: String,
    pub at: Instant,
}

/// Room -> latest typing ping.
#[derive(Debug, Default)]
pub struct TypingTracker {
    slots: DashMap<String, TypingSlot>,
}

impl TypingTracker {
    pub fn new() -> Self {
        TypingTracker::default()
    }

    /// Overwrite `room`'s slot with `user_id` typing at `at`.
    pub fn record(&self, room: &str, user_id: &str, at: Instant) {
        self.slots.insert(
            room.to_string(),
            TypingSlot {
                user_id: user_id.to_string(),
                at,
            },
        );
    }

    /// Snapshot of `room`'s slot, stale or not.
    pub fn slot(&self, room: &str) -> Option<TypingSlot> {
        self.slots.get(room).map(|s| s.value().clone())
    }

    /// Number of rooms that have ever seen a typing ping.
    #[cfg(test)]
    pub fn num_rooms(&self) -> usize {
        self.slots.len()
    }
}
