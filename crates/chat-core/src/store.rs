//! Storage backend interface and the in-process implementation.
//!
//! A room exists iff the store holds at least one message for it.
//! Listing a room nobody has written to yields an empty sequence.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::ChatError;
use crate::message::Message;

/// Append-only, per-room message storage.
///
/// Implementations must preserve insertion order within a room and
/// tolerate concurrent `append` / `list_by_room` calls without losing
/// writes.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append `message` to the end of `room`'s sequence.
    async fn append(&self, room: &str, message: Message) -> Result<(), ChatError>;

    /// All messages for `room`, oldest first.
    async fn list_by_room(&self, room: &str) -> Result<Vec<Message>, ChatError>;
}

/// Process-lifetime store: room -> ordered messages.
///
/// Each append takes the shard lock for its room only, so writers to
/// different rooms do not contend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: DashMap<String, Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of rooms that have at least one message.
    #[cfg(test)]
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn append(&self, room: &str, message: Message) -> Result<(), ChatError> {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .push(message);
        Ok(())
    }

    async fn list_by_room(&self, room: &str) -> Result<Vec<Message>, ChatError> {
        Ok(self
            .rooms
            .get(room)
            .map(|messages| messages.value().clone())
            .unwrap_or_default())
    }
}
