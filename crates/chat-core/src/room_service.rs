//! Room message service.
//!
//! Thin validating layer over a [`MessageStore`]:
//! - `post_message` trims, stamps, appends, then offers the message
//!   to the audit sink.
//! - `get_messages` returns a room's history, oldest first.
//!
//! The backend is injected, so the same service runs over the
//! in-memory map or a persistent store.

use std::sync::Arc;

use tracing::{error, info};

use crate::audit::AuditSink;
use crate::error::ChatError;
use crate::message::Message;
use crate::store::MessageStore;

/// Validates and stores room messages.
#[derive(Clone)]
pub struct RoomService {
    store: Arc<dyn MessageStore>,
    audit: Arc<dyn AuditSink>,
}

impl RoomService {
    pub fn new(store: Arc<dyn MessageStore>, audit: Arc<dyn AuditSink>) -> Self {
        RoomService { store, audit }
    }

    /// Validate and append a message to `room`.
    ///
    /// Fails with [`ChatError::Validation`] when `room` or `user_id` is
    /// blank, or when `text` is blank after trimming; storage is not
    /// touched in that case. Audit failures are logged and ignored.
    pub async fn post_message(
        &self,
        room: &str,
        user_id: &str,
        text: &str,
        fingerprint: Option<&str>,
    ) -> Result<Message, ChatError> {
        if room.trim().is_empty() {
            return Err(ChatError::Validation("room"));
        }
        if user_id.trim().is_empty() {
            return Err(ChatError::Validation("userId"));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::Validation("message"));
        }

        let fingerprint = fingerprint
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let message = Message::new_now(room, user_id, text, fingerprint);

        self.store.append(room, message.clone()).await?;

        if let Err(e) = self.audit.record(&message) {
            error!(room, error = %e, "audit log write failed");
        }

        info!(room, user_id, "message stored");
        Ok(message)
    }

    /// Messages for `room` in insertion order; empty if the room is unknown.
    pub async fn get_messages(&self, room: &str) -> Result<Vec<Message>, ChatError> {
        self.store.list_by_room(room).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::LogWriteError;
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<Message>>,
    }

    impl AuditSink for RecordingSink {
        fn record(&self, message: &Message) -> Result<(), LogWriteError> {
            self.lines.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    impl AuditSink for BrokenSink {
        fn record(&self, _message: &Message) -> Result<(), LogWriteError> {
            Err(LogWriteError("disk full".into()))
        }
    }

    struct DownStore;

    #[async_trait]
    impl MessageStore for DownStore {
        async fn append(&self, _room: &str, _message: Message) -> Result<(), ChatError> {
            Err(ChatError::Storage("connection refused".into()))
        }

        async fn list_by_room(&self, _room: &str) -> Result<Vec<Message>, ChatError> {
            Err(ChatError::Storage("connection refused".into()))
        }
    }

    fn service() -> (RoomService, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let svc = RoomService::new(Arc::new(MemoryStore::new()), sink.clone());
        (svc, sink)
    }

    #[tokio::test]
    async fn posted_message_is_listed_last() {
        let (svc, _) = service();
        svc.post_message("lobby", "u1", "first", None).await.unwrap();
        svc.post_message("lobby", "u2", "  second  ", Some("fp"))
            .await
            .unwrap();

        let listed = svc.get_messages("lobby").await.unwrap();
        assert_eq!(listed.len(), 2);
        let last = listed.last().unwrap();
        assert_eq!(last.user_id, "u2");
        assert_eq!(last.text, "second");
        assert_eq!(last.room, "lobby");
        assert_eq!(last.fingerprint.as_deref(), Some("fp"));
        assert!(last.time.ends_with("AM") || last.time.ends_with("PM"));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_without_touching_storage() {
        let (svc, sink) = service();

        let cases = [
            ("", "u1", "hi", "room"),
            ("lobby", "", "hi", "userId"),
            ("lobby", "u1", "", "message"),
            ("lobby", "u1", "   \t\n", "message"),
        ];
        for (room, user, text, field) in cases {
            match svc.post_message(room, user, text, None).await {
                Err(ChatError::Validation(f)) => assert_eq!(f, field),
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        assert!(svc.get_messages("lobby").await.unwrap().is_empty());
        assert!(sink.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_room_is_empty_not_error() {
        let (svc, _) = service();
        assert!(svc.get_messages("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn accepted_messages_reach_the_audit_sink() {
        let (svc, sink) = service();
        svc.post_message("lobby", "u1", "hi", None).await.unwrap();

        let lines = sink.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "hi");
    }

    #[tokio::test]
    async fn audit_failure_does_not_fail_the_post() {
        let svc = RoomService::new(Arc::new(MemoryStore::new()), Arc::new(BrokenSink));
        svc.post_message("lobby", "u1", "hi", None).await.unwrap();
        assert_eq!(svc.get_messages("lobby").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let sink = Arc::new(RecordingSink::default());
        let svc = RoomService::new(Arc::new(DownStore), sink.clone());

        let err = svc.post_message("lobby", "u1", "hi", None).await.unwrap_err();
        assert!(matches!(err, ChatError::Storage(_)));
        assert!(sink.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_fingerprint_is_dropped() {
        let (svc, _) = service();
        let msg = svc.post_message("lobby", "u1", "hi", Some("  ")).await.unwrap();
        assert_eq!(msg.fingerprint, None);
    }
}
