//! chat-core
//!
//! Pure room relay logic:
//! - message representation
//! - storage interface + in-memory backend
//! - per-room typing slots
//! - the message and typing services the HTTP edge drives

pub mod error;
pub mod message;
pub mod store;
pub mod audit;
pub mod typing;
pub mod room_service;
pub mod typing_service;

pub use error::{ChatError, LogWriteError};
pub use message::{Message, TIME_FORMAT};
pub use store::{MemoryStore, MessageStore};
pub use audit::AuditSink;
pub use typing::{TypingSlot, TypingTracker};
pub use room_service::RoomService;
pub use typing_service::{TypingService, DEFAULT_FRESHNESS_WINDOW};
