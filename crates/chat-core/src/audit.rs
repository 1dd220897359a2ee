//! Audit log seam.
//!
//! Every accepted message is offered to an [`AuditSink`]. Sinks are
//! best-effort: the message service logs a failed write and carries on.

use crate::error::LogWriteError;
use crate::message::Message;

/// Destination for the durable one-line-per-message audit trail.
pub trait AuditSink: Send + Sync {
    /// Record an accepted message.
    fn record(&self, message: &Message) -> Result<(), LogWriteError>;
}
