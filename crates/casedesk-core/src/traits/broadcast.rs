//! Broadcast seam between complaint mutations and the real-time hub.

use async_trait::async_trait;

use crate::events::ComplaintEventKind;
use crate::types::UserId;

/// Delivers complaint events to live connections, best effort.
///
/// Implementations must never fail the caller: a successful state change is
/// never rolled back because notification failed, so both methods report
/// delivery counts instead of errors. Payloads are full snapshot objects
/// (deletion carries only the id).
#[async_trait]
pub trait EventBroadcaster: Send + Sync + 'static {
    /// Fan an event out to open connections.
    ///
    /// When `channel` is given, only connections whose subscription equals it
    /// receive the event; otherwise every open connection does. Returns the
    /// number of connections the event was delivered to.
    async fn broadcast(
        &self,
        kind: ComplaintEventKind,
        data: serde_json::Value,
        channel: Option<&str>,
    ) -> usize;

    /// Deliver an event to every connection identified as the given user.
    ///
    /// Returns the number of connections reached (zero when the user has no
    /// live identified connection).
    async fn send_to_user(
        &self,
        user_id: UserId,
        kind: ComplaintEventKind,
        data: serde_json::Value,
    ) -> usize;
}
