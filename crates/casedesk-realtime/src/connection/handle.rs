//! Individual connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::identity::ConnectionIdentity;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A handle to a single live connection.
///
/// Holds the sender side of the connection's outbound frame queue plus the
/// optional identity and the single active channel subscription.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Identity, when the connection authenticated at establishment.
    pub identity: Option<ConnectionIdentity>,
    /// Sender for outbound text frames.
    sender: mpsc::Sender<String>,
    /// The single subscribed channel, if any. Last subscription wins.
    subscription: RwLock<Option<String>>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
    /// Set when a ping has been sent and no pong has come back yet.
    awaiting_pong: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(identity: Option<ConnectionIdentity>, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            sender,
            subscription: RwLock::new(None),
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
            awaiting_pong: AtomicBool::new(false),
        }
    }

    /// Queue an outbound text frame.
    ///
    /// Returns `false` without blocking when the connection is dead, its
    /// buffer is full (the frame is dropped), or the receiving side is gone.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Connection send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check whether the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Set the active channel subscription. Any previous subscription is
    /// replaced.
    pub async fn subscribe(&self, channel: String) {
        *self.subscription.write().await = Some(channel);
    }

    /// Clear the active channel subscription.
    pub async fn unsubscribe(&self) {
        *self.subscription.write().await = None;
    }

    /// Return the active subscription, if any.
    pub async fn subscription(&self) -> Option<String> {
        self.subscription.read().await.clone()
    }

    /// Record a pong from the client.
    pub fn record_pong(&self) {
        self.awaiting_pong.store(false, Ordering::SeqCst);
    }

    /// Mark a ping as outstanding. Returns `true` when the previous ping is
    /// still unanswered, i.e. the connection missed a full heartbeat
    /// interval.
    pub fn begin_ping(&self) -> bool {
        self.awaiting_pong.swap(true, Ordering::SeqCst)
    }

    /// The connected user, when identified.
    pub fn user_id(&self) -> Option<casedesk_core::types::UserId> {
        self.identity.map(|i| i.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscription_last_wins() {
        let (tx, _rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(None, tx);
        assert_eq!(handle.subscription().await, None);

        handle.subscribe("complaints".into()).await;
        handle.subscribe("other".into()).await;
        assert_eq!(handle.subscription().await.as_deref(), Some("other"));

        handle.unsubscribe().await;
        assert_eq!(handle.subscription().await, None);
    }

    #[tokio::test]
    async fn test_send_to_closed_receiver_marks_dead() {
        let (tx, rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(None, tx);
        drop(rx);
        assert!(!handle.send("hello".into()));
        assert!(!handle.is_alive());
    }

    #[tokio::test]
    async fn test_ping_pong_bookkeeping() {
        let (tx, _rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(None, tx);

        // first ping: nothing outstanding
        assert!(!handle.begin_ping());
        // second ping without a pong: missed a full interval
        assert!(handle.begin_ping());

        handle.record_pong();
        assert!(!handle.begin_ping());
    }
}
