//! The broadcast hub: connection registration and event fan-out.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use casedesk_core::config::realtime::RealtimeConfig;
use casedesk_core::events::ComplaintEventKind;
use casedesk_core::traits::EventBroadcaster;
use casedesk_core::types::UserId;

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::connection::heartbeat;
use crate::connection::identity::{ConnectionIdentity, IdentityVerifier};
use crate::connection::pool::ConnectionPool;
use crate::message::envelope::EventEnvelope;
use crate::message::types::{ControlMessage, InboundMessage};

/// Routes outbound events to subscribed connections and tracks liveness.
///
/// Delivery is best-effort and at-most-once per connection: there is no
/// replay and no durable queue, and a client that misses an event reconciles
/// via a subsequent read.
#[derive(Debug)]
pub struct BroadcastHub {
    /// Live connection registry.
    pool: Arc<ConnectionPool>,
    /// Hub configuration.
    config: RealtimeConfig,
}

impl BroadcastHub {
    /// Create a new hub.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            config,
        }
    }

    /// Register a new connection.
    ///
    /// Returns the handle and the receiver the transport drains outbound
    /// text frames from. A welcome frame is queued immediately.
    pub fn register(
        &self,
        identity: Option<ConnectionIdentity>,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(identity, tx));
        self.pool.add(handle.clone());

        handle.send(
            ControlMessage::Connection {
                message: "Connected to real-time updates".to_string(),
                timestamp: Utc::now(),
            }
            .to_frame(),
        );

        match &handle.identity {
            Some(identity) => info!(
                conn_id = %handle.id,
                user_id = %identity.user_id,
                "Connection registered"
            ),
            None => info!(conn_id = %handle.id, "Anonymous connection registered"),
        }

        (handle, rx)
    }

    /// Register a connection that may have presented a token.
    ///
    /// A valid token tags the connection with the user identity it encodes;
    /// an invalid or missing token degrades to an anonymous, broadcast-only
    /// connection rather than rejecting it.
    pub async fn register_with_token(
        &self,
        token: Option<&str>,
        verifier: &dyn IdentityVerifier,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let identity = match token {
            Some(token) => match verifier.verify(token).await {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!(error = %e, "Connection authentication failed, continuing anonymously");
                    None
                }
            },
            None => None,
        };
        self.register(identity)
    }

    /// Unregister a connection (transport close handler).
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            info!(conn_id = %conn_id, "Connection unregistered");
        }
    }

    /// Process an inbound text frame from a client.
    ///
    /// Malformed frames are logged and dropped; they never fail the
    /// connection.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw_frame: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            warn!(conn_id = %conn_id, "Frame from unknown connection");
            return;
        };

        let msg: InboundMessage = match serde_json::from_str(raw_frame) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "Failed to parse inbound frame");
                return;
            }
        };

        match msg {
            InboundMessage::Ping => {
                handle.send(
                    ControlMessage::Pong {
                        timestamp: Utc::now().timestamp_millis(),
                    }
                    .to_frame(),
                );
            }
            InboundMessage::Pong => {
                handle.record_pong();
            }
            InboundMessage::Subscribe { channel } => {
                let channel = channel.unwrap_or_else(|| self.config.default_channel.clone());
                handle.subscribe(channel.clone()).await;
                handle.send(
                    ControlMessage::Subscribed {
                        message: format!("Subscribed to {channel} updates"),
                        channel,
                    }
                    .to_frame(),
                );
                debug!(conn_id = %conn_id, "Subscription updated");
            }
            InboundMessage::Unsubscribe => {
                handle.unsubscribe().await;
                debug!(conn_id = %conn_id, "Subscription cleared");
            }
        }
    }

    /// Record a protocol-level pong for transports that surface them
    /// natively instead of as text frames.
    pub fn record_pong(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.get(conn_id) {
            handle.record_pong();
        }
    }

    /// Spawn the heartbeat sweep task.
    pub fn spawn_heartbeat(&self) -> JoinHandle<()> {
        let pool = self.pool.clone();
        let interval = Duration::from_secs(self.config.ping_interval_seconds);
        tokio::spawn(heartbeat::run_heartbeat(pool, interval))
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.pool.count()
    }

    /// Close every connection (shutdown path).
    pub fn close_all(&self) {
        let all = self.pool.all();
        for conn in &all {
            conn.mark_dead();
            self.pool.remove(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }
}

#[async_trait]
impl EventBroadcaster for BroadcastHub {
    async fn broadcast(
        &self,
        kind: ComplaintEventKind,
        data: serde_json::Value,
        channel: Option<&str>,
    ) -> usize {
        let frame = EventEnvelope::new(kind, data).to_frame();

        let mut delivered = 0usize;
        for conn in self.pool.all() {
            if !conn.is_alive() {
                continue;
            }
            if let Some(channel) = channel {
                if conn.subscription().await.as_deref() != Some(channel) {
                    continue;
                }
            }
            if conn.send(frame.clone()) {
                delivered += 1;
            }
        }

        debug!(event = %kind, delivered, "Broadcast complete");
        delivered
    }

    async fn send_to_user(
        &self,
        user_id: UserId,
        kind: ComplaintEventKind,
        data: serde_json::Value,
    ) -> usize {
        let frame = EventEnvelope::new(kind, data).to_frame();

        let connections = self.pool.user_connections(user_id);
        let mut delivered = 0usize;
        for conn in &connections {
            if conn.send(frame.clone()) {
                delivered += 1;
            }
        }

        if delivered == 0 {
            debug!(user_id = %user_id, event = %kind, "User has no live connection");
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedesk_entity::user::UserRole;

    fn hub() -> BroadcastHub {
        BroadcastHub::new(RealtimeConfig::default())
    }

    async fn drain_welcome(rx: &mut mpsc::Receiver<String>) {
        let frame = rx.recv().await.unwrap();
        assert!(frame.contains("\"connection\""));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_without_channel() {
        let hub = hub();
        let (_h1, mut rx1) = hub.register(None);
        let (_h2, mut rx2) = hub.register(None);
        drain_welcome(&mut rx1).await;
        drain_welcome(&mut rx2).await;

        let delivered = hub
            .broadcast(
                ComplaintEventKind::NewComplaint,
                serde_json::json!({ "id": 1 }),
                None,
            )
            .await;

        assert_eq!(delivered, 2);
        assert!(rx1.recv().await.unwrap().contains("NEW_COMPLAINT"));
        assert!(rx2.recv().await.unwrap().contains("NEW_COMPLAINT"));
    }

    #[tokio::test]
    async fn test_broadcast_filters_by_channel() {
        let hub = hub();
        let (h1, mut rx1) = hub.register(None);
        let (h2, mut rx2) = hub.register(None);
        drain_welcome(&mut rx1).await;
        drain_welcome(&mut rx2).await;

        hub.handle_inbound(&h1.id, r#"{"type":"subscribe","channel":"complaints"}"#)
            .await;
        hub.handle_inbound(&h2.id, r#"{"type":"subscribe","channel":"other"}"#)
            .await;
        assert!(rx1.recv().await.unwrap().contains("subscribed"));
        assert!(rx2.recv().await.unwrap().contains("subscribed"));

        let delivered = hub
            .broadcast(
                ComplaintEventKind::NewComplaint,
                serde_json::json!({ "id": 1 }),
                Some("complaints"),
            )
            .await;

        assert_eq!(delivered, 1);
        assert!(rx1.recv().await.unwrap().contains("NEW_COMPLAINT"));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_to_user_targets_identified_connections() {
        let hub = hub();
        let user = UserId::new();
        let identity = ConnectionIdentity {
            user_id: user,
            role: UserRole::User,
        };
        let (_h1, mut rx1) = hub.register(Some(identity));
        let (_h2, mut rx2) = hub.register(None);
        drain_welcome(&mut rx1).await;
        drain_welcome(&mut rx2).await;

        let delivered = hub
            .send_to_user(
                user,
                ComplaintEventKind::UpdatedComplaint,
                serde_json::json!({ "id": 1 }),
            )
            .await;

        assert_eq!(delivered, 1);
        assert!(rx1.recv().await.unwrap().contains("UPDATED_COMPLAINT"));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_client_ping_answered_with_pong() {
        let hub = hub();
        let (h, mut rx) = hub.register(None);
        drain_welcome(&mut rx).await;

        hub.handle_inbound(&h.id, r#"{"type":"ping"}"#).await;
        assert!(rx.recv().await.unwrap().contains("\"pong\""));
    }

    #[tokio::test]
    async fn test_malformed_frame_is_ignored() {
        let hub = hub();
        let (h, mut rx) = hub.register(None);
        drain_welcome(&mut rx).await;

        hub.handle_inbound(&h.id, "not json at all").await;
        assert!(rx.try_recv().is_err());
        assert_eq!(hub.connection_count(), 1);
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        let hub = hub();
        let (h, _rx) = hub.register(None);
        assert_eq!(hub.connection_count(), 1);
        hub.unregister(&h.id);
        assert_eq!(hub.connection_count(), 0);
        assert!(!h.is_alive());
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_break_broadcast() {
        let hub = hub();
        let (_h1, rx1) = hub.register(None);
        let (_h2, mut rx2) = hub.register(None);
        drop(rx1);
        drain_welcome(&mut rx2).await;

        let delivered = hub
            .broadcast(
                ComplaintEventKind::NewComplaint,
                serde_json::json!({ "id": 1 }),
                None,
            )
            .await;

        // the dead connection is skipped, the live one still receives
        assert_eq!(delivered, 1);
        assert!(rx2.recv().await.unwrap().contains("NEW_COMPLAINT"));
    }
}
