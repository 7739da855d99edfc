//! Integration tests for the broadcast hub: channel filtering, the event
//! wire shape end-to-end from the service, and heartbeat termination.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use casedesk_core::config::realtime::RealtimeConfig;
use casedesk_core::events::ComplaintEventKind;
use casedesk_core::traits::EventBroadcaster;
use casedesk_core::types::UserId;
use casedesk_core::{AppError, AppResult};
use casedesk_entity::user::UserRole;
use casedesk_realtime::{BroadcastHub, ConnectionIdentity, IdentityVerifier};
use casedesk_service::ComplaintService;
use casedesk_store::MemoryComplaintStore;

use common::{create_request, user_actor, StubFileStore};

fn hub() -> Arc<BroadcastHub> {
    Arc::new(BroadcastHub::new(RealtimeConfig::default()))
}

async fn drain_welcome(rx: &mut tokio::sync::mpsc::Receiver<String>) {
    let frame = rx.recv().await.unwrap();
    assert!(frame.contains("\"connection\""));
}

#[tokio::test]
async fn test_channel_filter_delivers_to_matching_subscription_only() {
    let hub = hub();
    let (first, mut rx1) = hub.register(None);
    let (second, mut rx2) = hub.register(None);
    drain_welcome(&mut rx1).await;
    drain_welcome(&mut rx2).await;

    hub.handle_inbound(&first.id, r#"{"type":"subscribe","channel":"complaints"}"#)
        .await;
    hub.handle_inbound(&second.id, r#"{"type":"subscribe","channel":"other"}"#)
        .await;
    rx1.recv().await.unwrap();
    rx2.recv().await.unwrap();

    let delivered = hub
        .broadcast(
            ComplaintEventKind::NewComplaint,
            serde_json::json!({ "title": "Broken AC in Room 301" }),
            Some("complaints"),
        )
        .await;

    assert_eq!(delivered, 1);
    let frame: serde_json::Value =
        serde_json::from_str(&rx1.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "NEW_COMPLAINT");
    assert!(rx2.try_recv().is_err());
}

#[tokio::test]
async fn test_service_events_reach_connections_with_wire_shape() {
    let hub = hub();
    let store = Arc::new(MemoryComplaintStore::new());
    let files = Arc::new(StubFileStore::default());
    let service = ComplaintService::new(store, files, hub.clone());

    let (_conn, mut rx) = hub.register(None);
    drain_welcome(&mut rx).await;

    let owner = user_actor();
    let complaint = service
        .create(&owner, create_request(), Vec::new())
        .await
        .unwrap();

    // service events carry no channel, so an unsubscribed connection
    // still receives them
    let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "NEW_COMPLAINT");
    assert_eq!(frame["data"]["title"], complaint.title);
    assert_eq!(frame["data"]["status"], "pending");
    assert!(frame["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_heartbeat_terminates_silent_connection() {
    let config = RealtimeConfig {
        ping_interval_seconds: 1,
        ..RealtimeConfig::default()
    };
    let hub = Arc::new(BroadcastHub::new(config));
    let heartbeat = hub.spawn_heartbeat();

    let (conn, mut rx) = hub.register(None);
    drain_welcome(&mut rx).await;
    assert_eq!(hub.connection_count(), 1);

    // first sweep pings; answering keeps the connection alive
    let frame = rx.recv().await.unwrap();
    assert!(frame.contains("\"ping\""));
    hub.handle_inbound(&conn.id, r#"{"type":"pong"}"#).await;

    // going silent: the next unanswered full interval terminates it
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(hub.connection_count(), 0);
    assert!(!conn.is_alive());

    heartbeat.abort();
}

/// Verifier that accepts exactly one token.
struct SingleTokenVerifier {
    token: String,
    identity: ConnectionIdentity,
}

#[async_trait]
impl IdentityVerifier for SingleTokenVerifier {
    async fn verify(&self, token: &str) -> AppResult<ConnectionIdentity> {
        if token == self.token {
            Ok(self.identity)
        } else {
            Err(AppError::forbidden("Invalid token"))
        }
    }
}

#[tokio::test]
async fn test_invalid_token_degrades_to_anonymous_connection() {
    let hub = hub();
    let verifier = SingleTokenVerifier {
        token: "good-token".to_string(),
        identity: ConnectionIdentity {
            user_id: UserId::new(),
            role: UserRole::User,
        },
    };

    let (identified, _rx1) = hub.register_with_token(Some("good-token"), &verifier).await;
    assert_eq!(
        identified.identity.map(|i| i.user_id),
        Some(verifier.identity.user_id)
    );

    // an invalid token is not rejected; the connection stays, anonymous
    let (anonymous, _rx2) = hub.register_with_token(Some("bad-token"), &verifier).await;
    assert!(anonymous.identity.is_none());

    let (missing, _rx3) = hub.register_with_token(None, &verifier).await;
    assert!(missing.identity.is_none());

    assert_eq!(hub.connection_count(), 3);
}

#[tokio::test]
async fn test_unsubscribed_connection_misses_channelled_event() {
    let hub = hub();
    let (conn, mut rx) = hub.register(None);
    drain_welcome(&mut rx).await;

    hub.handle_inbound(&conn.id, r#"{"type":"subscribe","channel":"complaints"}"#)
        .await;
    rx.recv().await.unwrap();
    hub.handle_inbound(&conn.id, r#"{"type":"unsubscribe"}"#).await;

    let delivered = hub
        .broadcast(
            ComplaintEventKind::UpdatedComplaint,
            serde_json::json!({ "id": 1 }),
            Some("complaints"),
        )
        .await;

    assert_eq!(delivered, 0);
    assert!(rx.try_recv().is_err());
}
