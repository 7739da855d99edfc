//! Shared test helpers for workspace integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use casedesk_core::events::ComplaintEventKind;
use casedesk_core::traits::storage::{FileStore, StoredUpload};
use casedesk_core::traits::EventBroadcaster;
use casedesk_core::types::UserId;
use casedesk_core::AppResult;
use casedesk_entity::user::{Actor, UserRole};
use casedesk_service::{ComplaintService, CreateComplaintRequest};
use casedesk_store::MemoryComplaintStore;

/// One event captured by the recording broadcaster.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub kind: ComplaintEventKind,
    pub data: serde_json::Value,
    pub channel: Option<String>,
}

/// Broadcaster that records every event instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingBroadcaster {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingBroadcaster {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<RecordedEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl EventBroadcaster for RecordingBroadcaster {
    async fn broadcast(
        &self,
        kind: ComplaintEventKind,
        data: serde_json::Value,
        channel: Option<&str>,
    ) -> usize {
        self.events.lock().unwrap().push(RecordedEvent {
            kind,
            data,
            channel: channel.map(str::to_string),
        });
        0
    }

    async fn send_to_user(
        &self,
        _user_id: UserId,
        kind: ComplaintEventKind,
        data: serde_json::Value,
    ) -> usize {
        self.events.lock().unwrap().push(RecordedEvent {
            kind,
            data,
            channel: None,
        });
        0
    }
}

/// File store that records deletions and never touches the disk.
#[derive(Debug, Default)]
pub struct StubFileStore {
    deleted: Mutex<Vec<String>>,
}

impl StubFileStore {
    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for StubFileStore {
    async fn store(
        &self,
        data: Bytes,
        original_name: &str,
        mimetype: &str,
    ) -> AppResult<StoredUpload> {
        Ok(StoredUpload {
            filename: format!("stored-{original_name}"),
            original_name: original_name.to_string(),
            url: format!("http://localhost:8080/uploads/complaints/stored-{original_name}"),
            path: format!("/tmp/casedesk-test/{original_name}"),
            mimetype: mimetype.to_string(),
            size_bytes: data.len() as u64,
        })
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.deleted.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

/// A fully wired complaint service over in-memory collaborators.
pub struct TestEnv {
    pub service: ComplaintService,
    pub store: Arc<MemoryComplaintStore>,
    pub files: Arc<StubFileStore>,
    pub events: Arc<RecordingBroadcaster>,
}

pub fn env() -> TestEnv {
    let store = Arc::new(MemoryComplaintStore::new());
    let files = Arc::new(StubFileStore::default());
    let events = Arc::new(RecordingBroadcaster::default());
    let service = ComplaintService::new(store.clone(), files.clone(), events.clone());
    TestEnv {
        service,
        store,
        files,
        events,
    }
}

pub fn user_actor() -> Actor {
    Actor::new(UserId::new(), UserRole::User, "asha@example.com").with_name("Asha Rao")
}

pub fn staff_actor() -> Actor {
    Actor::new(UserId::new(), UserRole::Staff, "staff@example.com").with_name("Sam Staff")
}

pub fn admin_actor() -> Actor {
    Actor::new(UserId::new(), UserRole::Admin, "admin@example.com").with_name("Ada Admin")
}

pub fn create_request() -> CreateComplaintRequest {
    CreateComplaintRequest {
        title: "Broken AC in Room 301".to_string(),
        description: "The air conditioning has not worked for three days straight.".to_string(),
        ..Default::default()
    }
}

pub fn upload(name: &str) -> StoredUpload {
    StoredUpload {
        filename: format!("stored-{name}"),
        original_name: name.to_string(),
        url: format!("http://localhost:8080/uploads/complaints/stored-{name}"),
        path: format!("/tmp/casedesk-test/{name}"),
        mimetype: "image/png".to_string(),
        size_bytes: 2048,
    }
}
