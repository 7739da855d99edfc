//! Connection pool — the registry of all live connections.

use std::sync::Arc;

use dashmap::DashMap;

use casedesk_core::types::UserId;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe registry of all live connections.
///
/// Connections are added and removed from open/close handlers while
/// broadcast iterates the set concurrently; removal during a broadcast must
/// never break the loop, which the concurrent map guarantees.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Create a new empty pool.
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
        }
    }

    /// Add a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, handle);
    }

    /// Remove a connection from the pool.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.remove(conn_id).map(|(_, handle)| handle)
    }

    /// Get a specific connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(conn_id).map(|entry| entry.value().clone())
    }

    /// Snapshot of all connections.
    pub fn all(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// All connections identified as the given user.
    pub fn user_connections(&self, user_id: UserId) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .filter(|entry| entry.value().user_id() == Some(user_id))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of live connections.
    pub fn count(&self) -> usize {
        self.by_id.len()
    }
}
