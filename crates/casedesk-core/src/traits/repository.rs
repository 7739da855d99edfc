//! Generic repository trait for document-store access.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic CRUD repository trait over a queryable document store.
///
/// Documents are read and written as whole aggregates; `update` replaces the
/// stored document atomically. Entity-specific query methods (filters,
/// pagination) are defined on the concrete store traits.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find a document by its primary key.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Insert a new document.
    async fn insert(&self, entity: &Entity) -> AppResult<Entity>;

    /// Atomically replace an existing document and return the stored version.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete a document by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: &Id) -> AppResult<bool>;

    /// Count total documents.
    async fn count(&self) -> AppResult<u64>;
}
