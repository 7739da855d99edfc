//! In-memory complaint store backed by a concurrent map.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use casedesk_core::traits::Repository;
use casedesk_core::types::pagination::{PageRequest, PageResponse};
use casedesk_core::types::ComplaintId;
use casedesk_core::{AppError, AppResult};
use casedesk_entity::complaint::Complaint;

use crate::query::{ComplaintFilter, ComplaintSort};
use crate::repository::ComplaintStore;

/// In-memory document store for complaints.
///
/// Each map entry holds a whole aggregate; `update` replaces the document in
/// one map operation, which gives the atomic read-modify-write granularity
/// the service layer expects. Suitable for tests and single-node use.
#[derive(Debug, Default)]
pub struct MemoryComplaintStore {
    documents: DashMap<ComplaintId, Complaint>,
}

impl MemoryComplaintStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    fn matching(&self, filter: &ComplaintFilter) -> Vec<Complaint> {
        self.documents
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl Repository<Complaint, ComplaintId> for MemoryComplaintStore {
    async fn find_by_id(&self, id: &ComplaintId) -> AppResult<Option<Complaint>> {
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, entity: &Complaint) -> AppResult<Complaint> {
        if self.documents.contains_key(&entity.id) {
            return Err(AppError::conflict(format!(
                "Complaint {} already exists",
                entity.id
            )));
        }
        self.documents.insert(entity.id, entity.clone());
        debug!(complaint_id = %entity.id, "Complaint document inserted");
        Ok(entity.clone())
    }

    async fn update(&self, entity: &Complaint) -> AppResult<Complaint> {
        if !self.documents.contains_key(&entity.id) {
            return Err(AppError::not_found(format!(
                "Complaint {} not found",
                entity.id
            )));
        }
        self.documents.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &ComplaintId) -> AppResult<bool> {
        Ok(self.documents.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.documents.len() as u64)
    }
}

#[async_trait]
impl ComplaintStore for MemoryComplaintStore {
    async fn find_page(
        &self,
        filter: &ComplaintFilter,
        sort: ComplaintSort,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>> {
        let mut matching = self.matching(filter);
        matching.sort_by(|a, b| sort.compare(a, b));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count_matching(&self, filter: &ComplaintFilter) -> AppResult<u64> {
        Ok(self.matching(filter).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedesk_core::types::UserId;
    use casedesk_entity::complaint::{
        ComplaintCategory, ComplaintPriority, ComplaintStatus, ContactInfo,
    };

    fn complaint(title: &str, user: UserId) -> Complaint {
        Complaint::new(
            title,
            "A description long enough to pass validation.",
            ComplaintCategory::Technical,
            ComplaintPriority::Medium,
            "General",
            user,
            ContactInfo::new("Asha Rao", "asha@example.com", None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryComplaintStore::new();
        let c = complaint("Broken AC in 301", UserId::new());
        store.insert(&c).await.unwrap();

        let found = store.find_by_id(&c.id).await.unwrap().unwrap();
        assert_eq!(found.title, c.title);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_conflicts() {
        let store = MemoryComplaintStore::new();
        let c = complaint("Broken AC in 301", UserId::new());
        store.insert(&c).await.unwrap();
        assert!(store.insert(&c).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryComplaintStore::new();
        let c = complaint("Broken AC in 301", UserId::new());
        let err = store.update(&c).await.unwrap_err();
        assert_eq!(err.kind, casedesk_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_find_page_filters_and_paginates() {
        let store = MemoryComplaintStore::new();
        let user = UserId::new();
        for i in 0..5 {
            let mut c = complaint(&format!("Complaint number {i}"), user);
            if i % 2 == 0 {
                c.apply_transition(ComplaintStatus::InProgress, UserId::new(), None)
                    .unwrap();
            }
            store.insert(&c).await.unwrap();
        }

        let filter = ComplaintFilter::all().with_status(ComplaintStatus::InProgress);
        let page = store
            .find_page(&filter, ComplaintSort::newest_first(), &PageRequest::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.total_items, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryComplaintStore::new();
        let c = complaint("Broken AC in 301", UserId::new());
        store.insert(&c).await.unwrap();
        assert!(store.delete(&c.id).await.unwrap());
        assert!(!store.delete(&c.id).await.unwrap());
        assert!(store.find_by_id(&c.id).await.unwrap().is_none());
    }
}
