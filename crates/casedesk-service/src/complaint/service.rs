//! Complaint creation, queries, and deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use casedesk_core::events::ComplaintEventKind;
use casedesk_core::traits::storage::StoredUpload;
use casedesk_core::traits::{EventBroadcaster, FileStore};
use casedesk_core::types::pagination::{PageRequest, PageResponse};
use casedesk_core::types::ComplaintId;
use casedesk_core::{AppError, AppResult};
use casedesk_entity::complaint::attachment::MAX_ATTACHMENTS;
use casedesk_entity::complaint::{Complaint, ComplaintStatus, ContactInfo};
use casedesk_entity::user::Actor;
use casedesk_store::{ComplaintFilter, ComplaintSort, ComplaintStore};

use crate::guard;
use crate::validate;

use super::requests::CreateComplaintRequest;

/// Orchestrates the complaint lifecycle over the store, file store, and
/// broadcast hub boundaries.
#[derive(Clone)]
pub struct ComplaintService {
    /// Complaint document store.
    store: Arc<dyn ComplaintStore>,
    /// Attachment file storage.
    files: Arc<dyn FileStore>,
    /// Real-time event fan-out.
    events: Arc<dyn EventBroadcaster>,
}

impl std::fmt::Debug for ComplaintService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintService").finish()
    }
}

/// Complaint counts grouped by status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintStats {
    /// Total complaints in scope.
    pub total: u64,
    /// Pending count.
    pub pending: u64,
    /// In-progress count.
    pub in_progress: u64,
    /// Resolved count.
    pub resolved: u64,
    /// Rejected count.
    pub rejected: u64,
    /// Closed count.
    pub closed: u64,
    /// Resolved share of the total, as a percentage.
    pub completion_rate: f64,
}

impl ComplaintService {
    /// Create a new complaint service.
    pub fn new(
        store: Arc<dyn ComplaintStore>,
        files: Arc<dyn FileStore>,
        events: Arc<dyn EventBroadcaster>,
    ) -> Self {
        Self {
            store,
            files,
            events,
        }
    }

    /// Submit a new complaint.
    ///
    /// `staged` carries metadata for upload files the storage boundary has
    /// already materialized. Nothing is persisted until every staged entry
    /// has been validated and recorded, so the stored document and the
    /// stored files can never disagree; if this returns an error after files
    /// were staged, the caller must clean them up (see
    /// [`discard_staged_uploads`](Self::discard_staged_uploads)).
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateComplaintRequest,
        staged: Vec<StoredUpload>,
    ) -> AppResult<Complaint> {
        let request = request.normalized();
        validate::check(&request)?;

        let contact = match &request.contact {
            Some(payload) => {
                ContactInfo::new(&payload.name, &payload.email, payload.phone.as_deref())?
            }
            None => ContactInfo::new(
                actor.name.as_deref().unwrap_or_default(),
                &actor.email,
                actor.phone.as_deref(),
            )?,
        };

        if staged.len() > MAX_ATTACHMENTS {
            return Err(AppError::validation(format!(
                "Cannot have more than {MAX_ATTACHMENTS} attachments per complaint"
            )));
        }

        let mut complaint = Complaint::new(
            request.title,
            request.description,
            request.category.unwrap_or_default(),
            request.priority.unwrap_or_default(),
            request.department.unwrap_or_else(|| "General".to_string()),
            actor.id,
            contact,
        );

        let attachment_count = staged.len();
        for upload in staged {
            complaint.add_attachment(upload)?;
        }

        let complaint = self.store.insert(&complaint).await?;

        info!(
            complaint_id = %complaint.id,
            user = %actor.email,
            attachments = attachment_count,
            "Complaint created"
        );

        self.broadcast_snapshot(ComplaintEventKind::NewComplaint, &complaint, false)
            .await;

        Ok(complaint)
    }

    /// Fetch a single complaint, enforcing the access guard.
    ///
    /// Soft-deleted complaints are reported as not found.
    pub async fn get(&self, id: ComplaintId, actor: &Actor) -> AppResult<Complaint> {
        let complaint = self.load(id).await?;
        guard::ensure_can_access(&complaint, actor)?;
        Ok(complaint)
    }

    /// List complaints matching a filter, with pagination.
    ///
    /// Non-staff actors are implicitly scoped to their own complaints rather
    /// than denied per item.
    pub async fn list(
        &self,
        actor: &Actor,
        mut filter: ComplaintFilter,
        sort: ComplaintSort,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>> {
        if !actor.is_staff() {
            filter.user = Some(actor.id);
        }
        self.store.find_page(&filter, sort, page).await
    }

    /// List the actor's own complaints, optionally narrowed to one status.
    pub async fn list_mine(
        &self,
        actor: &Actor,
        status: Option<ComplaintStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>> {
        let mut filter = ComplaintFilter::for_user(actor.id);
        filter.status = status;
        self.store
            .find_page(&filter, ComplaintSort::newest_first(), page)
            .await
    }

    /// Complaint counts grouped by status.
    ///
    /// Staff see the whole desk; everyone else sees their own complaints.
    pub async fn stats(&self, actor: &Actor) -> AppResult<ComplaintStats> {
        let base = if actor.is_staff() {
            ComplaintFilter::all()
        } else {
            ComplaintFilter::for_user(actor.id)
        };

        let mut by_status = [0u64; 5];
        for (slot, status) in by_status.iter_mut().zip(ComplaintStatus::ALL) {
            let filter = base.clone().with_status(status);
            *slot = self.store.count_matching(&filter).await?;
        }

        let [pending, in_progress, resolved, rejected, closed] = by_status;
        let total = by_status.iter().sum();
        let completion_rate = if total == 0 {
            0.0
        } else {
            resolved as f64 / total as f64 * 100.0
        };

        Ok(ComplaintStats {
            total,
            pending,
            in_progress,
            resolved,
            rejected,
            closed,
            completion_rate,
        })
    }

    /// Permanently delete a complaint and its stored attachment files.
    ///
    /// Owners may only delete complaints still pending; staff and admins may
    /// delete any. File deletion failures are logged, never fatal.
    pub async fn delete(&self, id: ComplaintId, actor: &Actor) -> AppResult<()> {
        let complaint = self.load(id).await?;

        if !actor.is_staff() {
            if !complaint.is_owned_by(actor.id) {
                return Err(AppError::forbidden("Not authorized to delete this complaint"));
            }
            if complaint.status != ComplaintStatus::Pending {
                return Err(AppError::forbidden("Can only delete pending complaints"));
            }
        }

        self.store.delete(&id).await?;

        for attachment in &complaint.attachments {
            if let Err(e) = self.files.delete(&attachment.path).await {
                warn!(
                    complaint_id = %id,
                    path = %attachment.path,
                    error = %e,
                    "Failed to remove attachment file"
                );
            }
        }

        info!(complaint_id = %id, user = %actor.email, "Complaint deleted");

        self.events
            .broadcast(
                ComplaintEventKind::DeletedComplaint,
                serde_json::json!({ "id": id }),
                None,
            )
            .await;

        Ok(())
    }

    /// Soft-delete a complaint, keeping the record for audit.
    ///
    /// Same authorization rule as [`delete`](Self::delete); the document is
    /// flagged inactive/deleted instead of being removed and subsequent
    /// reads report it as not found.
    pub async fn soft_delete(&self, id: ComplaintId, actor: &Actor) -> AppResult<Complaint> {
        let mut complaint = self.load(id).await?;

        if !actor.is_staff() {
            if !complaint.is_owned_by(actor.id) {
                return Err(AppError::forbidden("Not authorized to delete this complaint"));
            }
            if complaint.status != ComplaintStatus::Pending {
                return Err(AppError::forbidden("Can only delete pending complaints"));
            }
        }

        complaint.mark_deleted(actor.id);
        let complaint = self.store.update(&complaint).await?;

        info!(complaint_id = %id, user = %actor.email, "Complaint soft-deleted");

        self.broadcast_snapshot(ComplaintEventKind::UpdatedComplaint, &complaint, false)
            .await;

        Ok(complaint)
    }

    /// Remove staged upload files after a failed submission.
    ///
    /// The transport boundary calls this when `create` rejects a payload for
    /// which files were already materialized. Failures are logged and
    /// swallowed, mirroring attachment cleanup elsewhere.
    pub async fn discard_staged_uploads(&self, staged: &[StoredUpload]) {
        for upload in staged {
            if let Err(e) = self.files.delete(&upload.path).await {
                warn!(path = %upload.path, error = %e, "Failed to clean up staged upload");
            }
        }
    }

    /// Load a complaint or fail with `NotFound` (soft-deleted included).
    pub(crate) async fn load(&self, id: ComplaintId) -> AppResult<Complaint> {
        let complaint = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Complaint not found"))?;
        if complaint.is_deleted {
            return Err(AppError::not_found("Complaint not found"));
        }
        Ok(complaint)
    }

    pub(crate) fn store(&self) -> &Arc<dyn ComplaintStore> {
        &self.store
    }

    pub(crate) fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    pub(crate) fn events(&self) -> &Arc<dyn EventBroadcaster> {
        &self.events
    }

    /// Broadcast a full-snapshot event for a complaint.
    ///
    /// `status_changed` adds the `statusChanged` flag clients use to
    /// distinguish status transitions from plain field updates.
    pub(crate) async fn broadcast_snapshot(
        &self,
        kind: ComplaintEventKind,
        complaint: &Complaint,
        status_changed: bool,
    ) {
        let mut data = match serde_json::to_value(complaint) {
            Ok(value) => value,
            Err(e) => {
                warn!(complaint_id = %complaint.id, error = %e, "Failed to serialize broadcast snapshot");
                return;
            }
        };
        if status_changed {
            if let Some(map) = data.as_object_mut() {
                map.insert("statusChanged".to_string(), serde_json::Value::Bool(true));
            }
        }
        self.events.broadcast(kind, data, None).await;
    }
}
