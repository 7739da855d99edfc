//! Attachment sub-operations.

use tracing::{info, warn};

use casedesk_core::traits::storage::StoredUpload;
use casedesk_core::types::{AttachmentId, ComplaintId};
use casedesk_core::{AppError, AppResult};
use casedesk_entity::complaint::Attachment;
use casedesk_entity::user::Actor;

use crate::guard;

use super::service::ComplaintService;

impl ComplaintService {
    /// Record an already-stored upload as a new attachment.
    ///
    /// The 11th attachment fails with a validation error and the document is
    /// left unchanged — the caller is then responsible for cleaning up the
    /// staged file, as at creation time.
    pub async fn add_attachment(
        &self,
        id: ComplaintId,
        actor: &Actor,
        upload: StoredUpload,
    ) -> AppResult<Attachment> {
        let mut complaint = self.load(id).await?;
        guard::ensure_can_access(&complaint, actor)?;

        let attachment = complaint.add_attachment(upload)?;
        self.store().update(&complaint).await?;

        info!(
            complaint_id = %id,
            attachment_id = %attachment.id,
            user = %actor.email,
            "Attachment added"
        );

        Ok(attachment)
    }

    /// Remove an attachment and request deletion of its stored file.
    ///
    /// The metadata entry is removed from the persisted document first; a
    /// failure to delete the underlying file is logged, not fatal.
    pub async fn remove_attachment(
        &self,
        id: ComplaintId,
        attachment_id: AttachmentId,
        actor: &Actor,
    ) -> AppResult<()> {
        let mut complaint = self.load(id).await?;
        guard::ensure_can_access(&complaint, actor)?;

        let attachment = complaint
            .remove_attachment(attachment_id)
            .ok_or_else(|| AppError::not_found("Attachment not found"))?;
        self.store().update(&complaint).await?;

        if let Err(e) = self.files().delete(&attachment.path).await {
            warn!(
                complaint_id = %id,
                path = %attachment.path,
                error = %e,
                "Failed to remove attachment file"
            );
        }

        info!(
            complaint_id = %id,
            attachment_id = %attachment_id,
            user = %actor.email,
            "Attachment removed"
        );

        Ok(())
    }

    /// Look up one attachment's metadata, for the download boundary.
    pub async fn find_attachment(
        &self,
        id: ComplaintId,
        attachment_id: AttachmentId,
        actor: &Actor,
    ) -> AppResult<Attachment> {
        let complaint = self.load(id).await?;
        guard::ensure_can_access(&complaint, actor)?;

        complaint
            .attachment(attachment_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Attachment not found"))
    }
}
