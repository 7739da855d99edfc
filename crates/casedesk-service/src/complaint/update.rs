//! Non-transition field updates.

use chrono::Utc;
use tracing::info;

use casedesk_core::events::ComplaintEventKind;
use casedesk_core::types::ComplaintId;
use casedesk_core::{AppError, AppResult};
use casedesk_entity::complaint::{Complaint, ComplaintStatus};
use casedesk_entity::user::Actor;

use crate::validate;

use super::requests::UpdateComplaintRequest;
use super::service::ComplaintService;

impl ComplaintService {
    /// Update complaint fields.
    ///
    /// Two paths, checked in order:
    ///
    /// * the owner of a still-pending complaint may change
    ///   title/description/category/priority — any staff-only field in the
    ///   request fails with `Forbidden`;
    /// * staff/admin may change notes and assignment, and a `status` field
    ///   additionally performs the full status transition (history entry and
    ///   side effects included).
    ///
    /// Everyone else is denied. The document is persisted once and an
    /// `UPDATED_COMPLAINT` event without the `statusChanged` flag is fanned
    /// out.
    pub async fn update(
        &self,
        id: ComplaintId,
        actor: &Actor,
        request: UpdateComplaintRequest,
    ) -> AppResult<Complaint> {
        let request = request.normalized();
        validate::check(&request)?;

        let mut complaint = self.load(id).await?;

        if complaint.is_owned_by(actor.id) && complaint.status == ComplaintStatus::Pending {
            if request.has_staff_fields() {
                return Err(AppError::forbidden(
                    "Only staff may change notes, assignment, or status",
                ));
            }
            apply_owner_fields(&mut complaint, &request);
        } else if actor.is_staff() {
            if let Some(new_status) = request.status {
                complaint.apply_transition(new_status, actor.id, request.status_note.clone())?;
            }
            apply_staff_fields(&mut complaint, &request);
        } else {
            return Err(AppError::forbidden("Not authorized to update this complaint"));
        }

        complaint.touch();
        let complaint = self.store().update(&complaint).await?;

        info!(complaint_id = %id, user = %actor.email, "Complaint updated");

        self.broadcast_snapshot(ComplaintEventKind::UpdatedComplaint, &complaint, false)
            .await;

        Ok(complaint)
    }
}

fn apply_owner_fields(complaint: &mut Complaint, request: &UpdateComplaintRequest) {
    if let Some(title) = &request.title {
        complaint.title = title.clone();
    }
    if let Some(description) = &request.description {
        complaint.description = description.clone();
    }
    if let Some(category) = request.category {
        complaint.category = category;
    }
    if let Some(priority) = request.priority {
        complaint.priority = priority;
    }
}

fn apply_staff_fields(complaint: &mut Complaint, request: &UpdateComplaintRequest) {
    if let Some(notes) = &request.notes {
        complaint.notes = if notes.is_empty() {
            None
        } else {
            Some(notes.clone())
        };
    }
    if let Some(assignee) = request.assigned_to {
        complaint.assigned_to = Some(assignee);
        complaint.assigned_at = Some(Utc::now());
    }
}
