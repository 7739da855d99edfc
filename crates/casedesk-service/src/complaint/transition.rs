//! The status transition operation.

use tracing::{info, warn};

use casedesk_core::events::ComplaintEventKind;
use casedesk_core::types::ComplaintId;
use casedesk_core::AppResult;
use casedesk_entity::complaint::{Complaint, ComplaintStatus};
use casedesk_entity::user::Actor;

use crate::guard;

use super::service::ComplaintService;

impl ComplaintService {
    /// Transition a complaint to a new status.
    ///
    /// Staff/admin only — ownership alone never authorizes a transition.
    /// On success the persisted document carries exactly one new history
    /// entry plus the transition's side effects
    /// ([`Complaint::apply_transition`]), and an `UPDATED_COMPLAINT` event
    /// flagged `statusChanged` is fanned out. On any failure the stored
    /// document is untouched.
    ///
    /// Any status may target any other; transitions outside the conventional
    /// lifecycle graph are permitted but logged.
    pub async fn transition(
        &self,
        id: ComplaintId,
        new_status: ComplaintStatus,
        actor: &Actor,
        note: Option<String>,
    ) -> AppResult<Complaint> {
        guard::ensure_staff(actor)?;

        let mut complaint = self.load(id).await?;
        let previous = complaint.status;

        complaint.apply_transition(new_status, actor.id, note)?;

        if !previous.is_conventional_transition(new_status) {
            warn!(
                complaint_id = %id,
                from = %previous,
                to = %new_status,
                "Status transition outside the conventional lifecycle graph"
            );
        }

        let complaint = self.store().update(&complaint).await?;

        info!(
            complaint_id = %id,
            from = %previous,
            to = %new_status,
            changed_by = %actor.email,
            "Complaint status updated"
        );

        self.broadcast_snapshot(ComplaintEventKind::UpdatedComplaint, &complaint, true)
            .await;

        Ok(complaint)
    }
}
