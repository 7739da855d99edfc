//! Comment sub-operations.

use tracing::info;

use casedesk_core::events::ComplaintEventKind;
use casedesk_core::types::ComplaintId;
use casedesk_core::AppResult;
use casedesk_entity::complaint::Comment;
use casedesk_entity::user::Actor;

use crate::guard;

use super::service::ComplaintService;

impl ComplaintService {
    /// Add a comment to a complaint.
    ///
    /// Allowed for the owner and for staff/admin; staff authorship is
    /// recorded on the comment. Broadcasts `NEW_COMMENT` with
    /// `{ complaintId, comment }`. A denied or invalid request leaves the
    /// comment sequence untouched and emits nothing.
    pub async fn add_comment(
        &self,
        id: ComplaintId,
        actor: &Actor,
        text: &str,
    ) -> AppResult<Comment> {
        let mut complaint = self.load(id).await?;
        guard::ensure_can_access(&complaint, actor)?;

        let comment = complaint.add_comment(actor.id, text, actor.is_staff())?;
        self.store().update(&complaint).await?;

        info!(complaint_id = %id, user = %actor.email, "Comment added");

        self.events()
            .broadcast(
                ComplaintEventKind::NewComment,
                serde_json::json!({
                    "complaintId": id,
                    "comment": comment,
                }),
                None,
            )
            .await;

        Ok(comment)
    }

    /// Return a complaint's comments in insertion order.
    pub async fn list_comments(&self, id: ComplaintId, actor: &Actor) -> AppResult<Vec<Comment>> {
        let complaint = self.load(id).await?;
        guard::ensure_can_access(&complaint, actor)?;
        Ok(complaint.comments)
    }
}
