//! The complaint store trait consumed by the service layer.

use async_trait::async_trait;

use casedesk_core::traits::Repository;
use casedesk_core::types::pagination::{PageRequest, PageResponse};
use casedesk_core::types::ComplaintId;
use casedesk_core::AppResult;
use casedesk_entity::complaint::Complaint;

use crate::query::{ComplaintFilter, ComplaintSort};

/// A queryable document store owning complaint aggregates.
///
/// Extends the generic [`Repository`] contract with the filtered, sorted,
/// paginated queries the listing operations need. Implementations must make
/// `update` an atomic whole-document replace; callers rely on a saved
/// complaint either fully reflecting a change (including its history entry)
/// or not at all.
#[async_trait]
pub trait ComplaintStore: Repository<Complaint, ComplaintId> {
    /// Find one page of complaints matching a filter, ordered by `sort`.
    async fn find_page(
        &self,
        filter: &ComplaintFilter,
        sort: ComplaintSort,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>>;

    /// Count complaints matching a filter.
    async fn count_matching(&self, filter: &ComplaintFilter) -> AppResult<u64>;
}
