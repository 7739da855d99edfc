//! # casedesk-store
//!
//! Persistence boundary for CaseDesk. Defines the [`ComplaintStore`] trait —
//! the queryable document store complaints live in — together with the
//! filter/sort query types and an in-memory implementation backed by a
//! concurrent map, used by tests and single-node deployments.
//!
//! Complaint documents are read and written as whole aggregates: embedded
//! comments, attachments, and status history travel with the document.

pub mod memory;
pub mod query;
pub mod repository;

pub use memory::MemoryComplaintStore;
pub use query::{ComplaintFilter, ComplaintSort, SortField, SortOrder};
pub use repository::ComplaintStore;
