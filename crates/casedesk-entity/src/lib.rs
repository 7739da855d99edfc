//! # casedesk-entity
//!
//! Domain entity models for CaseDesk: the complaint aggregate with its
//! embedded sub-entities (attachments, comments, status history), the
//! lifecycle enums, and the authenticated actor types.

pub mod complaint;
pub mod user;

pub use complaint::{
    Attachment, Comment, Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus,
    ContactInfo, StatusChange,
};
pub use user::{Actor, UserRole};
