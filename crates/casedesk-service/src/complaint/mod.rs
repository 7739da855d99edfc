//! Complaint lifecycle operations.
//!
//! The [`ComplaintService`](service::ComplaintService) is split across
//! focused modules: creation and queries in `service`, field updates and the
//! status state machine in `update` and `transition`, and the comment and
//! attachment sub-operations in their own files.

pub mod attachments;
pub mod comments;
pub mod requests;
pub mod service;
pub mod transition;
pub mod update;
