//! # casedesk-service
//!
//! Business logic for the complaint lifecycle: creation, queries, field
//! updates, the status state machine, comment and attachment sub-operations,
//! and the centralized ownership/authorization guard.
//!
//! Services receive an already-authenticated [`Actor`](casedesk_entity::Actor)
//! from the auth boundary and orchestrate the store, the file store, and the
//! broadcast hub behind their respective traits.

pub mod complaint;
pub mod guard;

mod validate;

pub use complaint::requests::{ContactPayload, CreateComplaintRequest, UpdateComplaintRequest};
pub use complaint::service::{ComplaintService, ComplaintStats};
