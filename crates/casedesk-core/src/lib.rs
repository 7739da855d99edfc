//! # casedesk-core
//!
//! Core crate for CaseDesk. Contains boundary traits, configuration schemas,
//! typed identifiers, broadcast event kinds, pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other CaseDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
