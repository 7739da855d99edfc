//! # casedesk-storage
//!
//! File storage backends for complaint attachments. Implements the
//! [`FileStore`](casedesk_core::traits::FileStore) boundary defined in
//! `casedesk-core`; the local filesystem backend lives here.

pub mod local;

pub use local::LocalFileStore;
