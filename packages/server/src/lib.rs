// Membership Registry - API Core
//
// This crate provides the core of a national membership registry:
// role-scoped access to member and circle records, monthly dues accrual,
// and the member lifecycle (ban/delete/restore/purge) over an archival store.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
