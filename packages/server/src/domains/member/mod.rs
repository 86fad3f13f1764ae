//! Member domain - registration, scoped access, dues accrual and lifecycle

pub mod commands;
pub mod data;
pub mod dues;
pub mod lifecycle;
pub mod models;

// Re-export commonly used types
pub use data::MemberData;
pub use models::archived::{ArchiveKind, ArchivedMember};
pub use models::member::Member;
