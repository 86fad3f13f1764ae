pub mod archived;
pub mod member;

pub use archived::{ArchiveKind, ArchivedMember};
pub use member::Member;
