use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::member::data::MemberData;

/// Which archive collection a snapshot lives in.
///
/// Only banned snapshots have a restore path; deleted ones can merely be
/// listed and purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "archive_kind", rename_all = "snake_case")]
pub enum ArchiveKind {
    Banned,
    Deleted,
}

/// One archived member snapshot, keyed by (kind, member_id).
///
/// The snapshot column holds the full serialized member, so restore can
/// re-create the active row with the original id and every field intact.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ArchivedMember {
    pub kind: ArchiveKind,
    pub member_id: Uuid,
    pub reason: Option<String>,
    pub archived_at: DateTime<Utc>,
    pub snapshot: Json<MemberData>,
}

impl ArchivedMember {
    pub async fn find(
        kind: ArchiveKind,
        member_id: Uuid,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM archived_members WHERE kind = $1 AND member_id = $2",
        )
        .bind(kind)
        .bind(member_id)
        .fetch_optional(pool)
        .await
    }

    /// Full archive collection in append order
    pub async fn find_all(kind: ArchiveKind, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM archived_members WHERE kind = $1 ORDER BY archived_at",
        )
        .bind(kind)
        .fetch_all(pool)
        .await
    }
}
