//! Member lifecycle: Active → Banned/Deleted → Restored/Purged
//!
//! Ban and delete move the full member snapshot into an id-keyed archive
//! table and drop the active row; restore is the inverse, defined for the
//! banned archive only; purge removes a snapshot for good. Each
//! transition runs in a single transaction, so an archive row and its
//! active row can never coexist and racing transitions on the same member
//! serialize at the database.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::errors::RegistryError;
use crate::domains::member::models::archived::{ArchiveKind, ArchivedMember};
use crate::domains::member::models::member::Member;

/// Build the archive record for a member leaving the active registry.
pub fn snapshot(
    member: Member,
    kind: ArchiveKind,
    reason: Option<String>,
    archived_at: DateTime<Utc>,
) -> ArchivedMember {
    ArchivedMember {
        kind,
        member_id: member.id,
        reason,
        archived_at,
        snapshot: Json(member.into()),
    }
}

/// Rebuild the active member from an archived snapshot, preserving the
/// original id and every field.
pub fn reconstruct(archived: ArchivedMember) -> Member {
    archived.snapshot.0.into()
}

/// Active → Banned. Fails with NotFound if the member is not active.
pub async fn ban(
    member_id: Uuid,
    reason: Option<String>,
    pool: &PgPool,
) -> Result<ArchivedMember, RegistryError> {
    archive(member_id, ArchiveKind::Banned, reason, pool).await
}

/// Active → Deleted. Fails with NotFound if the member is not active.
pub async fn delete(
    member_id: Uuid,
    reason: Option<String>,
    pool: &PgPool,
) -> Result<ArchivedMember, RegistryError> {
    archive(member_id, ArchiveKind::Deleted, reason, pool).await
}

async fn archive(
    member_id: Uuid,
    kind: ArchiveKind,
    reason: Option<String>,
    pool: &PgPool,
) -> Result<ArchivedMember, RegistryError> {
    let mut tx = pool.begin().await?;

    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1 FOR UPDATE")
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RegistryError::NotFound("member"))?;

    let record = snapshot(member, kind, reason, Utc::now());

    sqlx::query(
        "INSERT INTO archived_members (kind, member_id, reason, archived_at, snapshot)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(record.kind)
    .bind(record.member_id)
    .bind(&record.reason)
    .bind(record.archived_at)
    .bind(&record.snapshot)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(member_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(member_id = %member_id, kind = ?kind, "archived member");
    Ok(record)
}

/// Banned → Active. Fails with NotFound if the id is not in the banned
/// archive. Deleted snapshots have no restore path.
pub async fn restore(member_id: Uuid, pool: &PgPool) -> Result<Member, RegistryError> {
    let mut tx = pool.begin().await?;

    let archived = sqlx::query_as::<_, ArchivedMember>(
        "SELECT * FROM archived_members WHERE kind = $1 AND member_id = $2 FOR UPDATE",
    )
    .bind(ArchiveKind::Banned)
    .bind(member_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(RegistryError::NotFound("archived member"))?;

    let member = reconstruct(archived);
    member.insert(&mut *tx).await?;

    sqlx::query("DELETE FROM archived_members WHERE kind = $1 AND member_id = $2")
        .bind(ArchiveKind::Banned)
        .bind(member_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(member_id = %member_id, "restored banned member");
    Ok(member)
}

/// Banned or Deleted → Purged. Irreversible; fails with NotFound if the
/// id is not present, leaving the archive unchanged.
pub async fn purge(
    kind: ArchiveKind,
    member_id: Uuid,
    pool: &PgPool,
) -> Result<(), RegistryError> {
    let result = sqlx::query("DELETE FROM archived_members WHERE kind = $1 AND member_id = $2")
        .bind(kind)
        .bind(member_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RegistryError::NotFound("archived member"));
    }

    tracing::info!(member_id = %member_id, kind = ?kind, "purged archived member");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_member() -> Member {
        Member {
            id: Uuid::new_v4(),
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 1).unwrap(),
            place_of_birth: Some("Radom".to_string()),
            join_date_to_organization: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            join_date_to_circle: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            id_document_number: "00260112345".to_string(),
            phone_number: "+48123456789".to_string(),
            email: "jan.kowalski@example.org".to_string(),
            contribution: 30,
            circle: "Radom".to_string(),
            region: "Mazowieckie".to_string(),
            membership_form_scan: Some("uploads/00260112345.pdf".to_string()),
            additional_fields: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_restore_roundtrip_preserves_every_field() {
        let member = sample_member();
        let archived = snapshot(
            member.clone(),
            ArchiveKind::Banned,
            Some("statute violation".to_string()),
            Utc::now(),
        );
        assert_eq!(archived.member_id, member.id);

        let restored = reconstruct(archived);
        assert_eq!(restored, member);
    }

    #[test]
    fn test_snapshot_carries_lifecycle_metadata_outside_the_member() {
        let member = sample_member();
        let banned_at = Utc::now();
        let archived = snapshot(
            member.clone(),
            ArchiveKind::Banned,
            Some("spam".to_string()),
            banned_at,
        );

        assert_eq!(archived.kind, ArchiveKind::Banned);
        assert_eq!(archived.reason.as_deref(), Some("spam"));
        assert_eq!(archived.archived_at, banned_at);
        // The member payload itself is untouched by archival
        assert_eq!(reconstruct(archived), member);
    }

    #[test]
    fn test_snapshot_serializes_and_deserializes_identically() {
        let member = sample_member();
        let archived = snapshot(member.clone(), ArchiveKind::Deleted, None, Utc::now());

        let json = serde_json::to_string(&archived.snapshot.0).unwrap();
        let back: crate::domains::member::data::MemberData =
            serde_json::from_str(&json).unwrap();
        assert_eq!(Member::from(back), member);
    }
}
