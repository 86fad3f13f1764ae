//! Member operations with authorization applied
//!
//! Every entry point takes the caller's resolved [`Role`]. Multi-record
//! reads are filtered through the scoping engine before they leave, and
//! record-level mutations are gated by the same predicate: being logged
//! in is never enough to touch a record by id.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::auth::{
    authorize_mutation, is_visible, require_national_admin, scope, AuthError, Role,
};
use crate::common::errors::RegistryError;
use crate::common::validate;
use crate::config::Config;
use crate::domains::member::dues;
use crate::domains::member::lifecycle;
use crate::domains::member::models::archived::{ArchiveKind, ArchivedMember};
use crate::domains::member::models::member::Member;

/// Input for registering a new member.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: Option<String>,
    pub join_date_to_organization: NaiveDate,
    pub join_date_to_circle: NaiveDate,
    pub id_document_number: String,
    pub phone_number: String,
    pub email: String,
    pub circle: String,
    pub region: String,
    pub membership_form_scan: Option<String>,
    pub additional_fields: Option<String>,
}

/// Field-wise edit; `None` leaves the current value in place.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub place_of_birth: Option<String>,
    pub join_date_to_organization: Option<NaiveDate>,
    pub join_date_to_circle: Option<NaiveDate>,
    pub id_document_number: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub contribution: Option<i64>,
    pub circle: Option<String>,
    pub region: Option<String>,
    pub membership_form_scan: Option<String>,
    pub additional_fields: Option<String>,
}

fn require_join_date_order(
    join_date_to_organization: NaiveDate,
    join_date_to_circle: NaiveDate,
) -> Result<(), RegistryError> {
    if join_date_to_circle < join_date_to_organization {
        return Err(RegistryError::Validation(
            "circle join date precedes organization join date".to_string(),
        ));
    }
    Ok(())
}

/// Register a new member.
///
/// Validates contact fields and the join-date order, rejects duplicate
/// unique fields, computes the initial contribution as of the current
/// month, and inserts. The caller must be scoped for the circle/region
/// the member is registered into.
pub async fn register_member(
    new: NewMember,
    role: &Role,
    pool: &PgPool,
    config: &Config,
) -> Result<Member, RegistryError> {
    validate::require_email(&new.email)?;
    validate::require_phone(&new.phone_number)?;
    validate::require_document_number(&new.id_document_number)?;
    require_join_date_order(new.join_date_to_organization, new.join_date_to_circle)?;

    if Member::find_by_document_number(&new.id_document_number, pool)
        .await?
        .is_some()
    {
        return Err(RegistryError::Conflict(
            "a member with this document number already exists".to_string(),
        ));
    }
    if Member::find_by_phone(&new.phone_number, pool).await?.is_some() {
        return Err(RegistryError::Conflict(
            "a member with this phone number already exists".to_string(),
        ));
    }
    if Member::find_by_email(&new.email, pool).await?.is_some() {
        return Err(RegistryError::Conflict(
            "a member with this email already exists".to_string(),
        ));
    }

    let mut member = Member {
        id: Uuid::new_v4(),
        first_name: new.first_name,
        last_name: new.last_name,
        date_of_birth: new.date_of_birth,
        place_of_birth: new.place_of_birth,
        join_date_to_organization: new.join_date_to_organization,
        join_date_to_circle: new.join_date_to_circle,
        id_document_number: new.id_document_number,
        phone_number: new.phone_number,
        email: new.email,
        contribution: 0,
        circle: new.circle,
        region: new.region,
        membership_form_scan: new.membership_form_scan,
        additional_fields: new.additional_fields,
        created_at: Utc::now(),
    };

    authorize_mutation(role, &member)?;

    let reference = dues::month_start(Utc::now().date_naive());
    member.contribution = dues::accrue(&member, reference, config);

    let member = member.insert(pool).await?;
    tracing::info!(member_id = %member.id, circle = %member.circle, "registered member");
    Ok(member)
}

/// Edit a member's fields, including re-keying the document number.
pub async fn update_member(
    member_id: Uuid,
    update: MemberUpdate,
    role: &Role,
    pool: &PgPool,
) -> Result<Member, RegistryError> {
    let mut member = Member::find_by_id(member_id, pool)
        .await?
        .ok_or(RegistryError::NotFound("member"))?;

    authorize_mutation(role, &member)?;

    if let Some(email) = &update.email {
        validate::require_email(email)?;
        if *email != member.email && Member::find_by_email(email, pool).await?.is_some() {
            return Err(RegistryError::Conflict(
                "a member with this email already exists".to_string(),
            ));
        }
    }
    if let Some(phone) = &update.phone_number {
        validate::require_phone(phone)?;
        if *phone != member.phone_number
            && Member::find_by_phone(phone, pool).await?.is_some()
        {
            return Err(RegistryError::Conflict(
                "a member with this phone number already exists".to_string(),
            ));
        }
    }
    if let Some(document_number) = &update.id_document_number {
        validate::require_document_number(document_number)?;
        if *document_number != member.id_document_number
            && Member::find_by_document_number(document_number, pool)
                .await?
                .is_some()
        {
            return Err(RegistryError::Conflict(
                "a member with this document number already exists".to_string(),
            ));
        }
    }

    if let Some(first_name) = update.first_name {
        member.first_name = first_name;
    }
    if let Some(last_name) = update.last_name {
        member.last_name = last_name;
    }
    if let Some(date_of_birth) = update.date_of_birth {
        member.date_of_birth = date_of_birth;
    }
    if let Some(place_of_birth) = update.place_of_birth {
        member.place_of_birth = Some(place_of_birth);
    }
    if let Some(join_date) = update.join_date_to_organization {
        member.join_date_to_organization = join_date;
    }
    if let Some(join_date) = update.join_date_to_circle {
        member.join_date_to_circle = join_date;
    }
    if let Some(document_number) = update.id_document_number {
        member.id_document_number = document_number;
    }
    if let Some(phone) = update.phone_number {
        member.phone_number = phone;
    }
    if let Some(email) = update.email {
        member.email = email;
    }
    if let Some(contribution) = update.contribution {
        member.contribution = contribution;
    }
    if let Some(circle) = update.circle {
        member.circle = circle;
    }
    if let Some(region) = update.region {
        member.region = region;
    }
    if let Some(scan) = update.membership_form_scan {
        member.membership_form_scan = Some(scan);
    }
    if let Some(additional) = update.additional_fields {
        member.additional_fields = Some(additional);
    }

    require_join_date_order(member.join_date_to_organization, member.join_date_to_circle)?;

    let member = member.update(pool).await?;
    tracing::info!(member_id = %member.id, "updated member");
    Ok(member)
}

/// Single-record read, gated by the same visibility predicate as listings.
pub async fn get_member(
    member_id: Uuid,
    role: &Role,
    pool: &PgPool,
) -> Result<Member, RegistryError> {
    let member = Member::find_by_id(member_id, pool)
        .await?
        .ok_or(RegistryError::NotFound("member"))?;
    if !is_visible(role, &member) {
        return Err(AuthError::PermissionDenied(
            "record is outside the caller's scope".to_string(),
        )
        .into());
    }
    Ok(member)
}

/// All members visible to the caller.
pub async fn list_members(role: &Role, pool: &PgPool) -> Result<Vec<Member>, RegistryError> {
    let members = Member::find_all(pool).await?;
    Ok(scope(role, members))
}

/// Ban a member the caller is scoped for.
pub async fn ban_member(
    member_id: Uuid,
    reason: Option<String>,
    role: &Role,
    pool: &PgPool,
) -> Result<ArchivedMember, RegistryError> {
    let member = Member::find_by_id(member_id, pool)
        .await?
        .ok_or(RegistryError::NotFound("member"))?;
    authorize_mutation(role, &member)?;
    lifecycle::ban(member_id, reason, pool).await
}

/// Delete a member the caller is scoped for.
pub async fn delete_member(
    member_id: Uuid,
    reason: Option<String>,
    role: &Role,
    pool: &PgPool,
) -> Result<ArchivedMember, RegistryError> {
    let member = Member::find_by_id(member_id, pool)
        .await?
        .ok_or(RegistryError::NotFound("member"))?;
    authorize_mutation(role, &member)?;
    lifecycle::delete(member_id, reason, pool).await
}

/// Restore a banned member the caller is scoped for.
pub async fn restore_member(
    member_id: Uuid,
    role: &Role,
    pool: &PgPool,
) -> Result<Member, RegistryError> {
    let archived = ArchivedMember::find(ArchiveKind::Banned, member_id, pool)
        .await?
        .ok_or(RegistryError::NotFound("archived member"))?;
    authorize_mutation(role, &archived.snapshot.0)?;
    lifecycle::restore(member_id, pool).await
}

/// Permanently remove an archived snapshot. National administrators only.
pub async fn purge_archived(
    kind: ArchiveKind,
    member_id: Uuid,
    role: &Role,
    pool: &PgPool,
) -> Result<(), RegistryError> {
    require_national_admin(role)?;
    lifecycle::purge(kind, member_id, pool).await
}

/// Full archive listing for the admin panel. National administrators only.
pub async fn list_archived(
    kind: ArchiveKind,
    role: &Role,
    pool: &PgPool,
) -> Result<Vec<ArchivedMember>, RegistryError> {
    require_national_admin(role)?;
    Ok(ArchivedMember::find_all(kind, pool).await?)
}
