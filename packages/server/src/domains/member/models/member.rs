use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::common::auth::ScopeTarget;

/// Member model - SQL persistence layer
///
/// The active registry row for one member. Banned and deleted members do
/// not live here; their snapshots move to `archived_members` (see the
/// lifecycle module) and come back through restore.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,

    pub date_of_birth: NaiveDate,
    pub place_of_birth: Option<String>,

    pub join_date_to_organization: NaiveDate,
    pub join_date_to_circle: NaiveDate,

    // Unique, immutable in normal operation; edit flows may re-key it
    pub id_document_number: String,
    pub phone_number: String,
    pub email: String,

    /// Accrued contribution total, replaced wholesale by recalculation
    pub contribution: i64,

    pub circle: String,
    pub region: String,

    /// Reference to an uploaded membership form scan; storage is external
    pub membership_form_scan: Option<String>,
    pub additional_fields: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Member {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_document_number(
        document_number: &str,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id_document_number = $1")
            .bind(document_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_phone(phone: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE phone_number = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// All active members, in registry order
    pub async fn find_all(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members ORDER BY last_name, first_name")
            .fetch_all(pool)
            .await
    }

    /// Insert the full row. Takes any executor so restore can run it
    /// inside the archive transaction.
    pub async fn insert<'e, E: PgExecutor<'e>>(&self, executor: E) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (
                id,
                first_name,
                last_name,
                date_of_birth,
                place_of_birth,
                join_date_to_organization,
                join_date_to_circle,
                id_document_number,
                phone_number,
                email,
                contribution,
                circle,
                region,
                membership_form_scan,
                additional_fields,
                created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(self.date_of_birth)
        .bind(&self.place_of_birth)
        .bind(self.join_date_to_organization)
        .bind(self.join_date_to_circle)
        .bind(&self.id_document_number)
        .bind(&self.phone_number)
        .bind(&self.email)
        .bind(self.contribution)
        .bind(&self.circle)
        .bind(&self.region)
        .bind(&self.membership_form_scan)
        .bind(&self.additional_fields)
        .bind(self.created_at)
        .fetch_one(executor)
        .await
    }

    /// Write the full row back by id
    pub async fn update(&self, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET
                first_name = $2,
                last_name = $3,
                date_of_birth = $4,
                place_of_birth = $5,
                join_date_to_organization = $6,
                join_date_to_circle = $7,
                id_document_number = $8,
                phone_number = $9,
                email = $10,
                contribution = $11,
                circle = $12,
                region = $13,
                membership_form_scan = $14,
                additional_fields = $15
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(self.date_of_birth)
        .bind(&self.place_of_birth)
        .bind(self.join_date_to_organization)
        .bind(self.join_date_to_circle)
        .bind(&self.id_document_number)
        .bind(&self.phone_number)
        .bind(&self.email)
        .bind(self.contribution)
        .bind(&self.circle)
        .bind(&self.region)
        .bind(&self.membership_form_scan)
        .bind(&self.additional_fields)
        .fetch_one(pool)
        .await
    }
}

// Members are scoped by their region and, for bare unit identifiers,
// by the circle they belong to.
impl ScopeTarget for Member {
    fn region(&self) -> &str {
        &self.region
    }

    fn unit_key(&self) -> &str {
        &self.circle
    }
}
