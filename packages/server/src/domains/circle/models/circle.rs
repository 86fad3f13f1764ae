use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::auth::ScopeTarget;

/// Circle model - SQL persistence layer
///
/// A named local unit belonging to a region. Members reference circles by
/// name, not id.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

impl Circle {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM circles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(name: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM circles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_all(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM circles ORDER BY region, name")
            .fetch_all(pool)
            .await
    }

    pub async fn insert(&self, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO circles (id, name, region, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.region)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
    }

    pub async fn update(&self, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE circles SET name = $2, region = $3 WHERE id = $1 RETURNING *",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.region)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(id: Uuid, pool: &PgPool) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM circles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// Circle listings match a bare unit identifier against the circle's own
// name, unlike member listings which match the member's circle field.
impl ScopeTarget for Circle {
    fn region(&self) -> &str {
        &self.region
    }

    fn unit_key(&self) -> &str {
        &self.name
    }
}
