//! Circle operations
//!
//! Circles are created, edited and deleted by national administrators
//! only; listing is scoped like member listings, except a bare unit
//! identifier matches the circle's own name.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::auth::{require_national_admin, scope, Role};
use crate::common::errors::RegistryError;
use crate::domains::circle::models::circle::Circle;

#[derive(Debug, Clone, Default)]
pub struct CircleUpdate {
    pub name: Option<String>,
    pub region: Option<String>,
}

pub async fn create_circle(
    name: String,
    region: String,
    role: &Role,
    pool: &PgPool,
) -> Result<Circle, RegistryError> {
    require_national_admin(role)?;

    if name.trim().is_empty() || region.trim().is_empty() {
        return Err(RegistryError::Validation(
            "circle name and region are required".to_string(),
        ));
    }
    if Circle::find_by_name(&name, pool).await?.is_some() {
        return Err(RegistryError::Conflict(
            "a circle with this name already exists".to_string(),
        ));
    }

    let circle = Circle {
        id: Uuid::new_v4(),
        name,
        region,
        created_at: Utc::now(),
    };
    let circle = circle.insert(pool).await?;

    tracing::info!(circle_id = %circle.id, name = %circle.name, "created circle");
    Ok(circle)
}

pub async fn update_circle(
    circle_id: Uuid,
    update: CircleUpdate,
    role: &Role,
    pool: &PgPool,
) -> Result<Circle, RegistryError> {
    require_national_admin(role)?;

    let mut circle = Circle::find_by_id(circle_id, pool)
        .await?
        .ok_or(RegistryError::NotFound("circle"))?;

    if let Some(name) = update.name {
        if name != circle.name && Circle::find_by_name(&name, pool).await?.is_some() {
            return Err(RegistryError::Conflict(
                "a circle with this name already exists".to_string(),
            ));
        }
        circle.name = name;
    }
    if let Some(region) = update.region {
        circle.region = region;
    }

    let circle = circle.update(pool).await?;
    tracing::info!(circle_id = %circle.id, "updated circle");
    Ok(circle)
}

pub async fn delete_circle(
    circle_id: Uuid,
    role: &Role,
    pool: &PgPool,
) -> Result<(), RegistryError> {
    require_national_admin(role)?;

    if Circle::delete(circle_id, pool).await? == 0 {
        return Err(RegistryError::NotFound("circle"));
    }

    tracing::info!(circle_id = %circle_id, "deleted circle");
    Ok(())
}

/// All circles visible to the caller.
pub async fn list_circles(role: &Role, pool: &PgPool) -> Result<Vec<Circle>, RegistryError> {
    let circles = Circle::find_all(pool).await?;
    Ok(scope(role, circles))
}
