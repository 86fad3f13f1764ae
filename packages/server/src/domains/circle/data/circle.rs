use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::circle::models::circle::Circle as CircleModel;

/// Serialized circle representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleData {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

impl From<CircleModel> for CircleData {
    fn from(circle: CircleModel) -> Self {
        Self {
            id: circle.id,
            name: circle.name,
            region: circle.region,
            created_at: circle.created_at,
        }
    }
}
