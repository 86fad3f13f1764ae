use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::auth::ScopeTarget;
use crate::domains::member::models::member::Member as MemberModel;

/// Serialized member representation
///
/// The shape members cross the core's boundary in: API responses and the
/// archive snapshot format. Carries every persisted field so an archived
/// snapshot can rebuild the active row exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberData {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: Option<String>,
    pub join_date_to_organization: NaiveDate,
    pub join_date_to_circle: NaiveDate,
    pub id_document_number: String,
    pub phone_number: String,
    pub email: String,
    pub contribution: i64,
    pub circle: String,
    pub region: String,
    pub membership_form_scan: Option<String>,
    pub additional_fields: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MemberModel> for MemberData {
    fn from(member: MemberModel) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            date_of_birth: member.date_of_birth,
            place_of_birth: member.place_of_birth,
            join_date_to_organization: member.join_date_to_organization,
            join_date_to_circle: member.join_date_to_circle,
            id_document_number: member.id_document_number,
            phone_number: member.phone_number,
            email: member.email,
            contribution: member.contribution,
            circle: member.circle,
            region: member.region,
            membership_form_scan: member.membership_form_scan,
            additional_fields: member.additional_fields,
            created_at: member.created_at,
        }
    }
}

impl From<MemberData> for MemberModel {
    fn from(data: MemberData) -> Self {
        Self {
            id: data.id,
            first_name: data.first_name,
            last_name: data.last_name,
            date_of_birth: data.date_of_birth,
            place_of_birth: data.place_of_birth,
            join_date_to_organization: data.join_date_to_organization,
            join_date_to_circle: data.join_date_to_circle,
            id_document_number: data.id_document_number,
            phone_number: data.phone_number,
            email: data.email,
            contribution: data.contribution,
            circle: data.circle,
            region: data.region,
            membership_form_scan: data.membership_form_scan,
            additional_fields: data.additional_fields,
            created_at: data.created_at,
        }
    }
}

// Archived snapshots are scope-checked the same way active members are,
// e.g. before restore.
impl ScopeTarget for MemberData {
    fn region(&self) -> &str {
        &self.region
    }

    fn unit_key(&self) -> &str {
        &self.circle
    }
}
