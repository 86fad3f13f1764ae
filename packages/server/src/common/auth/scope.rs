//! Access scoping: which records a role descriptor may see and mutate
//!
//! Every multi-record read is filtered through [`scope`] before leaving
//! the core, and every record-level mutation passes
//! [`authorize_mutation`] first. Record names are normalized on each
//! comparison; role qualifiers are already canonical.

use crate::common::text::normalize;

use super::errors::AuthError;
use super::role::Role;

/// A record kind the scoping engine can filter.
///
/// `unit_key` is the field a bare unit-level identifier is compared
/// against. Members key on their `circle` field while circles key on
/// their own `name` - the two listings intentionally disagree.
pub trait ScopeTarget {
    fn region(&self) -> &str;
    fn unit_key(&self) -> &str;
}

/// Whether a single record is visible to the given role.
pub fn is_visible<T: ScopeTarget>(role: &Role, record: &T) -> bool {
    match role {
        Role::NationalAdmin | Role::NationalAuditor => true,
        Role::RegionalAdmin { region } | Role::RegionalAuditor { region } => {
            !region.is_empty() && normalize(record.region()) == *region
        }
        Role::UnitMember { identifier } => {
            !identifier.is_empty() && normalize(record.unit_key()) == *identifier
        }
    }
}

/// Filter a collection down to the records visible to the given role.
///
/// National tiers receive the input collection unchanged.
pub fn scope<T: ScopeTarget>(role: &Role, records: Vec<T>) -> Vec<T> {
    match role {
        Role::NationalAdmin | Role::NationalAuditor => records,
        _ => records
            .into_iter()
            .filter(|record| is_visible(role, record))
            .collect(),
    }
}

/// Gate a record-level mutation behind the same predicate as visibility.
pub fn authorize_mutation<T: ScopeTarget>(role: &Role, record: &T) -> Result<(), AuthError> {
    if is_visible(role, record) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(
            "record is outside the caller's scope".to_string(),
        ))
    }
}

/// Gate an operation reserved for national administrators.
pub fn require_national_admin(role: &Role) -> Result<(), AuthError> {
    if role.is_national_admin() {
        Ok(())
    } else {
        Err(AuthError::AdminRequired)
    }
}

/// Whether a caller may fetch an uploaded document owned by a member in
/// the given region and circle.
///
/// The caller's scope must match the owning member's normalized region or
/// circle; national tiers see everything.
pub fn can_access_document(role: &Role, owner_region: &str, owner_circle: &str) -> bool {
    match role {
        Role::NationalAdmin | Role::NationalAuditor => true,
        Role::RegionalAdmin { region } | Role::RegionalAuditor { region } => {
            !region.is_empty()
                && (normalize(owner_region) == *region || normalize(owner_circle) == *region)
        }
        Role::UnitMember { identifier } => {
            !identifier.is_empty()
                && (normalize(owner_region) == *identifier
                    || normalize(owner_circle) == *identifier)
        }
    }
}
