//! Role resolution: raw role string → structured role descriptor
//!
//! Role identifiers are issued as organization email prefixes and are
//! already canonical (lowercase, accent-free). Resolution order is a
//! strict tie-break; see [`Role::resolve`].

use std::collections::HashSet;

/// One of the five tiers of the role hierarchy, with its scope qualifier.
///
/// Derived per request from the caller's session-held role string,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    NationalAdmin,
    RegionalAdmin { region: String },
    NationalAuditor,
    RegionalAuditor { region: String },
    /// Unit-level member or officer, identified by a bare circle-or-region
    /// name. Unrecognized and empty role strings land here; an identifier
    /// that matches nothing yields an empty scope.
    UnitMember { identifier: String },
}

impl Role {
    /// Parse a raw role string against the configured role sets.
    ///
    /// Resolution order is a strict tie-break:
    /// 1. national-administrator set
    /// 2. national-auditor token, exact match
    /// 3. regional-administrator set (the literal is the region name)
    /// 4. regional-auditor prefix (`krd.<region>`)
    /// 5. bare identifier fallback
    ///
    /// Never fails; malformed input resolves to the fallback tier.
    pub fn resolve(raw: &str, config: &RoleConfig) -> Role {
        if config.national_admins.contains(raw) {
            return Role::NationalAdmin;
        }
        if raw == config.national_auditor {
            return Role::NationalAuditor;
        }
        if config.regional_admins.contains(raw) {
            return Role::RegionalAdmin {
                region: raw.to_string(),
            };
        }
        if let Some(region) = raw.strip_prefix(&config.regional_auditor_prefix) {
            return Role::RegionalAuditor {
                region: region.to_string(),
            };
        }
        Role::UnitMember {
            identifier: raw.to_string(),
        }
    }

    pub fn is_national_admin(&self) -> bool {
        matches!(self, Role::NationalAdmin)
    }
}

/// Closed role-identifier sets, global configuration.
#[derive(Debug, Clone)]
pub struct RoleConfig {
    pub national_admins: HashSet<String>,
    /// Regional-administrator identifiers; each literal is the canonical
    /// (normalized) name of the region it administers.
    pub regional_admins: HashSet<String>,
    pub national_auditor: String,
    pub regional_auditor_prefix: String,
}

impl Default for RoleConfig {
    fn default() -> Self {
        let national_admins = ["administrator", "sekretariat", "zarzad"]
            .into_iter()
            .map(String::from)
            .collect();

        let regional_admins = [
            "dolnoslaskie",
            "kujawsko-pomorskie",
            "lubelskie",
            "lubuskie",
            "lodzkie",
            "malopolskie",
            "mazowieckie",
            "opolskie",
            "podkarpackie",
            "podlaskie",
            "pomorskie",
            "slaskie",
            "swietokrzyskie",
            "warminsko-mazurskie",
            "wielkopolskie",
            "zachodniopomorskie",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            national_admins,
            regional_admins,
            national_auditor: "kkrd".to_string(),
            regional_auditor_prefix: "krd.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_admin_set() {
        let config = RoleConfig::default();
        assert_eq!(Role::resolve("sekretariat", &config), Role::NationalAdmin);
        assert_eq!(Role::resolve("administrator", &config), Role::NationalAdmin);
    }

    #[test]
    fn test_national_auditor_exact_token() {
        let config = RoleConfig::default();
        assert_eq!(Role::resolve("kkrd", &config), Role::NationalAuditor);
    }

    #[test]
    fn test_regional_admin_literal_is_region() {
        let config = RoleConfig::default();
        assert_eq!(
            Role::resolve("mazowieckie", &config),
            Role::RegionalAdmin {
                region: "mazowieckie".to_string()
            }
        );
    }

    #[test]
    fn test_regional_auditor_compound_token() {
        let config = RoleConfig::default();
        assert_eq!(
            Role::resolve("krd.mazowieckie", &config),
            Role::RegionalAuditor {
                region: "mazowieckie".to_string()
            }
        );
    }

    #[test]
    fn test_unrecognized_string_falls_through_to_unit_member() {
        let config = RoleConfig::default();
        assert_eq!(
            Role::resolve("xyz", &config),
            Role::UnitMember {
                identifier: "xyz".to_string()
            }
        );
    }

    #[test]
    fn test_empty_string_resolves_to_empty_unit_scope() {
        let config = RoleConfig::default();
        assert_eq!(
            Role::resolve("", &config),
            Role::UnitMember {
                identifier: String::new()
            }
        );
    }

    #[test]
    fn test_bare_auditor_prefix_yields_empty_region() {
        let config = RoleConfig::default();
        assert_eq!(
            Role::resolve("krd.", &config),
            Role::RegionalAuditor {
                region: String::new()
            }
        );
    }

    #[test]
    fn test_admin_set_wins_over_auditor_prefix() {
        // A hypothetical national-admin identifier starting with the auditor
        // prefix must still resolve as an administrator.
        let mut config = RoleConfig::default();
        config.national_admins.insert("krd.centrala".to_string());
        assert_eq!(Role::resolve("krd.centrala", &config), Role::NationalAdmin);
    }
}
