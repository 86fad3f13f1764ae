//! Role-scoping authorization scenarios
//!
//! End-to-end over the public API: raw role strings resolve to role
//! descriptors, and the scoping engine filters member and circle
//! collections per tier. No database required - the scoping engine is
//! pure.

use chrono::{NaiveDate, Utc};
use registry_core::common::auth::{
    can_access_document, is_visible, scope, Role, RoleConfig,
};
use registry_core::domains::circle::Circle;
use registry_core::domains::member::Member;
use uuid::Uuid;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_member(last_name: &str, region: &str, circle: &str) -> Member {
    Member {
        id: Uuid::new_v4(),
        first_name: "Test".to_string(),
        last_name: last_name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
        place_of_birth: None,
        join_date_to_organization: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        join_date_to_circle: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        id_document_number: format!("doc-{}", last_name),
        phone_number: format!("+4812345{:04}", last_name.len()),
        email: format!("{last_name}@example.org"),
        contribution: 0,
        circle: circle.to_string(),
        region: region.to_string(),
        membership_form_scan: None,
        additional_fields: None,
        created_at: Utc::now(),
    }
}

fn test_registry() -> Vec<Member> {
    vec![
        test_member("Kowalski", "Mazowieckie", "Warszawa Śródmieście"),
        test_member("Nowak", "Mazowieckie", "Radom"),
        test_member("Wiśniewska", "Śląskie", "Katowice"),
        test_member("Zielińska", "Pomorskie", "Gdańsk Wrzeszcz"),
    ]
}

fn test_circles() -> Vec<Circle> {
    ["Warszawa Śródmieście", "Radom", "Katowice"]
        .iter()
        .zip(["Mazowieckie", "Mazowieckie", "Śląskie"])
        .map(|(name, region)| Circle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            region: region.to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

fn resolve(raw: &str) -> Role {
    Role::resolve(raw, &RoleConfig::default())
}

// ============================================================================
// Member listing scope
// ============================================================================

#[test]
fn national_admin_sees_full_registry() {
    let role = resolve("sekretariat");
    assert_eq!(role, Role::NationalAdmin);
    assert_eq!(scope(&role, test_registry()).len(), 4);
}

#[test]
fn national_auditor_sees_full_registry() {
    let role = resolve("kkrd");
    assert_eq!(role, Role::NationalAuditor);
    assert_eq!(scope(&role, test_registry()).len(), 4);
}

#[test]
fn regional_admin_sees_own_region_only() {
    let role = resolve("mazowieckie");
    let visible = scope(&role, test_registry());
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|m| m.region == "Mazowieckie"));
}

#[test]
fn regional_auditor_sees_own_region_only() {
    let role = resolve("krd.mazowieckie");
    assert_eq!(
        role,
        Role::RegionalAuditor {
            region: "mazowieckie".to_string()
        }
    );
    let visible = scope(&role, test_registry());
    assert_eq!(visible.len(), 2);

    let elsewhere = resolve("krd.lubuskie");
    assert!(scope(&elsewhere, test_registry()).is_empty());
}

#[test]
fn unit_member_sees_own_circle_only() {
    let role = resolve("radom");
    let visible = scope(&role, test_registry());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].last_name, "Nowak");
}

#[test]
fn diacritics_in_record_names_do_not_hide_records() {
    // Role identifiers are canonical; record names carry accents/spaces
    let role = resolve("warszawasrodmiescie");
    let visible = scope(&role, test_registry());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].circle, "Warszawa Śródmieście");
}

#[test]
fn unrecognized_role_sees_nothing() {
    let role = resolve("xyz");
    assert_eq!(
        role,
        Role::UnitMember {
            identifier: "xyz".to_string()
        }
    );
    assert!(scope(&role, test_registry()).is_empty());
}

#[test]
fn empty_role_sees_nothing() {
    let role = resolve("");
    assert!(scope(&role, test_registry()).is_empty());
}

// ============================================================================
// Circle listing scope
// ============================================================================

#[test]
fn circle_listing_matches_bare_identifier_against_circle_name() {
    // The same unit-level role keys on the member's circle in member
    // listings but on the circle's own name in circle listings.
    let role = resolve("katowice");

    let circles = scope(&role, test_circles());
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].name, "Katowice");

    let members = scope(&role, test_registry());
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].circle, "Katowice");
}

#[test]
fn regional_admin_lists_circles_in_region() {
    let role = resolve("mazowieckie");
    let circles = scope(&role, test_circles());
    assert_eq!(circles.len(), 2);
}

// ============================================================================
// Single-record visibility and document access
// ============================================================================

#[test]
fn visibility_predicate_matches_listing_scope() {
    let member = test_member("Lis", "Śląskie", "Katowice");
    assert!(is_visible(&resolve("slaskie"), &member));
    assert!(is_visible(&resolve("krd.slaskie"), &member));
    assert!(is_visible(&resolve("katowice"), &member));
    assert!(!is_visible(&resolve("mazowieckie"), &member));
    assert!(!is_visible(&resolve("radom"), &member));
}

#[test]
fn document_access_follows_owner_scope() {
    let admin = resolve("sekretariat");
    let auditor = resolve("kkrd");
    let regional = resolve("pomorskie");
    let unit = resolve("gdanskwrzeszcz");
    let outsider = resolve("krd.opolskie");

    let (region, circle) = ("Pomorskie", "Gdańsk Wrzeszcz");
    assert!(can_access_document(&admin, region, circle));
    assert!(can_access_document(&auditor, region, circle));
    assert!(can_access_document(&regional, region, circle));
    assert!(can_access_document(&unit, region, circle));
    assert!(!can_access_document(&outsider, region, circle));
}
