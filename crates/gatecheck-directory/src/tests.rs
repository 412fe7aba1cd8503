//! Unit tests for gatecheck-directory

use chrono::{TimeZone, Utc};
use gatecheck_types::{Environment, Group, Profile};

use crate::{DirectoryError, InMemoryDirectory, UserRecord, UserStore};

fn demo_directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_user(
            UserRecord::new("alice", Profile::Prod)
                .with_groups(
                    Environment::Production,
                    [Group::VpnUsers, Group::ProdAccess, Group::ConfigToolUsers],
                )
                .with_groups(
                    Environment::Development,
                    [Group::VpnUsers, Group::DevAccess, Group::ConfigToolUsers],
                ),
        )
        .with_user(
            UserRecord::new("bob", Profile::Dev)
                .with_groups(Environment::Production, [Group::VpnUsers]),
        )
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn lookup_returns_configured_record() {
    let directory = demo_directory();
    let record = directory.lookup("alice").unwrap();

    assert_eq!(record.username, "alice");
    assert_eq!(record.profile, Profile::Prod);
    assert!(record.is_member(Environment::Production, Group::ProdAccess));
    assert!(!record.is_member(Environment::Development, Group::ProdAccess));
    assert!(record.production_access_expiry.is_none());
}

#[test]
fn lookup_unknown_user_fails() {
    let directory = demo_directory();
    let result = directory.lookup("mallory");

    assert_eq!(
        result.unwrap_err(),
        DirectoryError::UserNotFound("mallory".to_string())
    );
}

#[test]
fn lookup_returns_a_snapshot() {
    let mut directory = demo_directory();
    let before = directory.lookup("alice").unwrap();

    let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    directory.set_expiry("alice", expiry).unwrap();

    // The snapshot taken before the write is unchanged.
    assert!(before.production_access_expiry.is_none());
    let after = directory.lookup("alice").unwrap();
    assert_eq!(after.production_access_expiry, Some(expiry));
}

#[test]
fn unconfigured_environment_has_no_groups() {
    let directory = demo_directory();
    let record = directory.lookup("bob").unwrap();

    // bob has no development entry at all
    assert!(record.groups_in(Environment::Development).is_empty());
    assert!(!record.is_member(Environment::Development, Group::DevAccess));
}

// ============================================================================
// Expiry mutation
// ============================================================================

#[test]
fn set_expiry_overwrites_unconditionally() {
    let mut directory = demo_directory();
    let first = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2025, 6, 1, 21, 0, 0).unwrap();

    directory.set_expiry("bob", first).unwrap();
    directory.set_expiry("bob", second).unwrap();

    let record = directory.lookup("bob").unwrap();
    assert_eq!(record.production_access_expiry, Some(second));
}

#[test]
fn set_expiry_unknown_user_fails_without_mutation() {
    let mut directory = demo_directory();
    let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

    let result = directory.set_expiry("mallory", expiry);
    assert!(matches!(result, Err(DirectoryError::UserNotFound(_))));

    for username in directory.usernames() {
        let record = directory.lookup(&username).unwrap();
        assert!(record.production_access_expiry.is_none());
    }
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn usernames_preserve_configured_order() {
    let directory = demo_directory();
    assert_eq!(directory.usernames(), ["alice", "bob"]);
}

#[test]
fn duplicate_username_replaces_in_place() {
    let directory = demo_directory().with_user(
        UserRecord::new("alice", Profile::Dev)
            .with_groups(Environment::Development, [Group::DevAccess]),
    );

    // Position is preserved, the record is the later definition.
    assert_eq!(directory.usernames(), ["alice", "bob"]);
    assert_eq!(directory.len(), 2);
    let record = directory.lookup("alice").unwrap();
    assert_eq!(record.profile, Profile::Dev);
    assert!(!record.is_member(Environment::Production, Group::ProdAccess));
}
