//! Capability evaluation.
//!
//! Derives the capability flags for a (record, environment) pair from a
//! single directory snapshot and an explicit evaluation instant. The
//! first matching group in the rule table confers a capability; holding
//! none of the listed groups denies it.

use chrono::{DateTime, Utc};
use gatecheck_directory::UserRecord;
use gatecheck_types::{AccessStatus, Environment, Group, ProfileStatus};
use tracing::debug;

use crate::requirements::RequiredGroups;
use crate::session;

/// Derives the capability flags for one (record, environment) pair.
///
/// Pure: two calls with the same snapshot, environment, and instant
/// return identical results. Never mutates, and in particular never
/// re-grants an expired session — renewal is a separate, caller-initiated
/// operation.
///
/// In production, environment access means "holds a production access
/// group AND the time-boxed session is currently valid". In development
/// there is no session machinery: the dev-access group alone decides,
/// and `production_access_valid_until` is always `None`.
pub fn evaluate(
    requirements: &RequiredGroups,
    record: &UserRecord,
    environment: Environment,
    now: DateTime<Utc>,
) -> AccessStatus {
    let rules = requirements.for_environment(environment);

    let vpn_access = member_of_any(record, environment, &rules.vpn);
    let config_tool_access = member_of_any(record, environment, &rules.config_tool);
    let has_environment_group = member_of_any(record, environment, &rules.environment_access);

    let (production_group_access, production_access_valid_until) = match environment {
        Environment::Production => {
            let valid = session::is_valid(record.production_access_expiry, now);
            if has_environment_group && valid {
                (true, record.production_access_expiry)
            } else {
                (false, None)
            }
        }
        Environment::Development => (has_environment_group, None),
    };

    AccessStatus {
        vpn_access,
        production_group_access,
        config_tool_access,
        production_access_valid_until,
    }
}

/// Whether the record holds any of the listed groups in the environment.
fn member_of_any(record: &UserRecord, environment: Environment, groups: &[Group]) -> bool {
    groups
        .iter()
        .any(|&group| record.is_member(environment, group))
}

// ============================================================================
// Grant precondition
// ============================================================================

/// The user does not hold a production access group, so no session may
/// be granted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user {username:?} does not hold a production access group")]
pub struct GrantDenied {
    pub username: String,
}

/// Checks the policy precondition for granting a production session.
///
/// Must pass before any expiry mutation; a denied grant leaves the
/// stored expiry untouched.
pub fn authorize_grant(
    requirements: &RequiredGroups,
    record: &UserRecord,
) -> Result<(), GrantDenied> {
    let rules = requirements.for_environment(Environment::Production);
    if member_of_any(record, Environment::Production, &rules.environment_access) {
        Ok(())
    } else {
        debug!(username = %record.username, "production grant refused, no access group");
        Err(GrantDenied {
            username: record.username.clone(),
        })
    }
}

// ============================================================================
// Profile status
// ============================================================================

/// Compares the record's current tool profile against the profile
/// expected for the environment.
pub fn profile_status(record: &UserRecord, environment: Environment) -> ProfileStatus {
    let current = record.profile;
    let expected = environment.expected_profile();
    let needs_switch = current != expected;

    let verdict = if needs_switch { "incorrect" } else { "correct" };
    let message = format!(
        "You are currently in the {verdict} profile ({current}) for the {environment} environment"
    );

    ProfileStatus {
        needs_switch,
        current_profile: current,
        message,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use gatecheck_types::Profile;
    use proptest::prelude::*;
    use test_case::test_case;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap()
    }

    /// User with every production group, like the demo's Alice.
    fn prod_user() -> UserRecord {
        UserRecord::new("alice", Profile::Prod).with_groups(
            Environment::Production,
            [Group::VpnUsers, Group::ProdAccess, Group::ConfigToolUsers],
        )
    }

    /// User lacking prod-access, like the demo's Bob.
    fn no_prod_user() -> UserRecord {
        UserRecord::new("bob", Profile::Dev)
            .with_groups(
                Environment::Production,
                [Group::VpnUsers, Group::ConfigToolUsers],
            )
            .with_groups(
                Environment::Development,
                [Group::VpnUsers, Group::DevAccess, Group::ConfigToolUsers],
            )
    }

    #[test]
    fn prod_group_without_session_gives_no_environment_access() {
        let status = evaluate(
            &RequiredGroups::default(),
            &prod_user(),
            Environment::Production,
            now(),
        );

        assert!(status.vpn_access);
        assert!(status.config_tool_access);
        assert!(!status.production_group_access);
        assert!(status.production_access_valid_until.is_none());
    }

    #[test]
    fn valid_session_with_prod_group_gives_environment_access() {
        let expiry = now() + Duration::hours(12);
        let mut record = prod_user();
        record.production_access_expiry = Some(expiry);

        let status = evaluate(
            &RequiredGroups::default(),
            &record,
            Environment::Production,
            now(),
        );

        assert!(status.production_group_access);
        assert_eq!(status.production_access_valid_until, Some(expiry));
    }

    #[test_case(Duration::zero(); "at the expiry instant")]
    #[test_case(Duration::hours(1); "past the expiry")]
    fn elapsed_session_loses_environment_access(after_expiry: Duration) {
        let expiry = now();
        let mut record = prod_user();
        record.production_access_expiry = Some(expiry);

        let status = evaluate(
            &RequiredGroups::default(),
            &record,
            Environment::Production,
            now() + after_expiry,
        );

        assert!(!status.production_group_access);
        assert!(status.production_access_valid_until.is_none());
        // Other capabilities are independent of the session
        assert!(status.vpn_access);
        assert!(status.config_tool_access);
    }

    #[test]
    fn session_without_prod_group_gives_nothing() {
        // A stale expiry cannot confer access once the group is gone.
        let mut record = no_prod_user();
        record.production_access_expiry = Some(now() + Duration::hours(12));

        let status = evaluate(
            &RequiredGroups::default(),
            &record,
            Environment::Production,
            now(),
        );

        assert!(!status.production_group_access);
        assert!(status.production_access_valid_until.is_none());
    }

    #[test]
    fn development_uses_dev_access_and_never_reports_expiry() {
        let mut record = no_prod_user();
        record.production_access_expiry = Some(now() + Duration::hours(12));

        let status = evaluate(
            &RequiredGroups::default(),
            &record,
            Environment::Development,
            now(),
        );

        assert!(status.vpn_access);
        assert!(status.production_group_access);
        assert!(status.config_tool_access);
        assert!(status.production_access_valid_until.is_none());
    }

    #[test]
    fn evaluation_is_pure() {
        let record = prod_user();
        let requirements = RequiredGroups::default();

        let first = evaluate(&requirements, &record, Environment::Production, now());
        let second = evaluate(&requirements, &record, Environment::Production, now());
        assert_eq!(first, second);
    }

    #[test]
    fn grant_authorized_with_prod_group() {
        assert!(authorize_grant(&RequiredGroups::default(), &prod_user()).is_ok());
    }

    #[test]
    fn grant_denied_without_prod_group() {
        let err = authorize_grant(&RequiredGroups::default(), &no_prod_user()).unwrap_err();
        assert_eq!(err.username, "bob");
    }

    #[test_case(Profile::Prod, Environment::Production, false; "prod profile in production")]
    #[test_case(Profile::Dev, Environment::Production, true; "dev profile in production")]
    #[test_case(Profile::Dev, Environment::Development, false; "dev profile in development")]
    #[test_case(Profile::Prod, Environment::Development, true; "prod profile in development")]
    fn profile_switch_required_on_mismatch(
        profile: Profile,
        environment: Environment,
        needs_switch: bool,
    ) {
        let record = UserRecord::new("carol", profile);
        let status = profile_status(&record, environment);

        assert_eq!(status.needs_switch, needs_switch);
        assert_eq!(status.current_profile, profile);
    }

    #[test]
    fn profile_message_wording() {
        let status = profile_status(
            &UserRecord::new("carol", Profile::Dev),
            Environment::Production,
        );
        assert_eq!(
            status.message,
            "You are currently in the incorrect profile (dev) for the production environment"
        );

        let status = profile_status(
            &UserRecord::new("carol", Profile::Prod),
            Environment::Production,
        );
        assert_eq!(
            status.message,
            "You are currently in the correct profile (prod) for the production environment"
        );
    }

    proptest! {
        /// For arbitrary group sets, VPN and config tool capabilities
        /// reduce to plain membership checks, independent of sessions.
        #[test]
        fn vpn_and_config_tool_are_plain_membership(
            has_vpn in any::<bool>(),
            has_config in any::<bool>(),
            has_prod in any::<bool>(),
            expiry_offset in -10_000i64..10_000,
        ) {
            let mut groups = Vec::new();
            if has_vpn { groups.push(Group::VpnUsers); }
            if has_config { groups.push(Group::ConfigToolUsers); }
            if has_prod { groups.push(Group::ProdAccess); }

            let mut record = UserRecord::new("carol", Profile::Prod)
                .with_groups(Environment::Production, groups);
            record.production_access_expiry =
                Some(now() + Duration::seconds(expiry_offset));

            let status = evaluate(
                &RequiredGroups::default(),
                &record,
                Environment::Production,
                now(),
            );

            prop_assert_eq!(status.vpn_access, has_vpn);
            prop_assert_eq!(status.config_tool_access, has_config);
            // Environment access additionally requires a live session
            prop_assert_eq!(
                status.production_group_access,
                has_prod && expiry_offset > 0
            );
        }
    }
}
