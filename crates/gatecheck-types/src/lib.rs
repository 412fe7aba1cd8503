//! # gatecheck-types: Core types for Gatecheck
//!
//! This crate contains the shared vocabulary used across the Gatecheck
//! system:
//! - Deployment contexts ([`Environment`])
//! - Directory group tags ([`Group`])
//! - Tool profiles ([`Profile`])
//! - Derived query results ([`AccessStatus`], [`ProfileStatus`])
//!
//! Types here carry no policy logic. The exact wire strings
//! (`"production"`, `"vpn-users"`, `"prod"`, ...) are part of the public
//! contract and are pinned by tests.

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Environment
// ============================================================================

/// Deployment context an access query is evaluated against.
///
/// The set is closed: callers pass exactly `"production"` or
/// `"development"`. Any other string is rejected with
/// [`UnknownEnvironment`] before evaluation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Returns the canonical wire string for this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }

    /// Returns the tool profile a user is expected to operate under in
    /// this environment.
    pub fn expected_profile(&self) -> Profile {
        match self {
            Environment::Production => Profile::Prod,
            Environment::Development => Profile::Dev,
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Environment::Production),
            "development" => Ok(Environment::Development),
            other => Err(UnknownEnvironment(other.to_string())),
        }
    }
}

/// The environment string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment: {0:?} (expected \"production\" or \"development\")")]
pub struct UnknownEnvironment(pub String);

// ============================================================================
// Group
// ============================================================================

/// A named capability tag a user may hold per environment.
///
/// The group vocabulary is closed. Configuration naming a group outside
/// this set fails at deserialization instead of silently never matching.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Group {
    /// VPN access group.
    VpnUsers,
    /// Development environment access group.
    DevAccess,
    /// Production environment access group.
    ProdAccess,
    /// Config tool access group.
    ConfigToolUsers,
}

impl Group {
    /// Returns the canonical wire string for this group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::VpnUsers => "vpn-users",
            Group::DevAccess => "dev-access",
            Group::ProdAccess => "prod-access",
            Group::ConfigToolUsers => "config-tool-users",
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vpn-users" => Ok(Group::VpnUsers),
            "dev-access" => Ok(Group::DevAccess),
            "prod-access" => Ok(Group::ProdAccess),
            "config-tool-users" => Ok(Group::ConfigToolUsers),
            other => Err(UnknownGroup(other.to_string())),
        }
    }
}

/// The group name is outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group: {0:?}")]
pub struct UnknownGroup(pub String);

// ============================================================================
// Profile
// ============================================================================

/// The tool/CLI context a user is currently operating under.
///
/// Compared against [`Environment::expected_profile`] to decide whether the
/// user needs to switch before working in an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    /// Returns the canonical wire string for this profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
        }
    }

    /// Whether this profile targets production.
    pub fn is_production(&self) -> bool {
        matches!(self, Profile::Prod)
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Profile::Dev),
            "prod" => Ok(Profile::Prod),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}

/// The profile string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile: {0:?} (expected \"dev\" or \"prod\")")]
pub struct UnknownProfile(pub String);

// ============================================================================
// Derived results
// ============================================================================

/// Capability flags derived for a (user, environment) pair.
///
/// Recomputed on every query from a single directory snapshot; never
/// stored. `production_access_valid_until` is populated only when a
/// production session is currently valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStatus {
    /// Membership in a VPN access group for the environment.
    pub vpn_access: bool,
    /// Environment access: production session validity in production,
    /// dev-access membership in development.
    pub production_group_access: bool,
    /// Membership in a config tool access group for the environment.
    pub config_tool_access: bool,
    /// Expiry of the active production session, if one is valid.
    pub production_access_valid_until: Option<DateTime<Utc>>,
}

/// Result of comparing a user's current tool profile against the profile
/// expected for an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStatus {
    /// Whether the user must switch profiles before working in the
    /// queried environment.
    pub needs_switch: bool,
    /// The profile the user is currently operating under.
    pub current_profile: Profile,
    /// Human-readable summary of the comparison.
    pub message: String,
}

// ============================================================================
// Tests
// ============================================================================
