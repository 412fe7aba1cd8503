//! Configuration management for Gatecheck
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (GATE_* prefix, highest precedence)
//! 2. gatecheck.local.toml (gitignored, local overrides)
//! 3. gatecheck.toml (git-tracked, project config)
//! 4. ~/.config/gatecheck/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! The built-in defaults seed the demo directory: two users with fixed
//! group memberships, and a 12-hour production session window.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::Duration;
use gatecheck_types::{Environment, Group, Profile};
use serde::{Deserialize, Serialize};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Gatecheck configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatecheckConfig {
    pub project: ProjectConfig,
    pub session: SessionConfig,
    pub users: Vec<UserDefinition>,
}

impl Default for GatecheckConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            session: SessionConfig::default(),
            users: demo_users(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "gatecheck-demo".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a granted production session stays valid, in hours.
    pub production_access_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            production_access_hours: 12,
        }
    }
}

/// One user seeded into the directory at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDefinition {
    pub username: String,
    pub profile: Profile,
    #[serde(default)]
    pub groups: HashMap<Environment, Vec<Group>>,
}

/// The demo directory: one user with full production access, one without
/// the production access group.
pub fn demo_users() -> Vec<UserDefinition> {
    vec![
        UserDefinition {
            username: "Alice Mc'Prod".to_string(),
            profile: Profile::Prod,
            groups: HashMap::from([
                (
                    Environment::Development,
                    vec![Group::VpnUsers, Group::DevAccess, Group::ConfigToolUsers],
                ),
                (
                    Environment::Production,
                    vec![Group::VpnUsers, Group::ProdAccess, Group::ConfigToolUsers],
                ),
            ]),
        },
        UserDefinition {
            username: "Bob Mc'NoProd".to_string(),
            profile: Profile::Dev,
            groups: HashMap::from([
                (
                    Environment::Development,
                    vec![Group::VpnUsers, Group::DevAccess, Group::ConfigToolUsers],
                ),
                (
                    Environment::Production,
                    vec![Group::VpnUsers, Group::ConfigToolUsers],
                ),
            ]),
        },
    ]
}

impl GatecheckConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Parse a single TOML document, ignoring the layered sources.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single TOML file, ignoring the layered sources.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&input)
    }

    /// The production session TTL as a duration.
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session.production_access_hours)
    }

    /// Checks invariants the type system cannot express.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ValidationError`] for a zero/negative session TTL,
    /// an empty username, or a duplicate username.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.production_access_hours <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "session.production_access_hours must be positive, got {}",
                self.session.production_access_hours
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for user in &self.users {
            if user.username.is_empty() {
                return Err(ConfigError::ValidationError(
                    "user with empty username".to_string(),
                ));
            }
            if !seen.insert(user.username.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate username: {:?}",
                    user.username
                )));
            }
        }

        Ok(())
    }
}
