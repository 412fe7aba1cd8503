//! Required-group rules per environment.
//!
//! Each capability is conferred by membership in *any* of the groups
//! listed for it. The defaults encode the demo directory's fixed rules;
//! the table is serde-representable so a deployment can override it from
//! configuration without touching the evaluator.

use gatecheck_types::{Environment, Group};
use serde::{Deserialize, Serialize};

/// Group lists that confer each capability within one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRequirements {
    /// Groups conferring VPN access.
    pub vpn: Vec<Group>,
    /// Groups conferring access to the environment itself. In production
    /// this gates the session grant; in development it maps directly to
    /// `production_group_access`.
    pub environment_access: Vec<Group>,
    /// Groups conferring config tool access.
    pub config_tool: Vec<Group>,
}

/// The full rule table: one [`EnvironmentRequirements`] per environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredGroups {
    pub production: EnvironmentRequirements,
    pub development: EnvironmentRequirements,
}

impl RequiredGroups {
    /// Returns the rules for the given environment.
    pub fn for_environment(&self, environment: Environment) -> &EnvironmentRequirements {
        match environment {
            Environment::Production => &self.production,
            Environment::Development => &self.development,
        }
    }
}

impl Default for RequiredGroups {
    fn default() -> Self {
        Self {
            production: EnvironmentRequirements {
                vpn: vec![Group::VpnUsers],
                environment_access: vec![Group::ProdAccess],
                config_tool: vec![Group::ConfigToolUsers],
            },
            development: EnvironmentRequirements {
                vpn: vec![Group::VpnUsers],
                environment_access: vec![Group::DevAccess],
                config_tool: vec![Group::ConfigToolUsers],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_fixed_group_constants() {
        let table = RequiredGroups::default();

        assert_eq!(table.production.vpn, [Group::VpnUsers]);
        assert_eq!(table.production.environment_access, [Group::ProdAccess]);
        assert_eq!(table.production.config_tool, [Group::ConfigToolUsers]);

        assert_eq!(table.development.vpn, [Group::VpnUsers]);
        assert_eq!(table.development.environment_access, [Group::DevAccess]);
        assert_eq!(table.development.config_tool, [Group::ConfigToolUsers]);
    }

    #[test]
    fn for_environment_selects_the_right_rules() {
        let table = RequiredGroups::default();
        assert_eq!(
            table.for_environment(Environment::Production),
            &table.production
        );
        assert_eq!(
            table.for_environment(Environment::Development),
            &table.development
        );
    }
}
