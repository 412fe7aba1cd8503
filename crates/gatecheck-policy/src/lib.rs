//! # gatecheck-policy: Capability evaluation for Gatecheck
//!
//! The rule engine that maps (user record, environment) to capability
//! flags, plus the state machine for time-boxed production sessions.
//!
//! Everything in this crate is a pure function of its inputs: the caller
//! supplies a directory snapshot and the evaluation instant, and gets a
//! value back. No clock reads, no store access, no mutation. The one
//! stateful operation in the system — writing a new session expiry — is
//! driven by the SDK crate after [`authorize_grant`] approves it.
//!
//! ## Evaluation
//!
//! ```
//! use chrono::Utc;
//! use gatecheck_directory::UserRecord;
//! use gatecheck_policy::{RequiredGroups, evaluate};
//! use gatecheck_types::{Environment, Group, Profile};
//!
//! let requirements = RequiredGroups::default();
//! let record = UserRecord::new("alice", Profile::Prod).with_groups(
//!     Environment::Production,
//!     [Group::VpnUsers, Group::ProdAccess, Group::ConfigToolUsers],
//! );
//!
//! let status = evaluate(&requirements, &record, Environment::Production, Utc::now());
//! assert!(status.vpn_access);
//! assert!(status.config_tool_access);
//! // prod-access group alone is not enough: no session has been granted
//! assert!(!status.production_group_access);
//! assert!(status.production_access_valid_until.is_none());
//! ```

pub mod evaluator;
pub mod requirements;
pub mod session;

pub use evaluator::{GrantDenied, authorize_grant, evaluate, profile_status};
pub use requirements::{EnvironmentRequirements, RequiredGroups};
pub use session::SessionState;
