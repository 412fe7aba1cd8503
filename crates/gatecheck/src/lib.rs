//! # Gatecheck
//!
//! Access-verification demo: capability checks and time-boxed
//! production sessions over an in-memory user directory.
//!
//! Given a username and an environment, Gatecheck derives three
//! independent capability flags (VPN, environment access, config tool)
//! from group memberships, and manages a 12-hour production session that
//! must be explicitly granted and explicitly renewed.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Gatecheck                            │
//! │  ┌───────────┐   ┌────────────┐   ┌─────────────────────────┐ │
//! │  │  Config   │ → │ Directory  │ → │     Policy              │ │
//! │  │ (layered) │   │ (UserStore)│   │ (pure eval + sessions)  │ │
//! │  └───────────┘   └────────────┘   └─────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The directory holds the only mutable state in the system (one expiry
//! timestamp per user); the policy layer is pure functions over
//! snapshots of it. There is no transport, persistence, or identity
//! provider here — this is the library a boundary layer would call, and
//! the `UserStore` trait is where a real directory backend would plug in.
//!
//! # Quick Start
//!
//! ```
//! use gatecheck::Gatecheck;
//!
//! let gate = Gatecheck::demo();
//!
//! // Capability flags for the demo's fully-provisioned user
//! let status = gate.access_status("Alice Mc'Prod", "production")?;
//! assert!(status.vpn_access);
//! // No production session yet: group membership alone is not enough
//! assert!(!status.production_group_access);
//!
//! // Grant a 12-hour session, then the flag flips
//! let grant = gate.refresh_production_access("Alice Mc'Prod")?;
//! let status = gate.access_status("Alice Mc'Prod", "production")?;
//! assert!(status.production_group_access);
//! assert_eq!(status.production_access_valid_until, Some(grant.valid_until));
//! # Ok::<(), gatecheck::GatecheckError>(())
//! ```
//!
//! # Operations
//!
//! - [`Gatecheck::access_status`] — derive capability flags
//! - [`Gatecheck::refresh_production_access`] — grant/renew a session
//! - [`Gatecheck::profile_status`] — compare tool profile to environment
//! - [`Gatecheck::list_users`] — configured usernames, in order

mod error;
#[allow(clippy::module_inception)]
mod gatecheck;

pub use error::{GatecheckError, Result};
pub use gatecheck::{AccessGrant, Gatecheck};

// Re-export the vocabulary a caller needs to use the SDK.
pub use gatecheck_config::{ConfigLoader, GatecheckConfig, UserDefinition};
pub use gatecheck_directory::{DirectoryError, InMemoryDirectory, UserRecord, UserStore};
pub use gatecheck_policy::{RequiredGroups, SessionState};
pub use gatecheck_types::{AccessStatus, Environment, Group, Profile, ProfileStatus};
