//! Main entry point for the Gatecheck SDK.
//!
//! The `Gatecheck` struct wires the user store, the required-groups
//! table, and the session TTL into the operations a transport layer
//! calls. Every operation is a bounded synchronous computation over
//! in-memory data.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gatecheck_config::GatecheckConfig;
use gatecheck_directory::{InMemoryDirectory, UserRecord, UserStore};
use gatecheck_policy::{RequiredGroups, authorize_grant, evaluate, profile_status, session};
use gatecheck_types::{AccessStatus, Environment, ProfileStatus};

use crate::error::Result;

/// Outcome of a production-access grant.
///
/// Carries the new expiry so the caller does not need a second
/// status read to learn it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Always true on the success path; failures surface as errors.
    pub granted: bool,
    /// When the freshly granted session expires.
    pub valid_until: DateTime<Utc>,
}

/// Access-verification SDK handle.
///
/// Cheap to clone; clones share the same store. The store sits behind an
/// `RwLock`: status queries take one read-locked snapshot, grants hold
/// the write lock across their check-then-set, so concurrent grants for
/// the same user are serialized and readers never observe a torn
/// timestamp.
pub struct Gatecheck<S: UserStore = InMemoryDirectory> {
    store: Arc<RwLock<S>>,
    requirements: RequiredGroups,
    session_ttl: Duration,
    audit_enabled: bool,
}

impl Gatecheck<InMemoryDirectory> {
    /// Builds a Gatecheck over an in-memory directory seeded from
    /// configuration.
    pub fn from_config(config: &GatecheckConfig) -> Self {
        let mut directory = InMemoryDirectory::new();
        for definition in &config.users {
            let mut record = UserRecord::new(&definition.username, definition.profile);
            for (&environment, groups) in &definition.groups {
                record = record.with_groups(environment, groups.iter().copied());
            }
            directory = directory.with_user(record);
        }
        Self::with_store(directory, config.session_ttl())
    }

    /// Builds a Gatecheck with the built-in demo directory and the
    /// default 12-hour session window.
    pub fn demo() -> Self {
        Self::from_config(&GatecheckConfig::default())
    }
}

impl<S: UserStore> Gatecheck<S> {
    /// Builds a Gatecheck over an explicit store.
    pub fn with_store(store: S, session_ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            requirements: RequiredGroups::default(),
            session_ttl,
            audit_enabled: true,
        }
    }

    /// Replaces the required-groups table.
    pub fn with_requirements(mut self, requirements: RequiredGroups) -> Self {
        self.requirements = requirements;
        self
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    // The only write the system performs is the single expiry field
    // assignment, which either happened or did not; a poisoned guard
    // therefore still holds consistent data and can be recovered.
    fn read_store(&self) -> RwLockReadGuard<'_, S> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, S> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Derives the capability flags for a (username, environment) pair
    /// at the current wall-clock time.
    ///
    /// # Errors
    ///
    /// [`GatecheckError::UserNotFound`], [`GatecheckError::InvalidEnvironment`].
    pub fn access_status(&self, username: &str, environment: &str) -> Result<AccessStatus> {
        self.access_status_at(username, environment, Utc::now())
    }

    /// Like [`access_status`](Self::access_status) with an explicit
    /// evaluation instant.
    ///
    /// All outputs derive from one read-locked snapshot of the record,
    /// so the result is internally consistent even when grants
    /// interleave. Never mutates: an expired session stays expired
    /// until an explicit refresh.
    pub fn access_status_at(
        &self,
        username: &str,
        environment: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessStatus> {
        let record = self.read_store().lookup(username)?;
        let environment: Environment = environment.parse()?;

        let status = evaluate(&self.requirements, &record, environment, now);
        if self.audit_enabled {
            info!(
                user = %username,
                environment = %environment,
                vpn = status.vpn_access,
                production = status.production_group_access,
                config_tool = status.config_tool_access,
                "access status evaluated"
            );
        }
        Ok(status)
    }

    /// Grants a fresh production session valid for the configured TTL.
    ///
    /// # Errors
    ///
    /// [`GatecheckError::UserNotFound`],
    /// [`GatecheckError::ProductionAccessDenied`] (checked before any
    /// mutation), [`GatecheckError::AccessUpdateFailed`].
    pub fn refresh_production_access(&self, username: &str) -> Result<AccessGrant> {
        self.refresh_production_access_at(username, Utc::now())
    }

    /// Like [`refresh_production_access`](Self::refresh_production_access)
    /// with an explicit grant instant.
    pub fn refresh_production_access_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessGrant> {
        // Hold the write lock across check-then-set: grants for one
        // user must not interleave.
        let mut store = self.write_store();
        let record = store.lookup(username)?;

        if let Err(denied) = authorize_grant(&self.requirements, &record) {
            if self.audit_enabled {
                warn!(user = %username, "production access refresh denied");
            }
            return Err(denied.into());
        }

        let valid_until = session::expiry_after(now, self.session_ttl);
        store.set_expiry(username, valid_until)?;

        if self.audit_enabled {
            info!(user = %username, %valid_until, "production access granted");
        }
        Ok(AccessGrant {
            granted: true,
            valid_until,
        })
    }

    /// Whether the user's production session is valid at the current
    /// wall-clock time. A pure read, evaluated fresh on every call.
    ///
    /// # Errors
    ///
    /// [`GatecheckError::UserNotFound`].
    pub fn is_session_valid(&self, username: &str) -> Result<bool> {
        self.is_session_valid_at(username, Utc::now())
    }

    /// Like [`is_session_valid`](Self::is_session_valid) with an
    /// explicit evaluation instant.
    pub fn is_session_valid_at(&self, username: &str, now: DateTime<Utc>) -> Result<bool> {
        let record = self.read_store().lookup(username)?;
        Ok(session::is_valid(record.production_access_expiry, now))
    }

    /// Compares the user's current tool profile against the profile
    /// expected for the environment.
    ///
    /// # Errors
    ///
    /// [`GatecheckError::UserNotFound`], [`GatecheckError::InvalidEnvironment`].
    pub fn profile_status(&self, username: &str, environment: &str) -> Result<ProfileStatus> {
        let record = self.read_store().lookup(username)?;
        let environment: Environment = environment.parse()?;
        Ok(profile_status(&record, environment))
    }

    /// Returns all configured usernames in configured order.
    pub fn list_users(&self) -> Vec<String> {
        self.read_store().usernames()
    }
}

impl<S: UserStore> Clone for Gatecheck<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            requirements: self.requirements.clone(),
            session_ttl: self.session_ttl,
            audit_enabled: self.audit_enabled,
        }
    }
}
