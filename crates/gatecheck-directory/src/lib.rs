//! gatecheck-directory: User directory store for Gatecheck
//!
//! The directory holds the static mapping from username to per-environment
//! group memberships, plus the single mutable field of the whole system:
//! the production-access-session expiry timestamp.
//!
//! # Lifecycle
//!
//! Records are created once at startup from configuration and never added
//! or removed at runtime. Group membership and the tool profile are fixed
//! for the lifetime of the process; only `production_access_expiry`
//! mutates, and only through [`UserStore::set_expiry`].
//!
//! # Example
//!
//! ```
//! use gatecheck_directory::{InMemoryDirectory, UserRecord, UserStore};
//! use gatecheck_types::{Environment, Group, Profile};
//!
//! let directory = InMemoryDirectory::new().with_user(
//!     UserRecord::new("alice", Profile::Prod)
//!         .with_groups(Environment::Production, [Group::VpnUsers, Group::ProdAccess]),
//! );
//!
//! let record = directory.lookup("alice").unwrap();
//! assert!(record.is_member(Environment::Production, Group::ProdAccess));
//! assert!(record.production_access_expiry.is_none());
//! ```

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use gatecheck_types::{Environment, Group, Profile};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Errors that can occur during directory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No record exists for the given username.
    #[error("user not found: {0:?}")]
    UserNotFound(String),

    /// The backing store failed to persist an expiry update.
    ///
    /// The in-memory store never produces this; it exists so that a
    /// persistent identity-provider-backed store can report write
    /// failures through the same interface.
    #[error("failed to update user record: {0}")]
    UpdateFailed(String),
}

// ============================================================================
// User Record
// ============================================================================

/// A single user's directory entry.
///
/// Cheap to clone: lookups hand out an owned snapshot so that every
/// evaluation derives from one consistent read of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique key within the directory.
    pub username: String,
    /// Group memberships, keyed by environment.
    pub groups: HashMap<Environment, BTreeSet<Group>>,
    /// The tool profile the user is currently operating under.
    pub profile: Profile,
    /// Expiry of the user's production access session, if one was ever
    /// granted. Never cleared, only superseded by a later grant.
    pub production_access_expiry: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Creates a record with no group memberships and no session.
    pub fn new(username: impl Into<String>, profile: Profile) -> Self {
        Self {
            username: username.into(),
            groups: HashMap::new(),
            profile,
            production_access_expiry: None,
        }
    }

    /// Sets the group memberships for one environment.
    ///
    /// Builder method; replaces any memberships previously set for that
    /// environment.
    pub fn with_groups(
        mut self,
        environment: Environment,
        groups: impl IntoIterator<Item = Group>,
    ) -> Self {
        self.groups.insert(environment, groups.into_iter().collect());
        self
    }

    /// Returns the user's groups in the given environment.
    ///
    /// An environment the record was never configured for yields the
    /// empty set, so every capability derived from it evaluates false.
    pub fn groups_in(&self, environment: Environment) -> &BTreeSet<Group> {
        static EMPTY: BTreeSet<Group> = BTreeSet::new();
        self.groups.get(&environment).unwrap_or(&EMPTY)
    }

    /// Whether the user holds `group` in `environment`.
    pub fn is_member(&self, environment: Environment, group: Group) -> bool {
        self.groups_in(environment).contains(&group)
    }
}

// ============================================================================
// Store interface
// ============================================================================

/// Read/write interface to the user directory.
///
/// The in-memory implementation below is the only one in this repository;
/// the trait is the seam where a real identity-provider-backed store
/// (with actual I/O and failure modes) would be substituted. Evaluation
/// stays synchronous and side-effect-free either way: the only mutation
/// the system performs is the expiry write behind [`set_expiry`].
///
/// [`set_expiry`]: UserStore::set_expiry
pub trait UserStore: Send + Sync {
    /// Returns a snapshot of the user's record.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::UserNotFound`] if the username is absent.
    fn lookup(&self, username: &str) -> Result<UserRecord, DirectoryError>;

    /// Overwrites the user's production-access expiry unconditionally.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::UserNotFound`] if the username is absent;
    /// [`DirectoryError::UpdateFailed`] if a persistent backend fails
    /// to write.
    fn set_expiry(
        &mut self,
        username: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), DirectoryError>;

    /// Returns all usernames in configured order.
    fn usernames(&self) -> Vec<String>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory user directory.
///
/// Preserves the order users were configured in, which is the order
/// [`usernames`](UserStore::usernames) reports them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    records: Vec<UserRecord>,
    index: HashMap<String, usize>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user record.
    ///
    /// Builder method. A duplicate username replaces the earlier record
    /// in place (last definition wins, position preserved).
    pub fn with_user(mut self, record: UserRecord) -> Self {
        if let Some(&position) = self.index.get(&record.username) {
            warn!(username = %record.username, "duplicate user definition, replacing earlier record");
            self.records[position] = record;
        } else {
            self.index.insert(record.username.clone(), self.records.len());
            self.records.push(record);
        }
        self
    }

    /// Number of configured users.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no users.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, username: &str) -> Result<usize, DirectoryError> {
        self.index
            .get(username)
            .copied()
            .ok_or_else(|| DirectoryError::UserNotFound(username.to_string()))
    }
}

impl UserStore for InMemoryDirectory {
    fn lookup(&self, username: &str) -> Result<UserRecord, DirectoryError> {
        self.position(username).map(|i| self.records[i].clone())
    }

    fn set_expiry(
        &mut self,
        username: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), DirectoryError> {
        let position = self.position(username)?;
        self.records[position].production_access_expiry = Some(expiry);
        Ok(())
    }

    fn usernames(&self) -> Vec<String> {
        self.records.iter().map(|r| r.username.clone()).collect()
    }
}

#[cfg(test)]
mod tests;
