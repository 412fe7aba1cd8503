//! Error surface of the Gatecheck SDK.
//!
//! Four terminal error kinds, one per boundary status category. The
//! transport layer (outside this repository) maps them to status codes;
//! this crate only guarantees the kinds stay distinguishable.

use gatecheck_directory::DirectoryError;
use gatecheck_policy::GrantDenied;
use gatecheck_types::UnknownEnvironment;

/// Errors returned by [`Gatecheck`](crate::Gatecheck) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatecheckError {
    /// Unknown username (boundary: not-found).
    #[error("user not found: {0:?}")]
    UserNotFound(String),

    /// Environment string outside {production, development}
    /// (boundary: bad-request).
    #[error(transparent)]
    InvalidEnvironment(#[from] UnknownEnvironment),

    /// Grant attempted without the required group (boundary: forbidden).
    #[error("user {0:?} does not hold a production access group")]
    ProductionAccessDenied(String),

    /// The store failed to persist a grant (boundary: internal-error).
    #[error("failed to update production access: {0}")]
    AccessUpdateFailed(String),
}

/// Result type for Gatecheck operations.
pub type Result<T> = std::result::Result<T, GatecheckError>;

impl From<DirectoryError> for GatecheckError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::UserNotFound(username) => GatecheckError::UserNotFound(username),
            DirectoryError::UpdateFailed(reason) => GatecheckError::AccessUpdateFailed(reason),
        }
    }
}

impl From<GrantDenied> for GatecheckError {
    fn from(err: GrantDenied) -> Self {
        GatecheckError::ProductionAccessDenied(err.username)
    }
}
