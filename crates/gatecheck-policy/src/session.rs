//! Production-session state machine.
//!
//! A production session is a time-boxed grant: states are `NoSession`
//! (never granted), `Active` (expiry strictly in the future), and
//! `Expired` (expiry at or before now). `NoSession → Active` and
//! `Expired → Active` happen only through an explicit grant; `Active →
//! Expired` is not an explicit transition at all — it is purely a
//! function of the read-time comparison as wall-clock time passes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Where a user's production session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No grant was ever issued (expiry is null).
    NoSession,
    /// A grant exists and its expiry is strictly in the future.
    Active,
    /// A grant exists but its expiry has passed.
    Expired,
}

/// Classifies a stored expiry against the evaluation instant.
pub fn state(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> SessionState {
    match expiry {
        None => SessionState::NoSession,
        Some(expiry) if expiry > now => SessionState::Active,
        Some(_) => SessionState::Expired,
    }
}

/// Whether a session is valid: expiry exists and is strictly greater
/// than `now`. At exactly `now == expiry` the session is already expired.
pub fn is_valid(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    state(expiry, now) == SessionState::Active
}

/// The expiry a grant issued at `now` receives.
pub fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now + ttl
}
