//! Published session snapshot.

use serde::{Deserialize, Serialize};

use huddle_auth::User;

/// What the rest of the application sees: the current user (if any) and
/// whether a reconciliation is still in flight.
///
/// Consumers treat this as an immutable snapshot; authorization predicates
/// are recomputed against it on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    /// State before the first notification has been processed.
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn resolved(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}
