//! `huddle-session` — reconciliation of identity-provider sessions into
//! application users.
//!
//! The [`SessionSynchronizer`] is the single writer of "who is signed in".
//! It observes typed session events from the identity provider, resolves (or
//! lazily creates) the matching application user record, and publishes
//! [`SessionState`] snapshots to subscribers. Field-name translation between
//! the storage boundary (snake_case records, stringly-typed enums) and the
//! domain entity is centralized in [`mapping`].

pub mod event;
pub mod mapping;
pub mod provider;
pub mod state;
pub mod store;
pub mod synchronizer;

pub use event::{IdentitySession, SessionEvent};
pub use provider::{IdentityError, IdentityProvider};
pub use state::SessionState;
pub use store::{
    NewUserRecord, StoreError, UserOrder, UserQuery, UserRecord, UserRecordPatch, UserStore,
};
pub use synchronizer::{SessionSubscription, SessionSynchronizer};
