//! `huddle-accounts` — account operations gated by the authorization policy.
//!
//! Everything here consumes an authenticated `User` published by the session
//! layer and a `UserStore`; failures are returned to the initiating actor and
//! never touch the published session state.

pub mod admin;
pub mod directory;
pub mod error;
pub mod profile;

pub use admin::change_privilege;
pub use directory::{directory, find_member, DirectoryQuery};
pub use error::AccountError;
pub use profile::update_profile;
