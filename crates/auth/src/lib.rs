//! `huddle-auth` — pure authentication/authorization domain.
//!
//! This crate is intentionally decoupled from the identity provider and
//! storage: it defines the application `User` entity, the professional role
//! and privilege-level enumerations, and the pure authorization predicates
//! every feature gates itself on.

pub mod policy;
pub mod privilege;
pub mod role;
pub mod user;

pub use policy::{can_change_privilege, can_view_admin_panel, is_admin, is_super_admin};
pub use privilege::UserType;
pub use role::Role;
pub use user::{User, UserDraft, UserPatch};
