//! `huddle-infra` — infrastructure adapters.
//!
//! In-memory implementations of the session boundaries for tests and local
//! development. Production adapters for the managed backend live behind the
//! same traits and plug in without touching the core.

pub mod identity;
pub mod user_store;


pub use identity::ScriptedIdentityProvider;
pub use user_store::InMemoryUserStore;
