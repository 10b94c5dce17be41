use core::str::FromStr;

use serde::{Deserialize, Serialize};

use huddle_core::DomainError;

/// Ordered privilege level controlling administrative capability.
///
/// # Invariants
/// - `User < Admin < SuperAdmin` (the derive order is the privilege order).
/// - Defaults to `User` at account creation; only explicit admin paths may
///   raise it afterwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl UserType {
    /// Stored form of this privilege level.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "user",
            UserType::Admin => "admin",
            UserType::SuperAdmin => "super_admin",
        }
    }

    /// Lenient parse for values read back from storage.
    ///
    /// Anything outside the enumerated set degrades to the least-privileged
    /// level rather than failing; authorization must never grant capability
    /// on malformed data.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(UserType::User)
    }
}

impl core::fmt::Display for UserType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserType::User),
            "admin" => Ok(UserType::Admin),
            "super_admin" => Ok(UserType::SuperAdmin),
            other => Err(DomainError::validation(format!(
                "unknown user type '{other}'"
            ))),
        }
    }
}
