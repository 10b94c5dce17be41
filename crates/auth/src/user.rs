//! Application user entity and its write shapes.
//!
//! The `User` here is the application-level record, distinct from whatever
//! account object the identity provider keeps. The session layer reconciles
//! the two (see `huddle-session`); this module only defines the shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use huddle_core::{SubjectId, UserId};

use crate::{Role, UserType};

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// An application member.
///
/// # Invariants
/// - Exactly one record exists per distinct identity-provider subject.
/// - `user_type` defaults to `User` and `role` to `Talent` at creation; both
///   change only through explicit update paths afterwards.
/// - `id` is `None` only for the synthetic fallback user published when
///   reconciliation fails unrecoverably; such a user is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<UserId>,
    pub subject: SubjectId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub user_type: UserType,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub interests: Vec<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this user has a persisted application record.
    ///
    /// Synthetic fallback users (published after an unrecoverable
    /// reconciliation failure) have no record and therefore no id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UserDraft
// ─────────────────────────────────────────────────────────────────────────────

/// Insert shape for a new user (no id or timestamps yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub subject: SubjectId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub user_type: UserType,
}

impl UserDraft {
    /// Build a defaulted draft from identity-provider session fields.
    ///
    /// The display name falls back to the local part of the email, then to
    /// the literal "User". Role and privilege always start at their
    /// least-privileged defaults regardless of what the session carries.
    pub fn from_identity(
        subject: SubjectId,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> Self {
        let email = email.unwrap_or_default().trim().to_string();
        let full_name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| {
                email
                    .split('@')
                    .next()
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "User".to_string());

        Self {
            subject,
            email,
            full_name,
            role: Role::default(),
            user_type: UserType::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UserPatch
// ─────────────────────────────────────────────────────────────────────────────

/// Partial update shape for self-service profile edits.
///
/// Every field is optional; `None` means "leave unchanged". Privilege level
/// is deliberately absent — it only moves through the admin path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub interests: Option<Vec<String>>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self == &UserPatch::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
