//! User-store boundary (snake_case record contract).
//!
//! The store speaks in flat records with stringly-typed enum columns, the way
//! the managed backend exposes its `users` table. Translation to and from the
//! domain `User` lives in [`crate::mapping`] — implementations of
//! [`UserStore`] never see domain types other than identifiers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use huddle_core::{SubjectId, UserId};

/// A stored user row.
///
/// Field names match the backing table (`auth_user_id` is the external
/// subject reference; `role`/`user_type` are stored as their wire strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub auth_user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub user_type: String,
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

/// Insert shape; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRecord {
    pub auth_user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub user_type: String,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecordPatch {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub user_type: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub interests: Option<Vec<String>>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// Listing order for `UserStore::list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrder {
    /// Most recently created first.
    #[default]
    NewestFirst,
    /// Alphabetical by full name.
    NameAsc,
}

/// Filter/order/limit for member listing and search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Exact match on the stored role label.
    pub role: Option<String>,
    /// Case-insensitive substring match over full name and email.
    pub search: Option<String>,
    pub order: UserOrder,
    pub limit: Option<usize>,
}

/// Store operation error.
///
/// `ClaimsExpired` is the credential-expiry class: the caller may refresh the
/// identity session once and retry. Everything else is either a permanent
/// conflict or an unclassified backend failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("credential claims expired: {0}")]
    ClaimsExpired(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether a refresh-and-retry is worth attempting.
    pub fn is_claims_expired(&self) -> bool {
        matches!(self, StoreError::ClaimsExpired(_))
    }
}

/// The `users` collection.
///
/// Implementations must:
/// - enforce subject uniqueness (`insert` with an existing `auth_user_id`
///   fails with `Conflict`)
/// - apply patches atomically per record
/// - return list results already filtered, ordered and limited
pub trait UserStore: Send + Sync {
    /// Look up the record whose `auth_user_id` equals the given subject.
    fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new record, assigning id and creation timestamp.
    fn insert(&self, record: NewUserRecord) -> Result<UserRecord, StoreError>;

    /// Apply a partial update to an existing record.
    fn update(&self, id: UserId, patch: UserRecordPatch) -> Result<(), StoreError>;

    /// List records matching the query.
    fn list(&self, query: &UserQuery) -> Result<Vec<UserRecord>, StoreError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<UserRecord>, StoreError> {
        (**self).find_by_subject(subject)
    }

    fn insert(&self, record: NewUserRecord) -> Result<UserRecord, StoreError> {
        (**self).insert(record)
    }

    fn update(&self, id: UserId, patch: UserRecordPatch) -> Result<(), StoreError> {
        (**self).update(id, patch)
    }

    fn list(&self, query: &UserQuery) -> Result<Vec<UserRecord>, StoreError> {
        (**self).list(query)
    }
}
