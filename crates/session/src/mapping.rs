//! Centralized record<->entity translation at the store boundary.
//!
//! The backing table speaks snake_case columns with stringly-typed enums;
//! the domain speaks typed `User`/`Role`/`UserType`. All translation happens
//! here, in both directions, so no call site carries its own field mapping.
//!
//! Reading is lenient: malformed enum strings degrade to their
//! least-privileged defaults instead of failing the whole session (the
//! authorization policy must never gain capability from bad data, and a
//! member must never be locked out by it either).

use huddle_auth::{User, UserDraft, UserPatch, UserType};
use huddle_core::{DomainError, SubjectId, UserId};

use crate::store::{NewUserRecord, UserRecord, UserRecordPatch};

/// Translate a stored row into the domain entity.
pub fn to_user(record: &UserRecord) -> User {
    User {
        id: Some(UserId::from_uuid(record.id)),
        subject: SubjectId::new(record.auth_user_id.clone()),
        email: record.email.clone(),
        full_name: record.full_name.clone(),
        role: record.role.parse().unwrap_or_default(),
        user_type: UserType::from_stored(&record.user_type),
        bio: record.bio.clone(),
        location: record.location.clone(),
        interests: record.interests.clone(),
        linkedin_url: record.linkedin_url.clone(),
        twitter_url: record.twitter_url.clone(),
        website_url: record.website_url.clone(),
        avatar_url: record.avatar_url.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Translate a persisted domain entity back into its stored row shape.
///
/// Fails for the synthetic fallback user: it has no record id and must never
/// be written back.
pub fn to_record(user: &User) -> Result<UserRecord, DomainError> {
    let id = user
        .id
        .ok_or_else(|| DomainError::invariant("fallback user has no stored record"))?;

    Ok(UserRecord {
        id: *id.as_uuid(),
        auth_user_id: user.subject.as_str().to_string(),
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        role: user.role.as_str().to_string(),
        user_type: user.user_type.as_str().to_string(),
        bio: user.bio.clone(),
        location: user.location.clone(),
        interests: user.interests.clone(),
        linkedin_url: user.linkedin_url.clone(),
        twitter_url: user.twitter_url.clone(),
        website_url: user.website_url.clone(),
        avatar_url: user.avatar_url.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}

/// Insert shape for a defaulted draft.
pub fn draft_to_new_record(draft: &UserDraft) -> NewUserRecord {
    NewUserRecord {
        auth_user_id: draft.subject.as_str().to_string(),
        email: draft.email.clone(),
        full_name: draft.full_name.clone(),
        role: draft.role.as_str().to_string(),
        user_type: draft.user_type.as_str().to_string(),
    }
}

/// Column patch for a self-service profile edit.
///
/// `user_type` is intentionally never populated here; privilege changes go
/// through their own admin-gated path.
pub fn patch_to_record_patch(patch: &UserPatch) -> UserRecordPatch {
    UserRecordPatch {
        full_name: patch.full_name.clone(),
        role: patch.role.map(|r| r.as_str().to_string()),
        user_type: None,
        bio: patch.bio.clone(),
        location: patch.location.clone(),
        interests: patch.interests.clone(),
        linkedin_url: patch.linkedin_url.clone(),
        twitter_url: patch.twitter_url.clone(),
        website_url: patch.website_url.clone(),
        avatar_url: patch.avatar_url.clone(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
