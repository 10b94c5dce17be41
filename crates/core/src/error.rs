//! Errors produced by the pure domain layer.

use thiserror::Error;

/// Result alias for domain-layer operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic, business-level failure.
///
/// Everything here is decidable from the inputs alone: a malformed label, a
/// broken entity invariant, a missing member, a denied capability. Store and
/// identity-provider failures carry their own taxonomies at those boundaries;
/// duplicate-key conflicts in particular belong to the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (unknown role label, malformed value).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An entity invariant was violated (e.g. writing back a user that was
    /// never persisted).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The referenced member record does not exist.
    #[error("not found")]
    NotFound,

    /// The acting user lacks the privilege for the operation.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
