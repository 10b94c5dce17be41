//! Account operation errors.

use thiserror::Error;

use huddle_core::DomainError;
use huddle_session::StoreError;

/// Account operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
