//! Identity-provider boundary.

use std::sync::Arc;

use thiserror::Error;

use crate::event::IdentitySession;

/// Identity-provider operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The provider cannot refresh this session (no refresh token, or the
    /// provider does not support refresh at all).
    #[error("session refresh unavailable")]
    RefreshUnavailable,

    /// The provider rejected or failed the operation.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// External identity provider, reduced to the two explicit operations the
/// synchronizer needs. Session-change *notifications* are pushed into the
/// synchronizer separately (`SessionSynchronizer::notify`); timeouts for both
/// operations are the provider's concern.
pub trait IdentityProvider: Send + Sync {
    /// Exchange the session for a refreshed one (new claims/tokens).
    fn refresh(&self, session: &IdentitySession) -> Result<IdentitySession, IdentityError>;

    /// Terminate the provider-side session.
    fn sign_out(&self) -> Result<(), IdentityError>;
}

impl<P> IdentityProvider for Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    fn refresh(&self, session: &IdentitySession) -> Result<IdentitySession, IdentityError> {
        (**self).refresh(session)
    }

    fn sign_out(&self) -> Result<(), IdentityError> {
        (**self).sign_out()
    }
}
