//! Scripted identity provider for tests and local development.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use huddle_session::{IdentityError, IdentityProvider, IdentitySession};

/// Identity provider whose refresh outcomes are scripted per call.
///
/// With no script queued, `refresh` succeeds and hands back the same session
/// with a rotated access token — the shape a healthy provider produces.
#[derive(Debug, Default)]
pub struct ScriptedIdentityProvider {
    refresh_script: Mutex<VecDeque<Result<(), IdentityError>>>,
    refresh_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl ScriptedIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next refresh call to fail with `err`.
    pub fn fail_next_refresh(&self, err: IdentityError) {
        if let Ok(mut script) = self.refresh_script.lock() {
            script.push_back(Err(err));
        }
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for ScriptedIdentityProvider {
    fn refresh(&self, session: &IdentitySession) -> Result<IdentitySession, IdentityError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut script) = self.refresh_script.lock() {
            if let Some(Err(err)) = script.pop_front() {
                return Err(err);
            }
        }

        let mut refreshed = session.clone();
        refreshed.access_token = Some(format!("token-{}", self.refresh_calls()));
        Ok(refreshed)
    }

    fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_rotates_the_access_token_by_default() {
        let provider = ScriptedIdentityProvider::new();
        let session = IdentitySession::new("sub-1");

        let refreshed = provider.refresh(&session).unwrap();
        assert_eq!(refreshed.subject, session.subject);
        assert!(refreshed.access_token.is_some());
        assert_eq!(provider.refresh_calls(), 1);
    }

    #[test]
    fn scripted_refresh_failure_fires_once() {
        let provider = ScriptedIdentityProvider::new();
        provider.fail_next_refresh(IdentityError::RefreshUnavailable);

        let session = IdentitySession::new("sub-1");
        assert!(provider.refresh(&session).is_err());
        assert!(provider.refresh(&session).is_ok());
    }
}
