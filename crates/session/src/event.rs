//! Typed session-change events observed from the identity provider.

use serde::{Deserialize, Serialize};

use huddle_core::SubjectId;

/// An identity-provider session as observed by the synchronizer.
///
/// Owned by the provider; this is a read-only view of whatever the provider
/// currently considers the signed-in account. Tokens are opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySession {
    pub subject: SubjectId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl IdentitySession {
    pub fn new(subject: impl Into<SubjectId>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            display_name: None,
            access_token: None,
            refresh_token: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Session lifecycle notification.
///
/// Delivered by the provider bridge in arrival order; the synchronizer
/// processes them strictly FIFO (see `SessionSynchronizer::notify`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session is (newly or still) established; carries the session.
    Established(IdentitySession),
    /// The session was signed out or expired; there is no current session.
    Cleared,
    /// The provider is replacing the session (e.g. a token refresh is in
    /// progress); the next `Established` carries the replacement.
    Transitioning,
}

impl SessionEvent {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Established(_) => "established",
            SessionEvent::Cleared => "cleared",
            SessionEvent::Transitioning => "transitioning",
        }
    }
}
