//! The session synchronizer: single source of truth for "who is signed in".
//!
//! ## Ordering policy
//!
//! Notifications are queued and processed strictly in arrival order by a
//! single drainer; at most one reconciliation is in flight at any time. A
//! `Cleared` arriving while an `Established` resolution is in flight is
//! therefore processed (and published) after it — clear wins by sequencing,
//! not by cancelling the in-flight work. Unsubscribing stops delivery to
//! that subscriber but never cancels a reconciliation already running.
//!
//! ## Failure policy
//!
//! Every notification resolves to a published state. A claims-expiry failure
//! from the store gets exactly one provider refresh and one retry; any other
//! failure (or a failed refresh) degrades to a synthetic least-privileged
//! user built from the identity session alone, with `loading: false`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;

use huddle_auth::{User, UserDraft};

use crate::event::{IdentitySession, SessionEvent};
use crate::mapping;
use crate::provider::{IdentityError, IdentityProvider};
use crate::state::SessionState;
use crate::store::{StoreError, UserStore};

/// A live subscription to session snapshots.
///
/// The subscription immediately receives the snapshot that was current when
/// it was taken, then every subsequent published state. Dropping it is the
/// disposer: the synchronizer releases the slot on its next publish, so
/// re-subscribing never leaks the prior subscription.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: Receiver<SessionState>,
}

impl SessionSubscription {
    /// Block until the next snapshot is available.
    pub fn recv(&self) -> Result<SessionState, RecvError> {
        self.receiver.recv()
    }

    /// Receive a snapshot without blocking.
    pub fn try_recv(&self) -> Result<SessionState, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SessionState, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Reconciles identity-provider sessions with application user records and
/// publishes the result.
///
/// This is an explicitly constructed, owned instance — callers share it via
/// `Arc` and hand it to whatever drives the UI; there is no ambient
/// singleton.
pub struct SessionSynchronizer<P, S> {
    provider: P,
    store: S,
    current: Mutex<SessionState>,
    subscribers: Mutex<Vec<mpsc::Sender<SessionState>>>,
    queue: Mutex<VecDeque<SessionEvent>>,
    draining: AtomicBool,
}

impl<P, S> SessionSynchronizer<P, S>
where
    P: IdentityProvider,
    S: UserStore,
{
    pub fn new(provider: P, store: S) -> Self {
        Self {
            provider,
            store,
            current: Mutex::new(SessionState::initial()),
            subscribers: Mutex::new(Vec::new()),
            queue: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
        }
    }

    /// Current snapshot (what the last publish delivered).
    pub fn state(&self) -> SessionState {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a listener; it receives the current snapshot immediately.
    ///
    /// The snapshot read and the registration happen under the subscriber
    /// lock, so a publish racing with `subscribe` cannot slip between them:
    /// the listener either starts from the newly published state or receives
    /// it as its next delivery (possibly both; snapshots are absolute, so a
    /// duplicate is harmless).
    pub fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::channel();

        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // A send to a channel we still hold the receiver for cannot fail.
        let _ = tx.send(self.state());
        subs.push(tx);

        SessionSubscription { receiver: rx }
    }

    /// Deliver a session-change notification.
    ///
    /// Never drops a notification: if a reconciliation is already in flight
    /// on another thread, the event is queued and the active drainer picks
    /// it up in arrival order.
    pub fn notify(&self, event: SessionEvent) {
        tracing::debug!(kind = event.kind(), "session notification received");
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(event);
        self.drain();
    }

    /// Terminate the provider session and clear the published state.
    pub fn sign_out(&self) -> Result<(), IdentityError> {
        self.provider.sign_out()?;
        self.notify(SessionEvent::Cleared);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queue processing
    // ─────────────────────────────────────────────────────────────────────────

    fn drain(&self) {
        loop {
            // Single-drainer guard: whoever wins processes the whole queue.
            if self.draining.swap(true, Ordering::AcqRel) {
                return;
            }

            while let Some(event) = self.pop() {
                self.process(event);
            }

            self.draining.store(false, Ordering::Release);

            // A producer may have enqueued between our last pop and the
            // release; take another pass so nothing is stranded.
            if self
                .queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty()
            {
                return;
            }
        }
    }

    fn pop(&self) -> Option<SessionEvent> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn process(&self, event: SessionEvent) {
        match event {
            SessionEvent::Established(session) => {
                let user = self.resolve_established(session);
                self.publish(SessionState::resolved(user));
            }
            SessionEvent::Cleared => {
                // No storage calls on sign-out.
                self.publish(SessionState::signed_out());
            }
            SessionEvent::Transitioning => {
                let user = self.state().user;
                self.publish(SessionState { user, loading: true });
            }
        }
    }

    fn publish(&self, state: SessionState) {
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = state.clone();

        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Drop subscribers whose receiver is gone (disposed subscriptions).
        subs.retain(|tx| tx.send(state.clone()).is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reconciliation
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_established(&self, session: IdentitySession) -> User {
        match self.resolve_once(&session) {
            Ok(user) => user,
            Err(err) if err.is_claims_expired() => {
                tracing::warn!(
                    subject = %session.subject,
                    error = %err,
                    "claims expired during reconciliation, refreshing session"
                );
                match self.provider.refresh(&session) {
                    Ok(refreshed) => match self.resolve_once(&refreshed) {
                        Ok(user) => user,
                        Err(retry_err) => {
                            tracing::error!(
                                subject = %refreshed.subject,
                                error = %retry_err,
                                "post-refresh reconciliation failed, using fallback user"
                            );
                            Self::fallback_user(&refreshed)
                        }
                    },
                    Err(refresh_err) => {
                        tracing::error!(
                            subject = %session.subject,
                            error = %refresh_err,
                            "session refresh failed, using fallback user"
                        );
                        Self::fallback_user(&session)
                    }
                }
            }
            Err(err) => {
                tracing::error!(
                    subject = %session.subject,
                    error = %err,
                    "reconciliation failed, using fallback user"
                );
                Self::fallback_user(&session)
            }
        }
    }

    /// One lookup-or-create attempt against the store.
    ///
    /// Idempotent per subject: a lost create race (another resolution
    /// inserted first) is resolved by re-reading the winner's row.
    fn resolve_once(&self, session: &IdentitySession) -> Result<User, StoreError> {
        if let Some(record) = self.store.find_by_subject(&session.subject)? {
            return Ok(mapping::to_user(&record));
        }

        let draft = UserDraft::from_identity(
            session.subject.clone(),
            session.email.as_deref(),
            session.display_name.as_deref(),
        );

        match self.store.insert(mapping::draft_to_new_record(&draft)) {
            Ok(record) => {
                tracing::info!(subject = %session.subject, "created application user record");
                Ok(mapping::to_user(&record))
            }
            Err(StoreError::Conflict(_)) => match self.store.find_by_subject(&session.subject)? {
                Some(record) => Ok(mapping::to_user(&record)),
                None => Err(StoreError::Conflict(
                    "insert conflicted but no record found for subject".to_string(),
                )),
            },
            Err(err) => Err(err),
        }
    }

    /// Least-privileged user synthesized from session fields alone.
    ///
    /// Published when the store is unreachable so the UI is never stuck on a
    /// failed backend call; it carries no record id and default capability.
    fn fallback_user(session: &IdentitySession) -> User {
        let draft = UserDraft::from_identity(
            session.subject.clone(),
            session.email.as_deref(),
            session.display_name.as_deref(),
        );

        User {
            id: None,
            subject: draft.subject,
            email: draft.email,
            full_name: draft.full_name,
            role: draft.role,
            user_type: draft.user_type,
            bio: None,
            location: None,
            interests: Vec::new(),
            linkedin_url: None,
            twitter_url: None,
            website_url: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
