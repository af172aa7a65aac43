//! Session state machine and admin resolution.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` owns the in-memory session and publishes it as a
//! `SessionSnapshot` through a `tokio::sync::watch` channel. Consumers
//! (navigation, route guards, the CLI) subscribe instead of reading a global.
//!
//! States: `LoggedOut` -> `LoggedIn(Pending)` -> `LoggedIn(Resolved(bool))`.
//! Login is optimistic: the session is published before the admin check
//! runs, and a failed check only ever resolves to "not admin".
//!
//! CONCURRENCY
//! ===========
//! Every login, logout, and restore bumps `epoch`. An admin check remembers
//! the epoch it started under and is dropped if the epoch moved on, so a
//! slow check cannot resurrect a session that was logged out meanwhile.
//! Concurrent logins are not serialized; the last `save` wins.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::gateway::{AdminVerdict, AuthGateway, Credentials, Registration};
use crate::record::{Session, UserRecord};
use crate::storage::KeyValueStorage;
use crate::store::SessionStore;

/// Progress of the admin check for a logged-in session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminResolution {
    Pending,
    Resolved(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { session: Session, admin: AdminResolution },
}

/// What subscribers see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// True until persisted state has been read once.
    pub loading: bool,
    pub state: SessionState,
    /// Bumped on every login, logout, and restore.
    pub epoch: u64,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self { loading: true, state: SessionState::LoggedOut, epoch: 0 }
    }
}

impl SessionSnapshot {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::LoggedIn { session, .. } => Some(session),
            SessionState::LoggedOut => None,
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session().is_some()
    }

    /// True only once the admin check has resolved positively.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { admin: AdminResolution::Resolved(true), .. })
    }

    #[must_use]
    pub fn admin_pending(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { admin: AdminResolution::Pending, .. })
    }
}

/// Owns the current session, its persistence, and its gateway.
pub struct SessionManager<S, G> {
    store: SessionStore<S>,
    gateway: G,
    state: watch::Sender<SessionSnapshot>,
}

impl<S: KeyValueStorage, G: AuthGateway> SessionManager<S, G> {
    /// Create a manager in the loading state. Call [`Self::restore`] or
    /// [`Self::start`] once storage is reachable.
    pub fn new(storage: S, gateway: G) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self { store: SessionStore::new(storage), gateway, state }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.state.borrow().session().map(|s| s.user().clone())
    }

    /// Resolve the startup state from persisted storage. Returns whether a
    /// session was found; it starts with its admin check pending.
    pub fn restore(&self) -> bool {
        let restored = self.store.load();
        let found = restored.is_some();
        self.state.send_modify(|snap| {
            snap.loading = false;
            snap.epoch += 1;
            snap.state = match restored {
                Some(session) => SessionState::LoggedIn { session, admin: AdminResolution::Pending },
                None => SessionState::LoggedOut,
            };
        });
        debug!(found, "session restored from storage");
        found
    }

    /// [`Self::restore`], then resolve admin status for a restored session.
    pub async fn start(&self) -> bool {
        if self.restore() { self.verify_admin_status().await } else { false }
    }

    /// Persist and publish `user`/`token`, then resolve admin status.
    ///
    /// The session is published before the first suspension point. The
    /// return value is the admin result, or `false` if the session was
    /// replaced or logged out before the check finished.
    pub async fn login(&self, user: UserRecord, token: impl Into<String>) -> bool {
        let session = Session::new(user, token);
        self.store.save(&session);

        let mut epoch = 0;
        let published = session.clone();
        self.state.send_modify(|snap| {
            snap.loading = false;
            snap.epoch += 1;
            snap.state = SessionState::LoggedIn { session: published, admin: AdminResolution::Pending };
            epoch = snap.epoch;
        });
        info!(email = session.email(), "session started");

        let is_admin = self.resolve_admin(&session).await;
        self.apply_admin(epoch, is_admin) && is_admin
    }

    /// Clear persisted state and publish `LoggedOut`. Idempotent.
    pub fn logout(&self) {
        self.store.clear();
        let changed = self.state.send_if_modified(|snap| {
            if !snap.loading && snap.state == SessionState::LoggedOut {
                return false;
            }
            snap.loading = false;
            snap.epoch += 1;
            snap.state = SessionState::LoggedOut;
            true
        });
        if changed {
            info!("session ended");
        }
    }

    /// Admin status of the persisted session. Never fails: anything that
    /// prevents a positive answer resolves to `false`.
    pub async fn check_admin_status(&self) -> bool {
        let Some(session) = self.store.load() else {
            return false;
        };
        self.resolve_admin(&session).await
    }

    /// Re-run [`Self::check_admin_status`] and publish the result.
    ///
    /// Returns `false` when logged out, or when the session changed while
    /// the check was in flight. If the persisted session is gone or was
    /// discarded as corrupt, the published session ends as well.
    pub async fn verify_admin_status(&self) -> bool {
        let epoch = {
            let snap = self.state.borrow();
            if !snap.is_logged_in() {
                return false;
            }
            snap.epoch
        };
        let session = match self.store.try_load() {
            Ok(Some(session)) => session,
            Ok(None) => {
                self.end_session(epoch);
                return false;
            }
            Err(e) => {
                warn!(error = %e, "failed to read persisted session");
                self.apply_admin(epoch, false);
                return false;
            }
        };
        let is_admin = self.resolve_admin(&session).await;
        self.apply_admin(epoch, is_admin) && is_admin
    }

    /// Log in through the gateway with `credentials`.
    ///
    /// Returns the admin result of the new session.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the gateway rejects or cannot be
    /// reached; the current session is left untouched.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<bool, AuthError> {
        let mut response = self.gateway.login(credentials).await.map_err(|e| {
            warn!(error = %e, email = %credentials.email, "login failed");
            AuthError::from(e)
        })?;
        if response.token.trim().is_empty() {
            return Err(AuthError::InvalidResponse("login response has no token".to_owned()));
        }
        let token = std::mem::take(&mut response.token);
        let user = response.into_user_record(&credentials.email);
        Ok(self.login(user, token).await)
    }

    /// Create an account. The caller logs in separately afterwards.
    ///
    /// # Errors
    ///
    /// [`AuthError::PasswordMismatch`] before any network call, otherwise
    /// the gateway failure as an [`AuthError`].
    pub async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        if !registration.passwords_match() {
            return Err(AuthError::PasswordMismatch);
        }
        self.gateway.register(registration).await.map_err(|e| {
            warn!(error = %e, email = %registration.email, "registration failed");
            AuthError::from(e)
        })?;
        info!(email = %registration.email, "account registered");
        Ok(())
    }

    async fn resolve_admin(&self, session: &Session) -> bool {
        if session.has_admin_claim() {
            debug!(email = session.email(), "admin status from cached role claim");
            return true;
        }
        match self.gateway.verify_admin(session.token()).await {
            Ok(status) => match AdminVerdict::from_status(status) {
                AdminVerdict::Granted => true,
                AdminVerdict::Denied => {
                    info!(status, "user is not authorized as admin");
                    false
                }
                AdminVerdict::Unverifiable(status) => {
                    warn!(status, "admin verification unavailable; treating as non-admin");
                    false
                }
            },
            Err(e) => {
                warn!(error = %e, "admin verification failed; treating as non-admin");
                false
            }
        }
    }

    /// Publish an admin result computed under `epoch`. Returns whether the
    /// result was still current.
    /// Publish `LoggedOut` for a session whose persisted record vanished,
    /// unless the session at `epoch` was already replaced.
    fn end_session(&self, epoch: u64) {
        let changed = self.state.send_if_modified(|snap| {
            if snap.epoch != epoch || !snap.is_logged_in() {
                return false;
            }
            snap.loading = false;
            snap.epoch += 1;
            snap.state = SessionState::LoggedOut;
            true
        });
        if changed {
            info!("persisted session missing; session ended");
        }
    }

    fn apply_admin(&self, epoch: u64, is_admin: bool) -> bool {
        let mut current = false;
        self.state.send_if_modified(|snap| {
            if snap.epoch != epoch {
                return false;
            }
            let SessionState::LoggedIn { admin, .. } = &mut snap.state else {
                return false;
            };
            current = true;
            let next = AdminResolution::Resolved(is_admin);
            if *admin == next {
                return false;
            }
            *admin = next;
            true
        });
        if !current {
            debug!(epoch, "discarding stale admin resolution");
        }
        current
    }
}
