//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager publishes snapshots on a `watch` channel; the app root
//! mirrors each one into a `RwSignal<AuthState>` so components can react to
//! login, logout, and admin resolution.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{SessionSnapshot, UserRecord};

/// Render-facing view of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
    /// True until persisted state has been restored.
    pub loading: bool,
    /// True only once the admin check resolved positively.
    pub is_admin: bool,
    pub admin_pending: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true, is_admin: false, admin_pending: false }
    }
}

impl From<&SessionSnapshot> for AuthState {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            user: snapshot.session().map(|s| s.user().clone()),
            loading: snapshot.loading,
            is_admin: snapshot.is_admin(),
            admin_pending: snapshot.admin_pending(),
        }
    }
}

impl AuthState {
    /// Name shown in the nav bar: the user's name, else their email.
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(UserRecord::display_name)
    }
}
