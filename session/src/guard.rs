//! Protected-route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin views mount a `RouteGuard` before rendering anything. The guard
//! tells its host which neutral placeholder to show while the session is
//! loading and while admin status is re-verified, and either authorizes the
//! view or redirects to the landing route. Protected content is only shown
//! after `GuardView::Authorized`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::gateway::AuthGateway;
use crate::manager::SessionManager;
use crate::storage::KeyValueStorage;

/// Public route unauthorized users are sent to.
pub const LANDING_ROUTE: &str = "/";

/// What a guarded view should currently display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardView {
    /// Session still being restored.
    #[default]
    Loading,
    /// Session present, admin status being verified.
    Checking,
    Authorized,
    /// Navigation away has been requested.
    Redirected,
}

impl GuardView {
    /// Placeholder text, or `None` when the protected content may render.
    #[must_use]
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading..."),
            Self::Checking => Some("Checking permissions..."),
            Self::Redirected => Some("Redirecting..."),
            Self::Authorized => None,
        }
    }
}

/// The view layer a guard drives.
pub trait GuardHost {
    /// Display `view` in place of the protected content.
    fn show(&self, view: GuardView);
    /// Navigate to `route`.
    fn redirect(&self, route: &str);
}

/// Admin-only route guard. Redirects at most once per instance.
pub struct RouteGuard<H> {
    host: H,
    landing_route: String,
    view: Mutex<GuardView>,
    redirected: AtomicBool,
}

impl<H: GuardHost> RouteGuard<H> {
    pub fn new(host: H) -> Self {
        Self::with_landing_route(host, LANDING_ROUTE)
    }

    pub fn with_landing_route(host: H, landing_route: impl Into<String>) -> Self {
        Self {
            host,
            landing_route: landing_route.into(),
            view: Mutex::new(GuardView::Loading),
            redirected: AtomicBool::new(false),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn view(&self) -> GuardView {
        self.view.lock().map_or(GuardView::Loading, |v| *v)
    }

    /// Run the guard against `manager`'s current session.
    ///
    /// Waits for startup restoration, then redirects when there is no
    /// session or the session is not an admin. Can be re-run when the
    /// session changes; a guard that already redirected stays redirected.
    pub async fn enter<S, G>(&self, manager: &SessionManager<S, G>) -> GuardView
    where
        S: KeyValueStorage,
        G: AuthGateway,
    {
        if self.redirected.load(Ordering::SeqCst) {
            return GuardView::Redirected;
        }
        self.set_view(GuardView::Loading);

        let mut rx = manager.subscribe();
        let logged_in = match rx.wait_for(|snap| !snap.loading).await {
            Ok(snap) => snap.is_logged_in(),
            Err(_) => false,
        };
        if !logged_in {
            return self.deny("no session");
        }

        self.set_view(GuardView::Checking);
        if manager.verify_admin_status().await {
            self.set_view(GuardView::Authorized);
            GuardView::Authorized
        } else {
            self.deny("not an admin")
        }
    }

    fn deny(&self, reason: &str) -> GuardView {
        self.set_view(GuardView::Redirected);
        if !self.redirected.swap(true, Ordering::SeqCst) {
            info!(reason, route = %self.landing_route, "access denied; redirecting");
            self.host.redirect(&self.landing_route);
        }
        GuardView::Redirected
    }

    fn set_view(&self, view: GuardView) {
        let changed = match self.view.lock() {
            Ok(mut current) if *current != view => {
                *current = view;
                true
            }
            Ok(_) => false,
            Err(_) => true,
        };
        if changed {
            self.host.show(view);
        }
    }
}
