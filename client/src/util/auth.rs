//! Shared route-guard wiring for protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages apply identical redirect behavior: a `session::RouteGuard`
//! drives a `RwSignal<GuardView>` the page renders from, and leaves through
//! the router when access is denied.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::{GuardHost, GuardView, RouteGuard};

use crate::app::ClientSession;
use crate::state::auth::AuthState;

/// [`GuardHost`] that publishes views to a signal and navigates via the router.
pub struct SignalGuardHost<F> {
    view: RwSignal<GuardView>,
    navigate: F,
}

impl<F> SignalGuardHost<F> {
    pub fn new(view: RwSignal<GuardView>, navigate: F) -> Self {
        Self { view, navigate }
    }
}

impl<F: Fn(&str, NavigateOptions)> GuardHost for SignalGuardHost<F> {
    fn show(&self, view: GuardView) {
        self.view.set(view);
    }

    fn redirect(&self, route: &str) {
        (self.navigate)(route, redirect_options());
    }
}

/// Replace the history entry so "back" does not return to a denied page.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// True once auth has loaded and no user is present.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Guard the current page for admins only.
///
/// Runs the guard on mount and again whenever the session goes away, so
/// logging out on a protected page also leaves it. Returns the signal the
/// page renders its placeholder or content from.
pub fn install_admin_guard<F>(session: ClientSession, auth: RwSignal<AuthState>, navigate: F) -> RwSignal<GuardView>
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    let view = RwSignal::new(GuardView::Loading);
    let guard = Arc::new(RouteGuard::new(SignalGuardHost::new(view, navigate)));

    #[cfg(feature = "csr")]
    {
        let run = move || {
            let guard = Arc::clone(&guard);
            let session = Arc::clone(&session);
            leptos::task::spawn_local(async move {
                guard.enter(&*session).await;
            });
        };
        run();
        Effect::new(move || {
            if should_redirect_unauth(&auth.get()) {
                run();
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (session, auth, guard);
    }

    view
}
