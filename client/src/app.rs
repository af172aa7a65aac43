//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::SessionManager;

use crate::net::api::{FetchGateway, gateway_config};
use crate::pages::{admin::AdminPage, home::HomePage};
use crate::state::auth::AuthState;
use crate::util::storage::BrowserStorage;

/// The app-wide session, shared through context.
pub type ClientSession = Arc<SessionManager<BrowserStorage, FetchGateway>>;

/// Root application component.
///
/// Owns the session manager, mirrors its snapshots into the
/// `RwSignal<AuthState>` context, and restores the persisted session once on
/// startup.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session: ClientSession = Arc::new(SessionManager::new(BrowserStorage, FetchGateway::new(gateway_config())));
    let auth = RwSignal::new(AuthState::default());

    #[cfg(feature = "csr")]
    {
        let mut updates = session.subscribe();
        leptos::task::spawn_local(async move {
            loop {
                let next = AuthState::from(&*updates.borrow_and_update());
                auth.set(next);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        });

        let startup = Arc::clone(&session);
        leptos::task::spawn_local(async move {
            startup.start().await;
        });
    }

    provide_context(session);
    provide_context(auth);

    view! {
        <Title text="Storefront"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
            </Routes>
        </Router>
    }
}
