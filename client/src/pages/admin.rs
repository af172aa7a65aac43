//! Admin page, rendered only for verified admins.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route guard re-verifies admin status with the backend on every entry.
//! Until it authorizes, the page shows a neutral placeholder and nothing
//! admin-only is mounted.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::ClientSession;
use crate::components::nav_bar::NavBar;
use crate::state::auth::AuthState;
use crate::util::auth::install_admin_guard;

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let guard_view = install_admin_guard(session, auth, navigate);

    move || match guard_view.get().placeholder() {
        Some(text) => view! { <div class="guard-placeholder">{text}</div> }.into_any(),
        None => view! {
            <div class="page">
                <NavBar/>
                <main class="page__main admin-page">
                    <h1>"Admin Panel"</h1>
                    <p>{move || auth.with(|s| s.display_name().map(|n| format!("Signed in as {n}.")))}</p>
                </main>
            </div>
        }
        .into_any(),
    }
}
