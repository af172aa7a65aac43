//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::auth_modal::AuthModal;
use crate::state::auth::AuthState;

/// Brand link, auth controls, and an Admin link shown only to verified admins.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <header class="navbar">
            <div class="navbar__start">
                <A href="/" attr:class="btn btn--ghost navbar__brand">"Storefront"</A>
            </div>
            <div class="navbar__end">
                <AuthModal/>
                <Show when=move || auth.with(|s| s.is_admin)>
                    <A href="/admin" attr:class="btn btn--ghost">"Admin"</A>
                </Show>
            </div>
        </header>
    }
}
