//! Public landing page with the product catalog.

use leptos::prelude::*;

use crate::app::ClientSession;
use crate::components::nav_bar::NavBar;
use crate::components::product_card::ProductCard;
use crate::state::auth::AuthState;
use crate::state::products::ProductsState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<ClientSession>();
    let products = RwSignal::new(ProductsState::default());

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = session.gateway().list_products().await;
        products.update(|state| state.apply(result));
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = session;
    }

    let greeting = move || {
        auth.with(|state| match state.display_name() {
            Some(name) => format!("Welcome back, {name}."),
            None => "Welcome to the storefront.".to_owned(),
        })
    };

    let catalog = move || {
        let state = products.get();
        if state.loading {
            return view! { <div class="guard-placeholder">"Loading..."</div> }.into_any();
        }
        let error = state.error.clone().map(|text| view! { <div class="alert alert--error">{text}</div> });
        let empty = state.is_empty().then(|| view! { <p>"No products available."</p> });
        view! {
            {error}
            {empty}
            <div class="product-grid">
                {state.items.into_iter().map(|product| view! { <ProductCard product=product/> }).collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="page">
            <NavBar/>
            <main class="page__main">
                <h1>"Storefront"</h1>
                <p>{greeting}</p>
                {catalog}
            </main>
        </div>
    }
}
