//! Card for one catalog entry on the home page.

use leptos::prelude::*;

use crate::net::types::Product;

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let image = product.image_url().to_owned();
    let price = product.price_label();

    view! {
        <div class="card product-card">
            <figure class="product-card__image">
                <img src=image alt=product.name.clone()/>
            </figure>
            <div class="card__body">
                <h2 class="card__title">{product.name}</h2>
                <p>{product.description}</p>
                <p class="product-card__price">{price}</p>
            </div>
        </div>
    }
}
