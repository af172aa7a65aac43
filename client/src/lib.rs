//! # client
//!
//! Leptos + WASM storefront frontend. Pages, the nav bar, and the auth modal
//! read the session through `state::auth::AuthState`; the session itself is
//! owned by a `session::SessionManager` backed by `localStorage` and `fetch`.
//!
//! Browser glue is behind the `csr` feature. Without it the crate still
//! builds natively so its pure helpers can be unit tested.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
