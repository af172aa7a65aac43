//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session from the `RwSignal<AuthState>` context and
//! call the session manager for login, registration, and logout.
//! `product_card` renders one catalog entry.

pub mod auth_modal;
pub mod nav_bar;
pub mod product_card;
