//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the session gateway and the product listing over the
//! browser `fetch` API. `types` holds the catalog DTOs.

pub mod api;
pub mod types;
