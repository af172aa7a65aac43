//! Product-list state for the home page.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use session::GatewayError;

use crate::net::types::Product;

/// Catalog fetched once per home-page mount.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl ProductsState {
    /// Record the outcome of a catalog fetch. A failure keeps whatever was
    /// listed before.
    pub fn apply(&mut self, result: Result<Vec<Product>, GatewayError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                self.error = Some(format!("Could not load products: {e}"));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }
}
