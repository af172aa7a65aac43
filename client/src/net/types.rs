//! Catalog DTOs returned by the storefront backend.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Image shown for products that have none.
pub const PLACEHOLDER_IMAGE: &str = "https://img.daisyui.com/images/stock/photo-1606107557195-0e29a4b5b4aa.webp";

/// A product as listed by `GET /api/Snowball`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "snowballId")]
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Image URL, falling back to [`PLACEHOLDER_IMAGE`] when blank.
    pub fn image_url(&self) -> &str {
        self.image.as_deref().filter(|url| !url.trim().is_empty()).unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn price_label(&self) -> String {
        format!("Price: ${:.2}", self.price)
    }
}
