//! Product record as stored in the catalog.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A purchasable catalog entry.
///
/// Products are loaded once at startup and never mutated; equality is
/// structural over every field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Catalog category (original casing).
    pub category: String,
    /// Brand name (original casing).
    pub brand: String,
    /// Unit price, never negative; kept as written so `10` stays `10`.
    pub price: Number,
    /// Color name (original casing).
    pub color: String,
    /// One-line description.
    pub short_description: String,
}

impl Product {
    /// Price as a float for comparisons.
    #[must_use]
    pub fn price_value(&self) -> Option<f64> {
        self.price.as_f64()
    }

    /// Whether the price falls inside an inclusive `[low, high]` range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn priced_within(&self, low: u64, high: u64) -> bool {
        self.price_value()
            .is_some_and(|price| low as f64 <= price && price <= high as f64)
    }
}
