//! Lowercased vocabularies derived from the catalog.

use std::collections::BTreeSet;

use super::product::Product;

/// Category, brand and color universes used for fuzzy matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    categories: BTreeSet<String>,
    brands: BTreeSet<String>,
    colors: BTreeSet<String>,
}

impl Vocabulary {
    /// Build the vocabularies from a product list.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut vocabulary = Self::default();
        for product in products {
            vocabulary.categories.insert(product.category.to_lowercase());
            vocabulary.brands.insert(product.brand.to_lowercase());
            vocabulary.colors.insert(product.color.to_lowercase());
        }
        vocabulary
    }

    /// All lowercased categories.
    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// All lowercased brands.
    #[must_use]
    pub const fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    /// All lowercased colors.
    #[must_use]
    pub const fn colors(&self) -> &BTreeSet<String> {
        &self.colors
    }

    /// Case-insensitive category membership.
    #[must_use]
    pub fn has_category(&self, value: &str) -> bool {
        self.categories.contains(&value.to_lowercase())
    }

    /// Case-insensitive brand membership.
    #[must_use]
    pub fn has_brand(&self, value: &str) -> bool {
        self.brands.contains(&value.to_lowercase())
    }

    /// Case-insensitive color membership.
    #[must_use]
    pub fn has_color(&self, value: &str) -> bool {
        self.colors.contains(&value.to_lowercase())
    }
}
