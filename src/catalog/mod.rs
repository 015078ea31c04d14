//! Static product catalog.
//!
//! The catalog is loaded once from a JSON array at startup and shared
//! read-only behind an `Arc` for the lifetime of the process.

pub mod product;
pub mod vocabulary;

pub use product::Product;
pub use vocabulary::Vocabulary;

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::errors::{AssistantError, AssistantResult};

/// Immutable product list plus its derived vocabularies.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    vocabulary: Vocabulary,
}

impl Catalog {
    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    /// Returns an error if a product has a negative price.
    pub fn from_products(products: Vec<Product>) -> AssistantResult<Self> {
        if let Some(bad) = products
            .iter()
            .find(|p| p.price_value().is_none_or(|price| price < 0.0))
        {
            return Err(AssistantError::InvalidProduct(format!(
                "`{}` has invalid price {}",
                bad.name, bad.price
            )));
        }

        let vocabulary = Vocabulary::from_products(&products);
        Ok(Self {
            products,
            vocabulary,
        })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a record is invalid.
    pub fn from_json(json: &str) -> AssistantResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load the catalog file.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn load(path: &Path) -> AssistantResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AssistantError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded {} products ({} categories) from {}",
            catalog.len(),
            catalog.vocabulary.categories().len(),
            path.display()
        );
        Ok(catalog)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Derived lowercased vocabularies.
    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in their original casing, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First product whose category is exactly `category`.
    #[must_use]
    pub fn first_in_category(&self, category: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.category == category)
    }
}
