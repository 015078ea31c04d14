//! Normalized form of the products offered alongside a reply.

use crate::catalog::Product;

/// Products offered by the reply step: nothing, one, or several.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AiSuggestion {
    /// Nothing was offered.
    #[default]
    None,
    /// A single matched product.
    One(Product),
    /// An ordered list of products.
    Many(Vec<Product>),
}

impl AiSuggestion {
    /// Flatten into an ordered list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Product> {
        match self {
            Self::None => Vec::new(),
            Self::One(product) => vec![product],
            Self::Many(products) => products,
        }
    }
}

impl From<Option<Product>> for AiSuggestion {
    fn from(product: Option<Product>) -> Self {
        product.map_or(Self::None, Self::One)
    }
}

impl From<Product> for AiSuggestion {
    fn from(product: Product) -> Self {
        Self::One(product)
    }
}

impl From<Vec<Product>> for AiSuggestion {
    fn from(products: Vec<Product>) -> Self {
        Self::Many(products)
    }
}
