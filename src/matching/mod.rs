//! Message-to-product matching.

pub mod matcher;
pub mod similarity;

pub use matcher::{CatalogMatcher, MAX_ALTERNATIVES};
pub use similarity::{closest_match, similarity_ratio};
