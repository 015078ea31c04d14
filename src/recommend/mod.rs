//! Final recommendation list for a shopper.
//!
//! Products offered by the reply step always come first, in their original
//! order; catalog entries matching the profile top the list up to
//! [`MAX_RECOMMENDATIONS`]. Without a preferred category the offered
//! products are returned as-is.

pub mod suggestion;

pub use suggestion::AiSuggestion;

use crate::catalog::{Catalog, Product};
use crate::profile::UserProfile;

/// Size the list is topped up to from the catalog.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Combine offered products with catalog entries matching the profile.
#[must_use]
pub fn recommend(
    profile: &UserProfile,
    catalog: &Catalog,
    ai_suggested: impl Into<AiSuggestion>,
) -> Vec<Product> {
    let mut recommendations = ai_suggested.into().into_vec();

    let Some(category) = profile.preferred_category.as_deref() else {
        return recommendations;
    };

    if recommendations.len() >= MAX_RECOMMENDATIONS {
        return recommendations;
    }

    let category = category.to_lowercase();
    let filtered: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| fits_profile(p, profile, &category))
        .filter(|p| !recommendations.contains(p))
        .collect();

    let room = MAX_RECOMMENDATIONS - recommendations.len();
    recommendations.extend(filtered.into_iter().take(room).cloned());
    recommendations
}

fn fits_profile(product: &Product, profile: &UserProfile, category: &str) -> bool {
    let brand = product.brand.to_lowercase();
    let brand_ok = profile.brand_preference.is_empty()
        || profile
            .brand_preference
            .iter()
            .any(|preferred| brand.contains(&preferred.to_lowercase()));
    let color_ok = profile
        .color
        .as_deref()
        .is_none_or(|color| product.color.to_lowercase() == color.to_lowercase());

    product.category.to_lowercase() == category
        && brand_ok
        && color_ok
        && product.priced_within(profile.budget_range.low(), profile.budget_range.high())
}
