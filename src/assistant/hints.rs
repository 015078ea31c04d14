//! Per-turn hints handed to the preference extractor.

use crate::catalog::Catalog;
use crate::profile::{BudgetRange, PreferenceHints};

/// Derive extractor hints from a raw message.
///
/// `category` is the classifier's answer for the same message. The budget
/// comes from whitespace-separated tokens made only of digits; brand and
/// color come from the first product whose value appears in the message.
#[must_use]
pub fn derive_hints(catalog: &Catalog, message: &str, category: &str) -> PreferenceHints {
    let message_lower = message.to_lowercase();

    let budget = message
        .split_whitespace()
        .filter(|token| token.chars().all(|c| c.is_ascii_digit()))
        .map(|token| token.parse::<u64>().unwrap_or(u64::MAX))
        .max()
        .map(BudgetRange::up_to);

    let brand = catalog
        .products()
        .iter()
        .find(|p| message_lower.contains(&p.brand.to_lowercase()))
        .map(|p| p.brand.clone());

    let color = catalog
        .products()
        .iter()
        .find(|p| message_lower.contains(&p.color.to_lowercase()))
        .map(|p| p.color.clone());

    PreferenceHints {
        category: Some(category.to_string()),
        budget,
        brand,
        color,
    }
}
