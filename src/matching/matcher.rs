//! Catalog lookup for a single shopper message.

use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::llm::CategoryInference;

/// Number of random alternatives offered when nothing matched.
pub const MAX_ALTERNATIVES: usize = 3;

/// Finds the product a message is about, or samples alternatives.
#[derive(Clone, Debug)]
pub struct CatalogMatcher {
    catalog: Arc<Catalog>,
}

impl CatalogMatcher {
    /// Create a matcher over a shared catalog.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// First product whose lowercased name, category or brand appears in
    /// the lowercased message.
    #[must_use]
    pub fn substring_match(&self, message: &str) -> Option<&Product> {
        let message_lower = message.to_lowercase();
        self.catalog.products().iter().find(|p| {
            message_lower.contains(&p.name.to_lowercase())
                || message_lower.contains(&p.category.to_lowercase())
                || message_lower.contains(&p.brand.to_lowercase())
        })
    }

    /// Best product for `message`.
    ///
    /// Falls back to the first product of the inferred category when no
    /// field appears verbatim in the message.
    pub async fn find_best_match(
        &self,
        message: &str,
        inference: &dyn CategoryInference,
    ) -> Option<Product> {
        if let Some(product) = self.substring_match(message) {
            debug!("Substring match: {}", product.name);
            return Some(product.clone());
        }

        let category = inference.infer_category(message).await;
        let found = self.catalog.first_in_category(&category).cloned();
        if let Some(product) = &found {
            debug!("Matched `{}` through inferred category {category}", product.name);
        }
        found
    }

    /// Up to [`MAX_ALTERNATIVES`] distinct products picked at random.
    #[must_use]
    pub fn suggest_alternatives(&self) -> Vec<Product> {
        self.suggest_alternatives_with(&mut rand::thread_rng())
    }

    /// Same as [`Self::suggest_alternatives`] with a caller-supplied RNG.
    pub fn suggest_alternatives_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Product> {
        self.catalog
            .products()
            .choose_multiple(rng, MAX_ALTERNATIVES)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{product, red_mug, sample_catalog};
    use crate::llm::LlmFuture;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedCategory {
        answer: &'static str,
        calls: AtomicUsize,
    }

    impl FixedCategory {
        fn new(answer: &'static str) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CategoryInference for FixedCategory {
        fn infer_category<'a>(&'a self, _message: &'a str) -> LlmFuture<'a, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { self.answer.to_string() })
        }
    }

    fn matcher(catalog: Catalog) -> CatalogMatcher {
        CatalogMatcher::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_red_mug_scenario() {
        let matcher = matcher(Catalog::from_products(vec![red_mug()]).unwrap());
        let inference = FixedCategory::new("Unknown");

        let found = matcher
            .find_best_match("I want a red mug under 20 dollars", &inference)
            .await;
        assert_eq!(found, Some(red_mug()));
        assert_eq!(inference.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_substring_takes_catalog_order() {
        let matcher = matcher(sample_catalog());
        // "shoes" hits the first Shoes entry before the Nike brand of a later one.
        let found = matcher
            .find_best_match("any shoes from nike?", &FixedCategory::new("Home"))
            .await
            .unwrap();
        assert_eq!(found.name, "Trail Runner");

        let by_brand = matcher.substring_match("something by Sony").unwrap();
        assert_eq!(by_brand.name, "Sound Pods");
    }

    #[tokio::test]
    async fn test_inferred_category_fallback() {
        let matcher = matcher(sample_catalog());
        let inference = FixedCategory::new("Home");
        let found = matcher
            .find_best_match("something to light my study", &inference)
            .await
            .unwrap();
        assert_eq!(found.name, "Desk Lamp");
        assert_eq!(inference.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_match_returns_none() {
        let matcher = matcher(sample_catalog());
        assert!(
            matcher
                .find_best_match("a gift for grandma", &FixedCategory::new("Unknown"))
                .await
                .is_none()
        );
        // Category fallback is exact, not case-insensitive.
        assert!(
            matcher
                .find_best_match("a gift for grandma", &FixedCategory::new("home"))
                .await
                .is_none()
        );
    }

    #[test]
    fn test_alternatives_are_distinct_and_capped() {
        let sampler = matcher(sample_catalog());
        let mut rng = StdRng::seed_from_u64(7);
        let picks = sampler.suggest_alternatives_with(&mut rng);
        assert_eq!(picks.len(), MAX_ALTERNATIVES);
        for (i, a) in picks.iter().enumerate() {
            assert!(picks[i + 1..].iter().all(|b| b.name != a.name));
        }

        let single = Catalog::from_products(vec![product("Solo", "Misc", "One", 1, "grey")]);
        assert_eq!(matcher(single.unwrap()).suggest_alternatives().len(), 1);
        assert!(matcher(Catalog::default()).suggest_alternatives().is_empty());
    }
}
