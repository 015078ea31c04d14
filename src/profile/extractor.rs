//! Preference extraction from raw shopper messages.
//!
//! Each field is resolved independently: an explicit hint wins when it is
//! part of the catalog vocabulary, otherwise the whole lowercased message is
//! fuzzy-matched against that vocabulary. Matching the full message (not its
//! tokens) means the fuzzy path mostly fires for short, single-word messages.

use regex::Regex;
use tracing::debug;

use super::user_profile::{BudgetRange, UserProfile};
use crate::catalog::Vocabulary;
use crate::matching::closest_match;

/// Minimum similarity for a category fuzzy match.
pub const CATEGORY_CUTOFF: f64 = 0.8;
/// Minimum similarity for a brand fuzzy match.
pub const BRAND_CUTOFF: f64 = 0.7;
/// Minimum similarity for a color fuzzy match.
pub const COLOR_CUTOFF: f64 = 0.7;

/// Externally inferred values that take precedence over fuzzy matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferenceHints {
    /// Category proposed by the classifier.
    pub category: Option<String>,
    /// Budget parsed from the message.
    pub budget: Option<BudgetRange>,
    /// Brand found verbatim in the message.
    pub brand: Option<String>,
    /// Color found verbatim in the message.
    pub color: Option<String>,
}

/// Updates profiles against a fixed catalog vocabulary.
#[derive(Clone, Debug)]
pub struct PreferenceExtractor {
    vocabulary: Vocabulary,
    digit_run: Regex,
}

impl PreferenceExtractor {
    /// Create an extractor over the given vocabulary.
    ///
    /// # Errors
    /// Returns an error if the digit pattern fails to compile.
    pub fn new(vocabulary: Vocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            vocabulary,
            digit_run: Regex::new(r"[0-9]+")?,
        })
    }

    /// Update `profile` in place from `message` and optional hints.
    pub fn update(&self, profile: &mut UserProfile, message: &str, hints: &PreferenceHints) {
        let message_lower = message.to_lowercase();

        if let Some(category) = self.resolve_category(&message_lower, hints.category.as_deref()) {
            profile.preferred_category = Some(category);
        }

        if let Some(budget) = hints.budget.or_else(|| self.budget_from_digits(&message_lower)) {
            profile.budget_range = budget;
        }

        if let Some(brand) = self.resolve_brand(&message_lower, hints.brand.as_deref()) {
            profile.add_brand(&brand);
        }

        if let Some(color) = self.resolve_color(&message_lower, hints.color.as_deref()) {
            profile.color = Some(color);
        }

        debug!("Updated user profile: {}", profile.summary());
    }

    /// `[0, max]` over every digit run in the message, if there is one.
    ///
    /// Runs too large for `u64` saturate.
    #[must_use]
    pub fn budget_from_digits(&self, message: &str) -> Option<BudgetRange> {
        self.digit_run
            .find_iter(message)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .max()
            .map(BudgetRange::up_to)
    }

    fn resolve_category(&self, message_lower: &str, hint: Option<&str>) -> Option<String> {
        match hint {
            Some(category) if self.vocabulary.has_category(category) => {
                Some(category.to_lowercase())
            }
            _ => closest_match(message_lower, self.vocabulary.categories(), CATEGORY_CUTOFF)
                .map(str::to_string),
        }
    }

    fn resolve_brand(&self, message_lower: &str, hint: Option<&str>) -> Option<String> {
        match hint {
            Some(brand) if self.vocabulary.has_brand(brand) => Some(brand.to_lowercase()),
            _ => closest_match(message_lower, self.vocabulary.brands(), BRAND_CUTOFF)
                .map(str::to_string),
        }
    }

    fn resolve_color(&self, message_lower: &str, hint: Option<&str>) -> Option<String> {
        match hint {
            Some(color) if self.vocabulary.has_color(color) => Some(color.to_lowercase()),
            _ => closest_match(message_lower, self.vocabulary.colors(), COLOR_CUTOFF)
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;

    fn extractor() -> PreferenceExtractor {
        PreferenceExtractor::new(sample_catalog().vocabulary().clone()).unwrap()
    }

    #[test]
    fn test_hints_take_precedence() {
        let mut profile = UserProfile::new();
        let hints = PreferenceHints {
            category: Some("Shoes".to_string()),
            budget: Some(BudgetRange::up_to(100)),
            brand: Some("Nike".to_string()),
            color: Some("Black".to_string()),
        };
        extractor().update(&mut profile, "looking for something for 250", &hints);

        assert_eq!(profile.preferred_category.as_deref(), Some("shoes"));
        assert_eq!(profile.budget_range, BudgetRange::up_to(100));
        assert_eq!(profile.brand_preference, vec!["nike".to_string()]);
        assert_eq!(profile.color.as_deref(), Some("black"));
    }

    #[test]
    fn test_unknown_hints_fall_back_to_fuzzy() {
        let mut profile = UserProfile::new();
        let hints = PreferenceHints {
            category: Some("Unknown".to_string()),
            brand: Some("Puma".to_string()),
            ..PreferenceHints::default()
        };
        extractor().update(&mut profile, "Shoe", &hints);

        // "shoe" vs "shoes" scores 8/9, above the category cutoff.
        assert_eq!(profile.preferred_category.as_deref(), Some("shoes"));
        assert!(profile.brand_preference.is_empty());
    }

    #[test]
    fn test_whole_message_fuzzy_match_misses_long_sentences() {
        let mut profile = UserProfile::new();
        extractor().update(
            &mut profile,
            "I would really like some black nike shoes please",
            &PreferenceHints::default(),
        );

        assert!(profile.preferred_category.is_none());
        assert!(profile.brand_preference.is_empty());
        assert!(profile.color.is_none());
    }

    #[test]
    fn test_single_word_messages_fuzzy_match() {
        let extractor = extractor();
        let mut profile = UserProfile::new();
        extractor.update(&mut profile, "Nikes", &PreferenceHints::default());
        extractor.update(&mut profile, "whites", &PreferenceHints::default());

        assert_eq!(profile.brand_preference, vec!["nike".to_string()]);
        assert_eq!(profile.color.as_deref(), Some("white"));
    }

    #[test]
    fn test_budget_from_digit_runs() {
        let mut profile = UserProfile::new();
        extractor().update(
            &mut profile,
            "between $40 and $120",
            &PreferenceHints::default(),
        );
        assert_eq!(profile.budget_range, BudgetRange::up_to(120));
    }

    #[test]
    fn test_budget_kept_without_digits() {
        let mut profile = UserProfile::new();
        profile.budget_range = BudgetRange::up_to(75);
        extractor().update(&mut profile, "any color is fine", &PreferenceHints::default());
        assert_eq!(profile.budget_range, BudgetRange::up_to(75));
    }

    #[test]
    fn test_budget_overflow_saturates() {
        let extractor = extractor();
        let budget = extractor
            .budget_from_digits("999999999999999999999999")
            .unwrap();
        assert_eq!(budget.high(), u64::MAX);
        assert!(extractor.budget_from_digits("no numbers here").is_none());
    }

    #[test]
    fn test_budget_invariant_holds_after_updates() {
        let extractor = extractor();
        let mut profile = UserProfile::new();
        let messages = ["under 30", "0", "between 500 and 20", "nothing"];
        for message in messages {
            extractor.update(&mut profile, message, &PreferenceHints::default());
            assert!(profile.budget_range.low() <= profile.budget_range.high());
        }
        let hints = PreferenceHints {
            budget: Some(BudgetRange::new(90, 10)),
            ..PreferenceHints::default()
        };
        extractor.update(&mut profile, "", &hints);
        assert!(profile.budget_range.low() <= profile.budget_range.high());
    }

    #[test]
    fn test_repeated_brand_is_kept_once() {
        let extractor = extractor();
        let mut profile = UserProfile::new();
        let hints = PreferenceHints {
            brand: Some("Adidas".to_string()),
            ..PreferenceHints::default()
        };
        for _ in 0..3 {
            extractor.update(&mut profile, "adidas again", &hints);
        }
        extractor.update(&mut profile, "adidas", &PreferenceHints::default());
        assert_eq!(profile.brand_preference, vec!["adidas".to_string()]);
    }
}
