//! Per-user shopping preferences.

use serde::{Deserialize, Serialize};

/// Default budget ceiling when the shopper has not mentioned one.
pub const DEFAULT_BUDGET_CEILING: u64 = 1_000_000;

/// Inclusive `[low, high]` price range with `low <= high`.
///
/// Serialized as a two-element array; any input pair is reordered so the
/// invariant always holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u64, u64)")]
pub struct BudgetRange(u64, u64);

impl BudgetRange {
    /// Build a range, swapping the bounds if given out of order.
    #[must_use]
    pub const fn new(low: u64, high: u64) -> Self {
        if low <= high { Self(low, high) } else { Self(high, low) }
    }

    /// Range `[0, ceiling]`.
    #[must_use]
    pub const fn up_to(ceiling: u64) -> Self {
        Self(0, ceiling)
    }

    /// Lower bound.
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.0
    }

    /// Upper bound.
    #[must_use]
    pub const fn high(&self) -> u64 {
        self.1
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self::up_to(DEFAULT_BUDGET_CEILING)
    }
}

impl From<(u64, u64)> for BudgetRange {
    fn from((low, high): (u64, u64)) -> Self {
        Self::new(low, high)
    }
}

/// Accumulated preferences inferred from a shopper's messages.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Lowercased category, once one has been inferred.
    pub preferred_category: Option<String>,
    /// Price range to filter on.
    pub budget_range: BudgetRange,
    /// Lowercased brands; grows only, no duplicates.
    pub brand_preference: Vec<String>,
    /// Lowercased color, once one has been inferred.
    pub color: Option<String>,
}

impl UserProfile {
    /// Create an empty profile with the default budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a brand unless it is already present (case-insensitive).
    ///
    /// Returns `true` if the brand was added.
    pub fn add_brand(&mut self, brand: &str) -> bool {
        let brand = brand.to_lowercase();
        if self.brand_preference.iter().any(|b| b.to_lowercase() == brand) {
            return false;
        }
        self.brand_preference.push(brand);
        true
    }

    /// One-line summary for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "category={} budget=[{}, {}] brands=[{}] color={}",
            self.preferred_category.as_deref().unwrap_or("-"),
            self.budget_range.low(),
            self.budget_range.high(),
            self.brand_preference.join(", "),
            self.color.as_deref().unwrap_or("-"),
        )
    }
}
