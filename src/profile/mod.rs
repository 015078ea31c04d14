//! Shopper profiles: the preference record, its extractor and its store.

pub mod extractor;
pub mod store;
pub mod user_profile;

pub use extractor::{
    BRAND_CUTOFF, CATEGORY_CUTOFF, COLOR_CUTOFF, PreferenceExtractor, PreferenceHints,
};
pub use store::{InMemoryProfileStore, ProfileStore, StoreFuture};
pub use user_profile::{BudgetRange, DEFAULT_BUDGET_CEILING, UserProfile};
