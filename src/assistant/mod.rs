//! Turn orchestration: classify, extract preferences, match, reply, recommend.

pub mod engine;
pub mod hints;

pub use engine::{APOLOGY, ShoppingAssistant, TurnOutcome};
pub use hints::derive_hints;
