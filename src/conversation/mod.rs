//! Per-user transcripts.

pub mod history;
pub mod store;
pub mod turn;

pub use history::ConversationState;
pub use store::{ConversationStore, InMemoryConversationStore};
pub use turn::{ChatRole, ChatTurn};
