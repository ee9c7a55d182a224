//! Rolling conversation history

pub mod history;

pub use history::{Conversation, HistoryKey, HistoryScope, HistoryStore, MAX_PAIRS};
