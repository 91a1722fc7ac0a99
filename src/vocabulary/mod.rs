//! Vocabulary learned from the game
//!
//! The store of accepted and rejected words, shared by every game of a session.

mod starter;
mod store;

pub use starter::STARTER_WORDS;
pub use store::{DEFAULT_EXPLORATION_RESET, Vocabulary, VocabularyError, VocabularySnapshot};
