//! Core domain types for Wordle
//!
//! Pure value types shared by the vocabulary, the solver and the game loop.

mod feedback;
mod word;

pub use feedback::{Feedback, FeedbackError, LetterStatus, Tile};
pub use word::{ALPHABET_SIZE, WORD_LENGTH, Word, WordError, letter_index};
