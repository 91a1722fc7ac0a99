//! Wordle Learner
//!
//! A Wordle player that starts from a few dozen seed words and learns its
//! vocabulary from the game itself: every accepted guess becomes a known
//! word, every rejected one a known non-word, and letter statistics over the
//! known words rank the next guess.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_learner::core::{Feedback, Word};
//! use wordle_learner::solver::{ConstraintSet, GuessSelector};
//! use wordle_learner::vocabulary::Vocabulary;
//!
//! let mut vocabulary = Vocabulary::new();
//! let answer = Word::new("stone").unwrap();
//! vocabulary.record_valid(&answer);
//!
//! // Feedback from a first guess narrows the candidates
//! let mut constraints = ConstraintSet::new();
//! let feedback = Feedback::calculate(&Word::new("slate").unwrap(), &answer);
//! constraints.absorb_feedback(&feedback).unwrap();
//!
//! let selector = GuessSelector::default();
//! let guess = selector.select(&mut vocabulary, &constraints, 2, &mut rand::rng());
//! assert!(constraints.matches(&guess.word) || guess.candidates == 0);
//! ```

// Core domain types
pub mod core;

// Learned vocabulary and letter statistics
pub mod vocabulary;

// Constraint tracking and guess selection
pub mod solver;

// Playing games against an environment
pub mod game;

// Saving progress between sessions
pub mod persistence;

// Session settings
pub mod config;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Live dashboard
pub mod interactive;
