//! Guess generation
//!
//! Constraint tracking within a game and selection of the next guess.

mod constraints;
mod selector;

pub use constraints::{ConstraintError, ConstraintSet};
pub use selector::{
    DEFAULT_EXPLORATION_THRESHOLD, Guess, GuessKind, GuessSelector, best_candidate, candidates,
};
