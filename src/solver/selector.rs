//! Guess selection
//!
//! Chooses between exploration (growing vocabulary coverage) and exploitation
//! (best-scoring word that satisfies the current constraints).

use super::constraints::ConstraintSet;
use crate::core::Word;
use crate::vocabulary::Vocabulary;
use rand::Rng;
use std::fmt;

/// Default vocabulary size below which every guess explores
pub const DEFAULT_EXPLORATION_THRESHOLD: usize = 50;

/// How a guess was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessKind {
    /// Policy chose exploration (first attempt or small vocabulary)
    Exploration,
    /// Highest-scoring constraint-satisfying word
    Exploitation,
    /// Exploitation found no candidates and explored instead
    Fallback,
}

impl fmt::Display for GuessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exploration => write!(f, "exploring"),
            Self::Exploitation => write!(f, "smart guess"),
            Self::Fallback => write!(f, "no candidates, exploring"),
        }
    }
}

/// A selected guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub word: Word,
    pub kind: GuessKind,
    /// Number of constraint-satisfying words considered (0 when exploring)
    pub candidates: usize,
}

/// Picks the next word to submit
#[derive(Debug, Clone, Copy)]
pub struct GuessSelector {
    exploration_threshold: usize,
}

impl Default for GuessSelector {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORATION_THRESHOLD)
    }
}

impl GuessSelector {
    /// Create a selector that explores while the vocabulary has fewer than
    /// `exploration_threshold` words
    #[must_use]
    pub const fn new(exploration_threshold: usize) -> Self {
        Self {
            exploration_threshold,
        }
    }

    #[must_use]
    pub const fn exploration_threshold(&self) -> usize {
        self.exploration_threshold
    }

    /// Exploration policy for `attempt` (1-based)
    #[must_use]
    pub fn should_explore(&self, vocabulary: &Vocabulary, attempt: usize) -> bool {
        attempt <= 1 || vocabulary.len() < self.exploration_threshold
    }

    /// Select the next guess
    ///
    /// Exploration marks the returned word as used in the vocabulary, which is
    /// why the vocabulary is borrowed mutably.
    pub fn select<R: Rng + ?Sized>(
        &self,
        vocabulary: &mut Vocabulary,
        constraints: &ConstraintSet,
        attempt: usize,
        rng: &mut R,
    ) -> Guess {
        self.select_excluding(vocabulary, constraints, attempt, &[], rng)
    }

    /// Select the next guess, skipping words the game already refused
    ///
    /// A refused word can still be known valid, so it stays in the
    /// vocabulary and is only left out here.
    pub fn select_excluding<R: Rng + ?Sized>(
        &self,
        vocabulary: &mut Vocabulary,
        constraints: &ConstraintSet,
        attempt: usize,
        refused: &[Word],
        rng: &mut R,
    ) -> Guess {
        if self.should_explore(vocabulary, attempt) {
            return Guess {
                word: vocabulary.pick_exploration_word_except(refused, rng),
                kind: GuessKind::Exploration,
                candidates: 0,
            };
        }

        let best = {
            let pool: Vec<&Word> = candidates(vocabulary, constraints)
                .into_iter()
                .filter(|word| !refused.contains(*word))
                .collect();
            best_candidate(vocabulary, &pool).map(|word| (word.clone(), pool.len()))
        };
        match best {
            Some((word, count)) => Guess {
                word,
                kind: GuessKind::Exploitation,
                candidates: count,
            },
            None => Guess {
                word: vocabulary.pick_exploration_word_except(refused, rng),
                kind: GuessKind::Fallback,
                candidates: 0,
            },
        }
    }
}

/// Valid words satisfying `constraints`, in vocabulary order
#[must_use]
pub fn candidates<'a>(vocabulary: &'a Vocabulary, constraints: &ConstraintSet) -> Vec<&'a Word> {
    vocabulary
        .valid_words()
        .iter()
        .filter(|word| constraints.matches(word))
        .collect()
}

/// Highest-scoring candidate; the first one wins ties
#[must_use]
pub fn best_candidate<'a>(vocabulary: &Vocabulary, candidates: &[&'a Word]) -> Option<&'a Word> {
    let mut best: Option<(&'a Word, f64)> = None;
    for &word in candidates {
        let score = vocabulary.score_candidate(word);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((word, score)),
        }
    }
    best.map(|(word, _)| word)
}
