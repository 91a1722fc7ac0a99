//! The game the learner plays against
//!
//! [`Environment`] is the seam between the learner and a concrete Wordle
//! implementation. [`SimulatedEnvironment`] plays a local game drawn from a
//! [`WordPool`]; a browser driver would implement the same trait.

use crate::core::{Feedback, Word};
use crate::wordlists::WordPool;
use anyhow::{Result, bail};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Arc;

/// A Wordle game the learner can submit words to
pub trait Environment {
    /// Begin a fresh game
    ///
    /// # Errors
    /// Returns an error if the game cannot be (re)started.
    fn start_game(&mut self) -> Result<()>;

    /// Submit a word; `Ok(false)` means the game rejected it as not a word
    ///
    /// # Errors
    /// Returns an error if the submission could not be made at all.
    fn submit(&mut self, word: &Word) -> Result<bool>;

    /// Feedback for the `attempt`-th accepted word (1-based)
    ///
    /// `None` means the feedback could not be read.
    fn read_feedback(&mut self, attempt: usize) -> Option<Feedback>;

    /// Answer shown after a lost game, if the game shows one
    fn reveal_answer(&mut self) -> Option<Word> {
        None
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn start_game(&mut self) -> Result<()> {
        (**self).start_game()
    }

    fn submit(&mut self, word: &Word) -> Result<bool> {
        (**self).submit(word)
    }

    fn read_feedback(&mut self, attempt: usize) -> Option<Feedback> {
        (**self).read_feedback(attempt)
    }

    fn reveal_answer(&mut self) -> Option<Word> {
        (**self).reveal_answer()
    }
}

/// Local Wordle game with a hidden answer drawn from a word pool
#[derive(Debug)]
pub struct SimulatedEnvironment {
    pool: Arc<WordPool>,
    rng: StdRng,
    answer: Option<Word>,
    board: Vec<Feedback>,
}

impl SimulatedEnvironment {
    #[must_use]
    pub fn new(pool: Arc<WordPool>, rng: StdRng) -> Self {
        Self {
            pool,
            rng,
            answer: None,
            board: Vec::new(),
        }
    }

    /// Start a game with a known answer
    pub fn start_with_answer(&mut self, answer: Word) {
        debug!("Simulated game started");
        self.answer = Some(answer);
        self.board.clear();
    }

    /// Hidden answer of the current game
    #[must_use]
    pub fn answer(&self) -> Option<&Word> {
        self.answer.as_ref()
    }
}

impl Environment for SimulatedEnvironment {
    fn start_game(&mut self) -> Result<()> {
        let Some(answer) = self.pool.answers().choose(&mut self.rng).cloned() else {
            bail!("no answers to draw from");
        };
        self.start_with_answer(answer);
        Ok(())
    }

    fn submit(&mut self, word: &Word) -> Result<bool> {
        let Some(answer) = &self.answer else {
            bail!("no game in progress");
        };
        if !self.pool.accepts(word) {
            return Ok(false);
        }
        self.board.push(Feedback::calculate(word, answer));
        Ok(true)
    }

    fn read_feedback(&mut self, attempt: usize) -> Option<Feedback> {
        attempt
            .checked_sub(1)
            .and_then(|row| self.board.get(row))
            .copied()
    }

    fn reveal_answer(&mut self) -> Option<Word> {
        self.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;
    use rand::SeedableRng;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn environment() -> SimulatedEnvironment {
        let pool = WordPool::new(
            words_from_slice(&["crane", "slate", "house"]),
            words_from_slice(&["slate"]),
        )
        .unwrap();
        SimulatedEnvironment::new(Arc::new(pool), StdRng::seed_from_u64(1))
    }

    #[test]
    fn submit_before_start_errors() {
        let mut env = environment();
        assert!(env.submit(&word("crane")).is_err());
    }

    #[test]
    fn unknown_words_are_rejected_without_a_row() {
        let mut env = environment();
        env.start_game().unwrap();

        assert!(!env.submit(&word("xylyl")).unwrap());
        assert!(env.read_feedback(1).is_none());
    }

    #[test]
    fn accepted_words_produce_feedback_rows() {
        let mut env = environment();
        env.start_game().unwrap();
        assert_eq!(env.answer(), Some(&word("slate")));

        assert!(env.submit(&word("crane")).unwrap());
        assert!(env.submit(&word("slate")).unwrap());

        assert_eq!(env.read_feedback(1).unwrap().to_pattern(), "--G-G");
        assert!(env.read_feedback(2).unwrap().is_win());
        assert!(env.read_feedback(0).is_none());
        assert!(env.read_feedback(3).is_none());
        assert_eq!(env.reveal_answer(), Some(word("slate")));
    }

    #[test]
    fn restarting_clears_the_board() {
        let mut env = environment();
        env.start_game().unwrap();
        env.submit(&word("crane")).unwrap();

        env.start_with_answer(word("house"));
        assert!(env.read_feedback(1).is_none());
        env.submit(&word("crane")).unwrap();
        assert_eq!(env.read_feedback(1).unwrap().to_pattern(), "----G");
    }
}
