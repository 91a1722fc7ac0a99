//! A single game, advanced one submission at a time

use super::environment::Environment;
use super::record::{AttemptRecord, GameRecord};
use crate::config::SessionConfig;
use crate::core::{Feedback, Word};
use crate::solver::{ConstraintSet, Guess, GuessSelector};
use crate::vocabulary::Vocabulary;
use anyhow::{Context, Result, bail};
use log::{error, info, warn};
use rand::Rng;
use std::thread;
use std::time::Duration;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// What one submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game refused the word; no attempt was used
    Rejected { word: Word, rejections: usize },
    /// The word was accepted as attempt `attempt`
    Accepted {
        attempt: usize,
        guess: Guess,
        /// `None` when feedback could not be read
        feedback: Option<Feedback>,
        /// Word was added to the vocabulary by this submission
        learned: bool,
    },
}

/// State of one game in progress
#[derive(Debug, Clone)]
pub struct Game {
    record: GameRecord,
    constraints: ConstraintSet,
    rejections: usize,
    status: GameStatus,
}

impl Game {
    #[must_use]
    pub fn new(game_number: usize, vocabulary_size: usize) -> Self {
        Self {
            record: GameRecord::new(game_number, vocabulary_size),
            constraints: ConstraintSet::new(),
            rejections: 0,
            status: GameStatus::InProgress,
        }
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Accepted attempts so far; rejections do not count
    #[must_use]
    pub fn attempts_used(&self) -> usize {
        self.record.attempts.len()
    }

    #[must_use]
    pub const fn rejections(&self) -> usize {
        self.rejections
    }

    #[must_use]
    pub const fn record(&self) -> &GameRecord {
        &self.record
    }

    #[must_use]
    pub const fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    #[must_use]
    pub fn into_record(self) -> GameRecord {
        self.record
    }

    /// Choose a word, submit it and fold the result into the game
    ///
    /// A rejected word is recorded as invalid and does not use an attempt.
    /// It is not offered again in this game, even when it is known valid.
    /// An accepted word is recorded as valid; its feedback (if readable)
    /// tightens the constraints. The game ends on a win, after
    /// `max_attempts` accepted words, or after `max_rejections` refusals.
    ///
    /// # Errors
    /// Returns an error if the game is already over, the environment fails,
    /// or the feedback contradicts earlier feedback.
    pub fn advance<E, R>(
        &mut self,
        vocabulary: &mut Vocabulary,
        selector: &GuessSelector,
        environment: &mut E,
        rng: &mut R,
        config: &SessionConfig,
    ) -> Result<StepOutcome>
    where
        E: Environment + ?Sized,
        R: Rng + ?Sized,
    {
        if self.is_finished() {
            bail!("game {} is already over", self.record.game_number);
        }

        let attempt = self.attempts_used() + 1;
        let guess = selector.select_excluding(
            vocabulary,
            &self.constraints,
            attempt,
            &self.record.rejected,
            rng,
        );
        info!("Attempt {attempt}: {} ({})", guess.word, guess.kind);

        if !environment.submit(&guess.word)? {
            return Ok(self.reject(vocabulary, guess.word, config));
        }

        let learned = vocabulary.record_valid(&guess.word);
        if learned {
            info!("Learned new word: {}", guess.word);
        }

        let feedback = read_feedback_with_retry(environment, attempt, config.feedback_retry_delay);
        self.record
            .attempts
            .push(AttemptRecord::new(attempt, guess.word.clone(), feedback.as_ref()));

        match &feedback {
            Some(feedback) => {
                info!("Feedback: {}", feedback.to_emoji());
                self.constraints
                    .absorb_feedback(feedback)
                    .with_context(|| format!("absorbing feedback for '{}'", guess.word))?;

                if feedback.is_win() {
                    self.status = GameStatus::Won;
                    self.record.won = true;
                    self.record.target_word = Some(guess.word.clone());
                    info!("Won game {} in {attempt} attempts", self.record.game_number);
                }
            }
            None => error!("No feedback for attempt {attempt}, constraints unchanged"),
        }

        if self.status == GameStatus::InProgress && attempt >= config.max_attempts {
            self.lose(vocabulary, environment);
        }

        Ok(StepOutcome::Accepted {
            attempt,
            guess,
            feedback,
            learned,
        })
    }

    fn reject(
        &mut self,
        vocabulary: &mut Vocabulary,
        word: Word,
        config: &SessionConfig,
    ) -> StepOutcome {
        warn!("'{word}' rejected by the game");
        vocabulary.record_invalid(&word);
        self.record.rejected.push(word.clone());
        self.rejections += 1;

        if self.rejections >= config.max_rejections {
            warn!(
                "Abandoning game {} after {} rejected words",
                self.record.game_number, self.rejections
            );
            self.status = GameStatus::Lost;
        }

        StepOutcome::Rejected {
            word,
            rejections: self.rejections,
        }
    }

    fn lose<E: Environment + ?Sized>(&mut self, vocabulary: &mut Vocabulary, environment: &mut E) {
        self.status = GameStatus::Lost;
        match environment.reveal_answer() {
            Some(answer) => {
                info!("Lost game {}, answer was {answer}", self.record.game_number);
                if vocabulary.record_valid(&answer) {
                    info!("Learned new word: {answer}");
                }
                self.record.target_word = Some(answer);
            }
            None => info!("Lost game {}", self.record.game_number),
        }
    }
}

fn read_feedback_with_retry<E: Environment + ?Sized>(
    environment: &mut E,
    attempt: usize,
    delay: Duration,
) -> Option<Feedback> {
    environment.read_feedback(attempt).or_else(|| {
        warn!("Feedback for attempt {attempt} unreadable, retrying in {delay:?}");
        thread::sleep(delay);
        environment.read_feedback(attempt)
    })
}
