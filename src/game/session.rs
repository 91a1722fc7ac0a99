//! Learning session
//!
//! Owns the vocabulary, the environment and the storage, and plays games one
//! submission at a time so a caller (CLI loop or dashboard) stays in control
//! of pacing and can stop between any two submissions.

use super::environment::Environment;
use super::play::{Game, GameStatus, StepOutcome};
use super::record::{AttemptRecord, GameRecord, Statistics};
use crate::config::SessionConfig;
use crate::core::Word;
use crate::persistence::Repository;
use crate::solver::{Guess, GuessSelector};
use crate::vocabulary::Vocabulary;
use anyhow::{Context, Result, bail};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of one [`Session::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub game_number: usize,
    pub outcome: StepOutcome,
    /// Status of the game after this submission
    pub status: GameStatus,
}

/// Read-only view of a session for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Current game, or the last one played; 0 before any game starts
    pub game_number: usize,
    pub status: Option<GameStatus>,
    pub attempts: Vec<AttemptRecord>,
    pub rejections: usize,
    pub last_guess: Option<Guess>,
    pub max_attempts: usize,
    pub vocabulary_size: usize,
    pub invalid_words: usize,
    pub games_played: usize,
    pub games_won: usize,
    pub games_lost: usize,
    pub win_rate: f64,
    pub attempts_per_win: f64,
    pub top_letters: Vec<(char, u32)>,
    /// `(game number, vocabulary size)` after each game
    pub vocabulary_series: Vec<(usize, usize)>,
    /// Most recently learned words, newest first
    pub recent_words: Vec<Word>,
}

/// Plays games and learns from every submission
pub struct Session<E> {
    config: SessionConfig,
    vocabulary: Vocabulary,
    selector: GuessSelector,
    environment: E,
    repository: Box<dyn Repository>,
    statistics: Statistics,
    history: Vec<GameRecord>,
    game: Option<Game>,
    last_guess: Option<Guess>,
    rng: StdRng,
    stop: Arc<AtomicBool>,
}

impl<E: Environment> Session<E> {
    /// Open a session, restoring whatever `repository` holds
    ///
    /// Storage that cannot be read is logged and replaced by the starter
    /// vocabulary and an empty history.
    pub fn open(config: SessionConfig, environment: E, repository: Box<dyn Repository>) -> Self {
        let vocabulary = match repository.load_vocabulary() {
            Ok(Some(snapshot)) => {
                let vocabulary = Vocabulary::from_snapshot(snapshot);
                info!(
                    "Loaded {} words (including {} starters)",
                    vocabulary.len(),
                    vocabulary.starters().len()
                );
                vocabulary
            }
            Ok(None) => {
                info!("No previous learned words, using starter vocabulary");
                Vocabulary::new()
            }
            Err(e) => {
                warn!("{e}; resetting to starter vocabulary");
                Vocabulary::new()
            }
        };

        let mut session = Self::with_vocabulary(config, vocabulary, environment, repository);
        match session.repository.load_history() {
            Ok(Some(history)) => {
                info!("Loaded {} previous games", history.games.len());
                session.history = history.games;
                session.statistics = history.statistics;
            }
            Ok(None) => {}
            Err(e) => warn!("{e}; starting with empty history"),
        }
        session
    }

    /// Session starting from `vocabulary` and no history
    pub fn with_vocabulary(
        config: SessionConfig,
        mut vocabulary: Vocabulary,
        environment: E,
        repository: Box<dyn Repository>,
    ) -> Self {
        vocabulary.set_exploration_reset(config.exploration_reset);
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Self {
            selector: GuessSelector::new(config.exploration_threshold),
            config,
            vocabulary,
            environment,
            repository,
            statistics: Statistics::default(),
            history: Vec::new(),
            game: None,
            last_guess: None,
            rng,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make one submission, starting a new game first if needed
    ///
    /// A game that finishes with this submission is recorded and saved.
    ///
    /// # Errors
    /// Returns an error if the environment fails or feedback contradicts
    /// itself.
    pub fn step(&mut self) -> Result<StepReport> {
        if self.game.as_ref().is_none_or(Game::is_finished) {
            self.start_game()?;
        }
        let Some(game) = self.game.as_mut() else {
            bail!("no game in progress");
        };

        let outcome = game.advance(
            &mut self.vocabulary,
            &self.selector,
            &mut self.environment,
            &mut self.rng,
            &self.config,
        )?;
        let game_number = game.record().game_number;
        let status = game.status();
        let finished = game.is_finished().then(|| game.record().clone());

        if let StepOutcome::Accepted { guess, .. } = &outcome {
            self.last_guess = Some(guess.clone());
        }
        if let Some(record) = finished {
            self.finish_game(record);
        }

        Ok(StepReport {
            game_number,
            outcome,
            status,
        })
    }

    fn start_game(&mut self) -> Result<()> {
        self.environment
            .start_game()
            .context("starting a new game")?;
        let game_number = self.statistics.total_games + 1;
        info!(
            "Starting game {game_number} (vocabulary: {} words)",
            self.vocabulary.len()
        );
        self.game = Some(Game::new(game_number, self.vocabulary.len()));
        self.last_guess = None;
        Ok(())
    }

    fn finish_game(&mut self, record: GameRecord) {
        self.statistics.record_game(&record, self.vocabulary.len());
        info!(
            "Game {} {} | vocabulary: {} words | win rate: {:.1}%",
            record.game_number,
            if record.won { "won" } else { "lost" },
            self.vocabulary.len(),
            self.statistics.win_rate()
        );
        self.history.push(record);
        self.save();
    }

    /// Play until the current (or a new) game ends
    ///
    /// Returns `None` if the session was stopped first; the unfinished game
    /// is not recorded.
    ///
    /// # Errors
    /// Propagates errors from [`Session::step`].
    pub fn play_game(&mut self) -> Result<Option<GameRecord>> {
        loop {
            if self.is_stopped() {
                if let Some(game) = self.game.as_ref().filter(|game| !game.is_finished()) {
                    info!(
                        "Stopped during game {}, not recording it",
                        game.record().game_number
                    );
                }
                return Ok(None);
            }
            if self.step()?.status != GameStatus::InProgress {
                return Ok(self.history.last().cloned());
            }
        }
    }

    /// Play up to `count` games, calling `on_game` after each
    ///
    /// Returns the number of games completed.
    ///
    /// # Errors
    /// Propagates errors from [`Session::step`].
    pub fn play_games<F: FnMut(&GameRecord)>(
        &mut self,
        count: usize,
        mut on_game: F,
    ) -> Result<usize> {
        let mut played = 0;
        while played < count {
            let Some(record) = self.play_game()? else {
                break;
            };
            on_game(&record);
            played += 1;
        }
        Ok(played)
    }

    /// Write vocabulary and history; failures are logged, not returned
    pub fn save(&mut self) {
        if let Err(e) = self.repository.save_vocabulary(&self.vocabulary.snapshot()) {
            warn!("Could not save vocabulary: {e}");
        }
        if let Err(e) = self
            .repository
            .save_history(&self.history, &self.statistics)
        {
            warn!("Could not save game history: {e}");
        }
    }

    /// Ask the session to stop before its next submission
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Flag shared with other threads; setting it stops the session
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Stop and persist
    pub fn close(&mut self) {
        self.stop();
        self.save();
        info!(
            "Session closed: {} games, {} words known",
            self.statistics.total_games,
            self.vocabulary.len()
        );
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let (game_number, status, attempts, rejections) = match &self.game {
            Some(game) => (
                game.record().game_number,
                Some(game.status()),
                game.record().attempts.clone(),
                game.rejections(),
            ),
            None => (0, None, Vec::new(), 0),
        };

        SessionSnapshot {
            game_number,
            status,
            attempts,
            rejections,
            last_guess: self.last_guess.clone(),
            max_attempts: self.config.max_attempts,
            vocabulary_size: self.vocabulary.len(),
            invalid_words: self.vocabulary.invalid_count(),
            games_played: self.statistics.total_games,
            games_won: self.statistics.games_won,
            games_lost: self.statistics.games_lost,
            win_rate: self.statistics.win_rate(),
            attempts_per_win: self.statistics.attempts_per_win(),
            top_letters: self.vocabulary.top_letters(5),
            vocabulary_series: self.statistics.vocabulary_series(),
            recent_words: self.vocabulary.valid_words().iter().rev().take(10).cloned().collect(),
        }
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[must_use]
    pub const fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    #[must_use]
    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.environment
    }

    #[must_use]
    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }
}
