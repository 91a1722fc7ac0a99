//! Game records and session statistics
//!
//! Plain serializable data; this is what the dashboard reads and what gets
//! persisted between sessions.

use crate::core::{Feedback, Word};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt: usize,
    pub word: Word,
    /// Compact "GY-G-" pattern; `None` when the feedback could not be read
    pub feedback: Option<String>,
}

impl AttemptRecord {
    #[must_use]
    pub fn new(attempt: usize, word: Word, feedback: Option<&Feedback>) -> Self {
        Self {
            attempt,
            word,
            feedback: feedback.map(Feedback::to_pattern),
        }
    }

    /// Feedback rebuilt from the stored pattern
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
            .as_deref()
            .and_then(|pattern| Feedback::parse(&self.word, pattern).ok())
    }
}

/// Everything that happened in one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_number: usize,
    /// Unix timestamp (seconds)
    pub started_at: u64,
    pub attempts: Vec<AttemptRecord>,
    /// Submissions the game refused, in order
    #[serde(default)]
    pub rejected: Vec<Word>,
    pub won: bool,
    /// Known once the game is won, or when a lost game reveals it
    pub target_word: Option<Word>,
    /// Vocabulary size when the game started
    pub vocabulary_size: usize,
}

impl GameRecord {
    #[must_use]
    pub fn new(game_number: usize, vocabulary_size: usize) -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());

        Self {
            game_number,
            started_at,
            attempts: Vec::new(),
            rejected: Vec::new(),
            won: false,
            target_word: None,
            vocabulary_size,
        }
    }
}

/// Vocabulary size after a game, for the learning curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPoint {
    pub game: usize,
    pub vocabulary: usize,
    pub won: bool,
}

/// Running totals across every game played
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub games_lost: usize,
    /// Accepted attempts across all games
    pub total_attempts: usize,
    pub words_learned: usize,
    pub learning_curve: Vec<LearningPoint>,
}

impl Statistics {
    /// Fold a finished game into the totals
    pub fn record_game(&mut self, game: &GameRecord, vocabulary_size: usize) {
        self.total_games += 1;
        if game.won {
            self.games_won += 1;
        } else {
            self.games_lost += 1;
        }
        self.total_attempts += game.attempts.len();
        self.words_learned = vocabulary_size;
        self.learning_curve.push(LearningPoint {
            game: self.total_games,
            vocabulary: vocabulary_size,
            won: game.won,
        });
    }

    /// Percentage of games won
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.games_won as f64 / self.total_games as f64 * 100.0
        }
    }

    /// Accepted attempts per won game
    #[must_use]
    pub fn attempts_per_win(&self) -> f64 {
        if self.games_won == 0 {
            0.0
        } else {
            self.total_attempts as f64 / self.games_won as f64
        }
    }

    /// `(game number, vocabulary size)` series
    #[must_use]
    pub fn vocabulary_series(&self) -> Vec<(usize, usize)> {
        self.learning_curve
            .iter()
            .map(|point| (point.game, point.vocabulary))
            .collect()
    }
}

/// Persisted form of the game history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub games: Vec<GameRecord>,
    pub statistics: Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn finished_game(number: usize, won: bool, attempts: usize) -> GameRecord {
        let mut game = GameRecord::new(number, 64);
        for attempt in 1..=attempts {
            game.attempts
                .push(AttemptRecord::new(attempt, word("crane"), None));
        }
        game.won = won;
        game
    }

    #[test]
    fn attempt_record_round_trips_feedback() {
        let guess = word("crane");
        let feedback = Feedback::calculate(&guess, &word("slate"));
        let record = AttemptRecord::new(1, guess, Some(&feedback));

        assert_eq!(record.feedback.as_deref(), Some("--G-G"));
        assert_eq!(record.feedback(), Some(feedback));
    }

    #[test]
    fn missing_feedback_is_kept_as_none() {
        let record = AttemptRecord::new(2, word("crane"), None);
        assert!(record.feedback().is_none());
    }

    #[test]
    fn statistics_tally_wins_and_losses() {
        let mut stats = Statistics::default();
        stats.record_game(&finished_game(1, true, 3), 65);
        stats.record_game(&finished_game(2, false, 6), 70);
        stats.record_game(&finished_game(3, true, 4), 71);

        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.games_lost, 1);
        assert_eq!(stats.total_attempts, 13);
        assert_eq!(stats.words_learned, 71);
        assert!((stats.win_rate() - 200.0 / 3.0).abs() < 1e-9);
        assert!((stats.attempts_per_win() - 6.5).abs() < 1e-9);
        assert_eq!(stats.vocabulary_series(), vec![(1, 65), (2, 70), (3, 71)]);
    }

    #[test]
    fn empty_statistics_have_zero_rates() {
        let stats = Statistics::default();
        assert!(stats.win_rate().abs() < f64::EPSILON);
        assert!(stats.attempts_per_win().abs() < f64::EPSILON);
    }

    #[test]
    fn game_record_serializes_words_as_text() {
        let mut game = finished_game(1, true, 1);
        game.target_word = Some(word("crane"));
        let json = serde_json::to_string(&game).unwrap();
        assert!(json.contains("\"target_word\":\"crane\""));

        let parsed: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, game);
    }
}
