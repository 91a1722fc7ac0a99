//! Learn command
//!
//! Plays a batch of games in the terminal, learning from each one.

use crate::game::{Environment, Session};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Outcome of a learning run
#[derive(Debug, Clone, PartialEq)]
pub struct LearnSummary {
    pub games_requested: usize,
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    /// Accepted attempts per won game in this run
    pub attempts_per_win: f64,
    pub vocabulary_before: usize,
    pub vocabulary_after: usize,
    /// Win rate across every game the session has ever played
    pub lifetime_win_rate: f64,
    pub duration: Duration,
}

impl LearnSummary {
    #[must_use]
    pub fn words_learned(&self) -> usize {
        self.vocabulary_after.saturating_sub(self.vocabulary_before)
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64 * 100.0
        }
    }
}

/// Play `games` games, showing a progress bar when `show_progress` is set
///
/// The session is saved after every game and closed at the end.
///
/// # Errors
/// Propagates environment failures from the session.
pub fn run_learn<E: Environment>(
    session: &mut Session<E>,
    games: usize,
    show_progress: bool,
) -> Result<LearnSummary> {
    let vocabulary_before = session.vocabulary().len();
    let start = Instant::now();

    let pb = if show_progress {
        let pb = ProgressBar::new(games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")?
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut wins = 0;
    let mut won_attempts = 0;
    let played = session.play_games(games, |record| {
        if record.won {
            wins += 1;
            won_attempts += record.attempts.len();
        }
        pb.set_message(format!(
            "Game {}: {} | {wins} won",
            record.game_number,
            if record.won { "won" } else { "lost" },
        ));
        pb.inc(1);
    });
    pb.finish_with_message("Complete!");
    let played = played?;

    session.close();

    Ok(LearnSummary {
        games_requested: games,
        games_played: played,
        wins,
        losses: played - wins,
        attempts_per_win: if wins == 0 {
            0.0
        } else {
            won_attempts as f64 / wins as f64
        },
        vocabulary_before,
        vocabulary_after: session.vocabulary().len(),
        lifetime_win_rate: session.statistics().win_rate(),
        duration: start.elapsed(),
    })
}
