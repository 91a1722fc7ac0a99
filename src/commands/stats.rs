//! Stats command
//!
//! Reports what previous sessions have saved.

use crate::game::{GameRecord, Statistics};
use crate::persistence::Repository;
use crate::vocabulary::Vocabulary;
use anyhow::{Context, Result};

/// Saved learning progress
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub statistics: Statistics,
    pub vocabulary_size: usize,
    pub starter_count: usize,
    pub invalid_words: usize,
    pub top_letters: Vec<(char, u32)>,
    /// Most recent games, newest first
    pub recent_games: Vec<GameRecord>,
}

/// Load the saved vocabulary and history from `repository`
///
/// # Errors
/// Returns an error if stored data exists but cannot be read.
pub fn load_stats(repository: &dyn Repository, recent: usize) -> Result<StatsReport> {
    let vocabulary = repository
        .load_vocabulary()
        .context("loading learned words")?
        .map_or_else(Vocabulary::new, Vocabulary::from_snapshot);
    let history = repository
        .load_history()
        .context("loading game history")?
        .unwrap_or_default();

    Ok(StatsReport {
        statistics: history.statistics,
        vocabulary_size: vocabulary.len(),
        starter_count: vocabulary.starters().len(),
        invalid_words: vocabulary.invalid_count(),
        top_letters: vocabulary.top_letters(10),
        recent_games: history.games.into_iter().rev().take(recent).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::persistence::MemoryRepository;
    use crate::vocabulary::{STARTER_WORDS, VocabularySnapshot};

    #[test]
    fn empty_repository_reports_starters() {
        let report = load_stats(&MemoryRepository::new(), 5).unwrap();

        assert_eq!(report.vocabulary_size, STARTER_WORDS.len());
        assert_eq!(report.starter_count, STARTER_WORDS.len());
        assert_eq!(report.statistics.total_games, 0);
        assert!(report.recent_games.is_empty());
        assert_eq!(report.top_letters.len(), 10);
    }

    #[test]
    fn recent_games_are_newest_first() {
        let mut repository = MemoryRepository::with_vocabulary(VocabularySnapshot {
            valid_words: vec![Word::new("pudgy").unwrap()],
            invalid_words: Vec::new(),
            total_learned: 1,
        });
        let games: Vec<GameRecord> = (1..=4).map(|n| GameRecord::new(n, 64)).collect();
        repository
            .save_history(&games, &Statistics::default())
            .unwrap();

        let report = load_stats(&repository, 2).unwrap();
        let numbers: Vec<usize> = report.recent_games.iter().map(|g| g.game_number).collect();
        assert_eq!(numbers, [4, 3]);
        assert_eq!(report.vocabulary_size, STARTER_WORDS.len() + 1);
    }
}
