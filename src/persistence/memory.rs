//! In-memory repository

use super::{PersistenceError, Repository};
use crate::game::{GameRecord, HistorySnapshot, Statistics};
use crate::vocabulary::VocabularySnapshot;

/// Repository that keeps everything in memory for the life of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    vocabulary: Option<VocabularySnapshot>,
    history: Option<HistorySnapshot>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that starts out holding `snapshot`
    #[must_use]
    pub fn with_vocabulary(snapshot: VocabularySnapshot) -> Self {
        Self {
            vocabulary: Some(snapshot),
            history: None,
        }
    }
}

impl Repository for MemoryRepository {
    fn load_vocabulary(&self) -> Result<Option<VocabularySnapshot>, PersistenceError> {
        Ok(self.vocabulary.clone())
    }

    fn save_vocabulary(&mut self, snapshot: &VocabularySnapshot) -> Result<(), PersistenceError> {
        self.vocabulary = Some(snapshot.clone());
        Ok(())
    }

    fn load_history(&self) -> Result<Option<HistorySnapshot>, PersistenceError> {
        Ok(self.history.clone())
    }

    fn save_history(
        &mut self,
        games: &[GameRecord],
        statistics: &Statistics,
    ) -> Result<(), PersistenceError> {
        self.history = Some(HistorySnapshot {
            games: games.to_vec(),
            statistics: statistics.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let repository = MemoryRepository::new();
        assert!(repository.load_vocabulary().unwrap().is_none());
        assert!(repository.load_history().unwrap().is_none());
    }

    #[test]
    fn returns_what_was_saved() {
        let mut repository = MemoryRepository::new();
        let snapshot = VocabularySnapshot {
            total_learned: 0,
            ..VocabularySnapshot::default()
        };
        repository.save_vocabulary(&snapshot).unwrap();
        repository
            .save_history(&[GameRecord::new(1, 64)], &Statistics::default())
            .unwrap();

        assert_eq!(repository.load_vocabulary().unwrap(), Some(snapshot));
        let history = repository.load_history().unwrap().unwrap();
        assert_eq!(history.games.len(), 1);
        assert_eq!(history.games[0].game_number, 1);
    }
}
