//! Saving learned state between sessions
//!
//! The learner keeps working from memory when storage fails; callers log
//! these errors and carry on.

mod json;
mod memory;

pub use json::{GAME_HISTORY_FILE, JsonRepository, LEARNED_WORDS_FILE, STATISTICS_FILE};
pub use memory::MemoryRepository;

use crate::game::{GameRecord, HistorySnapshot, Statistics};
use crate::vocabulary::VocabularySnapshot;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for loading and saving learned state
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed data in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage for the vocabulary and game history
///
/// `Ok(None)` from a load means nothing has been saved yet.
pub trait Repository {
    /// # Errors
    /// Returns an error if stored data exists but cannot be read.
    fn load_vocabulary(&self) -> Result<Option<VocabularySnapshot>, PersistenceError>;

    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    fn save_vocabulary(&mut self, snapshot: &VocabularySnapshot) -> Result<(), PersistenceError>;

    /// # Errors
    /// Returns an error if stored data exists but cannot be read.
    fn load_history(&self) -> Result<Option<HistorySnapshot>, PersistenceError>;

    /// # Errors
    /// Returns an error if the history cannot be written.
    fn save_history(
        &mut self,
        games: &[GameRecord],
        statistics: &Statistics,
    ) -> Result<(), PersistenceError>;
}
