//! JSON files on disk

use super::{PersistenceError, Repository};
use crate::game::{GameRecord, HistorySnapshot, Statistics};
use crate::vocabulary::VocabularySnapshot;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const LEARNED_WORDS_FILE: &str = "learned_words.json";
pub const GAME_HISTORY_FILE: &str = "game_history.json";
pub const STATISTICS_FILE: &str = "statistics.json";

/// Repository writing pretty-printed JSON files into one directory
#[derive(Debug, Clone)]
pub struct JsonRepository {
    dir: PathBuf,
}

impl JsonRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and parse `file`; missing or blank files are `Ok(None)`
    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, PersistenceError> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PersistenceError::Io { path, source }),
        };
        if content.trim().is_empty() {
            debug!("{} is empty", path.display());
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Json { path, source })
    }

    /// Write `value` to `file`, replacing it only once fully written
    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), PersistenceError> {
        let path = self.dir.join(file);
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Json {
            path: path.clone(),
            source,
        })?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|source| PersistenceError::Io {
                path: path.clone(),
                source,
            })?;
        debug!("Saved {}", path.display());
        Ok(())
    }
}

impl Repository for JsonRepository {
    fn load_vocabulary(&self) -> Result<Option<VocabularySnapshot>, PersistenceError> {
        self.read(LEARNED_WORDS_FILE)
    }

    fn save_vocabulary(&mut self, snapshot: &VocabularySnapshot) -> Result<(), PersistenceError> {
        self.write(LEARNED_WORDS_FILE, snapshot)
    }

    fn load_history(&self) -> Result<Option<HistorySnapshot>, PersistenceError> {
        let games: Option<Vec<GameRecord>> = self.read(GAME_HISTORY_FILE)?;
        let statistics: Option<Statistics> = self.read(STATISTICS_FILE)?;
        if games.is_none() && statistics.is_none() {
            return Ok(None);
        }
        Ok(Some(HistorySnapshot {
            games: games.unwrap_or_default(),
            statistics: statistics.unwrap_or_default(),
        }))
    }

    fn save_history(
        &mut self,
        games: &[GameRecord],
        statistics: &Statistics,
    ) -> Result<(), PersistenceError> {
        self.write(GAME_HISTORY_FILE, games)?;
        self.write(STATISTICS_FILE, statistics)
    }
}
