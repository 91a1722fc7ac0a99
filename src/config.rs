//! Session configuration

use crate::solver::DEFAULT_EXPLORATION_THRESHOLD;
use crate::vocabulary::DEFAULT_EXPLORATION_RESET;
use std::path::PathBuf;
use std::time::Duration;

/// Accepted attempts allowed per game
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Rejected submissions tolerated in one game before it is abandoned
pub const DEFAULT_MAX_REJECTIONS: usize = 20;

/// Settings for a learning session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Accepted attempts per game
    pub max_attempts: usize,
    /// Vocabulary size below which every guess explores
    pub exploration_threshold: usize,
    /// Exploration used-set size above which it is cleared
    pub exploration_reset: usize,
    /// Rejected submissions tolerated in one game
    pub max_rejections: usize,
    /// Wait before re-reading feedback that was missing
    pub feedback_retry_delay: Duration,
    /// Directory for persisted vocabulary, history and logs
    pub data_dir: PathBuf,
    /// Seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            exploration_threshold: DEFAULT_EXPLORATION_THRESHOLD,
            exploration_reset: DEFAULT_EXPLORATION_RESET,
            max_rejections: DEFAULT_MAX_REJECTIONS,
            feedback_retry_delay: Duration::from_secs(2),
            data_dir: PathBuf::from("data"),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Directory log files are written to when the terminal is taken over
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
