//! Reading word lists for the simulated game
//!
//! List files hold one word per line. Blank lines and `#` comments are
//! ignored; malformed entries and repeats are skipped with a log line so a
//! hand-edited list never silently shrinks.

use crate::core::Word;
use anyhow::{Context, Result};
use log::{debug, warn};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Load a word list file
///
/// # Errors
///
/// Returns an error if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use wordle_learner::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/dictionary.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let words = parse_word_list(&content, &path.display().to_string());
    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Parse list text, keeping the first occurrence of each word
///
/// `source` names the list in log messages.
#[must_use]
pub fn parse_word_list(content: &str, source: &str) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    let mut words = Vec::new();
    let mut repeats = 0;

    for (number, line) in content.lines().enumerate() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        match Word::new(entry) {
            Ok(word) => {
                if seen.insert(word.clone()) {
                    words.push(word);
                } else {
                    repeats += 1;
                }
            }
            Err(e) => warn!("{source}:{}: skipping '{entry}': {e}", number + 1),
        }
    }

    if repeats > 0 {
        debug!("{source}: skipped {repeats} repeated words");
    }
    words
}

/// Words from an embedded list
///
/// # Examples
/// ```
/// use wordle_learner::wordlists::loader::words_from_slice;
/// use wordle_learner::wordlists::ANSWERS;
///
/// let words = words_from_slice(ANSWERS);
/// assert_eq!(words.len(), ANSWERS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice
        .iter()
        .filter_map(|&entry| {
            Word::new(entry)
                .map_err(|e| warn!("Skipping built-in word '{entry}': {e}"))
                .ok()
        })
        .collect()
}
