//! Word lists for the simulated game
//!
//! The dictionary decides which submissions the simulated game accepts; the
//! answer list is what it draws hidden words from. Both are compiled into the
//! binary and can be replaced from files.

mod embedded;
pub mod loader;

pub use embedded::{ANSWERS, ANSWERS_COUNT, DICTIONARY, DICTIONARY_COUNT};

use crate::core::Word;
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use std::path::Path;

use loader::{load_from_file, words_from_slice};

/// Dictionary and answer list used by a simulated game
#[derive(Debug, Clone)]
pub struct WordPool {
    dictionary: FxHashSet<Word>,
    answers: Vec<Word>,
}

impl WordPool {
    /// Build a pool; answers are always accepted as guesses
    ///
    /// # Errors
    /// Returns an error if `answers` is empty.
    pub fn new(dictionary: Vec<Word>, answers: Vec<Word>) -> Result<Self> {
        if answers.is_empty() {
            bail!("answer list is empty");
        }
        let mut dictionary: FxHashSet<Word> = dictionary.into_iter().collect();
        dictionary.extend(answers.iter().cloned());
        Ok(Self {
            dictionary,
            answers,
        })
    }

    /// The lists compiled into the binary
    ///
    /// # Errors
    /// Only fails if the embedded answer list is empty.
    pub fn embedded() -> Result<Self> {
        Self::new(words_from_slice(DICTIONARY), words_from_slice(ANSWERS))
    }

    /// Embedded lists, each optionally replaced by a file
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or yields no answers.
    pub fn load(dictionary: Option<&Path>, answers: Option<&Path>) -> Result<Self> {
        let dictionary = match dictionary {
            Some(path) => load_from_file(path)
                .with_context(|| format!("reading dictionary {}", path.display()))?,
            None => words_from_slice(DICTIONARY),
        };
        let answers = match answers {
            Some(path) => load_from_file(path)
                .with_context(|| format!("reading answer list {}", path.display()))?,
            None => words_from_slice(ANSWERS),
        };
        Self::new(dictionary, answers)
    }

    #[must_use]
    pub fn accepts(&self, word: &Word) -> bool {
        self.dictionary.contains(word)
    }

    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    #[must_use]
    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }
}
