//! Per-letter feedback for an accepted guess
//!
//! Feedback is an ordered sequence of `(letter, status)` tiles, one per
//! position of the submitted word:
//! - Correct = green (letter in the right position)
//! - Present = yellow (letter in the answer, wrong position)
//! - Absent = gray (letter not in the answer, or all copies accounted for)

use super::word::{ALPHABET_SIZE, WORD_LENGTH, Word, letter_index};
use std::fmt;
use thiserror::Error;

/// Status of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word (gray)
    Absent,
}

impl LetterStatus {
    /// Parse a pattern character
    ///
    /// Accepts 'G'/'g'/🟩 for green, 'Y'/'y'/🟨 for yellow and
    /// '-'/'_'/⬜/⬛ for gray.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' | '⬛' => Some(Self::Absent),
            _ => None,
        }
    }

    /// Compact pattern character used in persisted records
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// One position of feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub letter: u8,
    pub status: LetterStatus,
}

/// Error type for malformed feedback patterns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Feedback pattern must have exactly {WORD_LENGTH} tiles, got {0}")]
    InvalidLength(usize),
    #[error("Invalid feedback character '{0}'")]
    InvalidCharacter(char),
}

/// Feedback for a whole guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    tiles: [Tile; WORD_LENGTH],
}

impl Feedback {
    /// Build feedback from the tiles read back from the game
    #[must_use]
    pub const fn new(tiles: [Tile; WORD_LENGTH]) -> Self {
        Self { tiles }
    }

    /// Pair the letters of `word` with the given statuses
    #[must_use]
    pub fn from_statuses(word: &Word, statuses: [LetterStatus; WORD_LENGTH]) -> Self {
        Self {
            tiles: std::array::from_fn(|i| Tile {
                letter: word.char_at(i),
                status: statuses[i],
            }),
        }
    }

    /// Calculate the feedback when `guess` is played against `answer`
    ///
    /// Follows Wordle's rules for duplicate letters.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches (greens), pool the unmatched answer letters
    /// 2. Second pass: mark present-but-misplaced (yellows) while the pool lasts
    ///
    /// # Examples
    /// ```
    /// use wordle_learner::core::{Feedback, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    /// let feedback = Feedback::calculate(&guess, &answer);
    ///
    /// assert_eq!(feedback.to_pattern(), "--G-G");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
        let mut answer_remaining = [0u8; ALPHABET_SIZE];

        // First pass: greens
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess.char_at(i) == answer.char_at(i) {
                statuses[i] = LetterStatus::Correct;
            } else {
                answer_remaining[letter_index(answer.char_at(i))] += 1;
            }
        }

        // Second pass: yellows while unmatched copies remain
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if statuses[i] != LetterStatus::Correct {
                let idx = letter_index(guess.char_at(i));
                if answer_remaining[idx] > 0 {
                    statuses[i] = LetterStatus::Present;
                    answer_remaining[idx] -= 1;
                }
            }
        }

        Self::from_statuses(guess, statuses)
    }

    /// Parse a pattern string like "GY-GY" or "🟩🟨⬜🟩🟨" for `word`
    ///
    /// # Errors
    /// Returns `FeedbackError` if the pattern is not 5 tiles long or contains
    /// an unknown character.
    pub fn parse(word: &Word, pattern: &str) -> Result<Self, FeedbackError> {
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() != WORD_LENGTH {
            return Err(FeedbackError::InvalidLength(chars.len()));
        }

        let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
        for (status, ch) in statuses.iter_mut().zip(chars) {
            *status = LetterStatus::from_char(ch).ok_or(FeedbackError::InvalidCharacter(ch))?;
        }

        Ok(Self::from_statuses(word, statuses))
    }

    #[must_use]
    pub const fn tiles(&self) -> &[Tile; WORD_LENGTH] {
        &self.tiles
    }

    /// Check if every tile is green
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| tile.status == LetterStatus::Correct)
    }

    #[must_use]
    pub fn count(&self, status: LetterStatus) -> usize {
        self.tiles.iter().filter(|tile| tile.status == status).count()
    }

    /// Compact "GY-G-" form, the inverse of [`Feedback::parse`]
    #[must_use]
    pub fn to_pattern(&self) -> String {
        self.tiles.iter().map(|tile| tile.status.to_char()).collect()
    }

    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.tiles.iter().map(|tile| tile.status.to_emoji()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji())
    }
}
