//! Constraint tracking within a single game
//!
//! Accumulates what feedback has revealed about the answer: letters fixed in
//! place (green), letters known present but misplaced (yellow), and letters
//! known absent (gray). Constraints only ever accumulate during a game.

use crate::core::{Feedback, LetterStatus, WORD_LENGTH, Word};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Error raised when absorbed feedback contradicts itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("letter '{letter}' is both required and excluded")]
    Contradiction { letter: char },
}

/// Cumulative knowledge about the answer for one game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    confirmed: [Option<u8>; WORD_LENGTH],
    present: BTreeSet<u8>,
    wrong_positions: BTreeMap<u8, BTreeSet<usize>>,
    excluded: BTreeSet<u8>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one attempt's feedback into the constraint set
    ///
    /// A gray tile excludes its letter only if no green or yellow tile, in
    /// this guess or an earlier one, places that letter in the answer.
    ///
    /// # Errors
    /// Returns `ConstraintError::Contradiction` if a letter ends up both
    /// required and excluded, which real game feedback can never produce.
    pub fn absorb_feedback(&mut self, feedback: &Feedback) -> Result<(), ConstraintError> {
        for (position, tile) in feedback.tiles().iter().enumerate() {
            match tile.status {
                LetterStatus::Correct => {
                    self.confirmed[position] = Some(tile.letter);
                    self.present.remove(&tile.letter);
                }
                LetterStatus::Present => {
                    self.present.insert(tile.letter);
                    self.wrong_positions
                        .entry(tile.letter)
                        .or_default()
                        .insert(position);
                }
                LetterStatus::Absent => {}
            }
        }

        for tile in feedback.tiles() {
            if tile.status == LetterStatus::Absent && !self.is_required(tile.letter) {
                self.excluded.insert(tile.letter);
            }
        }

        self.check()
    }

    fn check(&self) -> Result<(), ConstraintError> {
        match self.excluded.iter().find(|&&l| self.is_required(l)) {
            Some(&letter) => Err(ConstraintError::Contradiction {
                letter: char::from(letter),
            }),
            None => Ok(()),
        }
    }

    /// Letter is confirmed somewhere or known present
    fn is_required(&self, letter: u8) -> bool {
        self.present.contains(&letter) || self.confirmed.contains(&Some(letter))
    }

    /// Check if `word` satisfies every constraint
    #[must_use]
    pub fn matches(&self, word: &Word) -> bool {
        let chars = word.chars();

        let greens_hold = self
            .confirmed
            .iter()
            .zip(chars)
            .all(|(confirmed, &ch)| confirmed.is_none_or(|c| c == ch));
        if !greens_hold {
            return false;
        }

        if !self.present.iter().all(|&letter| word.has_letter(letter)) {
            return false;
        }

        let misplaced_hold = self.wrong_positions.iter().all(|(&letter, positions)| {
            positions.iter().all(|&position| chars[position] != letter)
        });
        if !misplaced_hold {
            return false;
        }

        !self.excluded.iter().any(|&letter| word.has_letter(letter))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.confirmed.iter().all(Option::is_none)
            && self.present.is_empty()
            && self.wrong_positions.is_empty()
            && self.excluded.is_empty()
    }

    #[must_use]
    pub const fn confirmed(&self) -> &[Option<u8>; WORD_LENGTH] {
        &self.confirmed
    }

    #[must_use]
    pub const fn present(&self) -> &BTreeSet<u8> {
        &self.present
    }

    /// Positions each present letter is known not to occupy
    #[must_use]
    pub const fn wrong_positions(&self) -> &BTreeMap<u8, BTreeSet<usize>> {
        &self.wrong_positions
    }

    #[must_use]
    pub const fn excluded(&self) -> &BTreeSet<u8> {
        &self.excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn absorb(constraints: &mut ConstraintSet, guess: &str, answer: &str) {
        let feedback = Feedback::calculate(&word(guess), &word(answer));
        constraints.absorb_feedback(&feedback).unwrap();
    }

    #[test]
    fn empty_set_matches_everything() {
        let constraints = ConstraintSet::new();
        assert!(constraints.is_empty());
        assert!(constraints.matches(&word("crane")));
        assert!(constraints.matches(&word("zzzzz")));
    }

    #[test]
    fn correct_tiles_fix_positions() {
        let mut constraints = ConstraintSet::new();
        let feedback = Feedback::parse(&word("crane"), "G----").unwrap();
        constraints.absorb_feedback(&feedback).unwrap();

        assert_eq!(constraints.confirmed()[0], Some(b'c'));
        assert!(constraints.excluded().contains(&b'r'));
        assert!(!constraints.matches(&word("slate")));
    }

    #[test]
    fn present_tiles_record_wrong_positions() {
        let mut constraints = ConstraintSet::new();
        let feedback = Feedback::parse(&word("crane"), "----Y").unwrap();
        constraints.absorb_feedback(&feedback).unwrap();

        assert!(constraints.present().contains(&b'e'));
        assert_eq!(
            constraints.wrong_positions().get(&b'e'),
            Some(&BTreeSet::from([4]))
        );
        assert!(!constraints.matches(&word("house"))); // E at 4
        assert!(!constraints.matches(&word("bulky"))); // no E
        assert!(constraints.matches(&word("depth")));
    }

    #[test]
    fn correct_clears_earlier_present() {
        let mut constraints = ConstraintSet::new();
        constraints
            .absorb_feedback(&Feedback::parse(&word("eaten"), "Y----").unwrap())
            .unwrap();
        assert!(constraints.present().contains(&b'e'));

        constraints
            .absorb_feedback(&Feedback::parse(&word("crane"), "----G").unwrap())
            .unwrap();
        assert!(!constraints.present().contains(&b'e'));
        assert_eq!(constraints.confirmed()[4], Some(b'e'));
        // Misplacement knowledge survives
        assert!(constraints.wrong_positions().contains_key(&b'e'));
    }

    #[test]
    fn filter_example() {
        // confirmed {0: c}, present {e}, excluded {h, o, u, s}
        let mut constraints = ConstraintSet::new();
        constraints
            .absorb_feedback(&Feedback::parse(&word("chess"), "G-Y--").unwrap())
            .unwrap();
        constraints
            .absorb_feedback(&Feedback::parse(&word("house"), "-----").unwrap())
            .unwrap();

        assert_eq!(constraints.confirmed()[0], Some(b'c'));
        assert_eq!(constraints.present(), &BTreeSet::from([b'e']));
        assert_eq!(
            constraints.excluded(),
            &BTreeSet::from([b'h', b'o', b's', b'u'])
        );

        let vocabulary = ["crane", "slate", "house", "trace"].map(word);
        let candidates: Vec<&str> = vocabulary
            .iter()
            .filter(|w| constraints.matches(w))
            .map(Word::text)
            .collect();
        assert_eq!(candidates, ["crane"]);
    }

    #[test]
    fn gray_duplicate_of_yellow_is_not_excluded() {
        // SPEED vs CRANE: first E yellow, second E gray
        let mut constraints = ConstraintSet::new();
        absorb(&mut constraints, "speed", "crane");

        assert!(constraints.present().contains(&b'e'));
        assert!(!constraints.excluded().contains(&b'e'));
        assert!(constraints.excluded().contains(&b's'));
        assert!(constraints.matches(&word("crane")));
    }

    #[test]
    fn gray_before_green_of_same_letter_is_not_excluded() {
        // EERIE vs CRANE: E gray at 0 and 1, green at 4
        let mut constraints = ConstraintSet::new();
        absorb(&mut constraints, "eerie", "crane");

        assert_eq!(constraints.confirmed()[4], Some(b'e'));
        assert!(!constraints.excluded().contains(&b'e'));
        assert!(constraints.excluded().contains(&b'i'));
        assert!(constraints.matches(&word("crane")));
    }

    #[test]
    fn gray_after_earlier_green_is_not_excluded() {
        let mut constraints = ConstraintSet::new();
        absorb(&mut constraints, "slate", "crane");
        assert_eq!(constraints.confirmed()[4], Some(b'e'));

        // Feedback naming E gray while it is confirmed from an earlier attempt
        let feedback = Feedback::parse(&word("embed"), "-----").unwrap();
        constraints.absorb_feedback(&feedback).unwrap();
        assert!(!constraints.excluded().contains(&b'e'));
    }

    #[test]
    fn contradiction_is_a_hard_error() {
        let mut constraints = ConstraintSet::new();
        constraints
            .absorb_feedback(&Feedback::parse(&word("house"), "-----").unwrap())
            .unwrap();

        let feedback = Feedback::parse(&word("crane"), "----G").unwrap();
        assert_eq!(
            constraints.absorb_feedback(&feedback),
            Err(ConstraintError::Contradiction { letter: 'e' })
        );
    }

    #[test]
    fn answer_always_survives_its_own_feedback() {
        let answers = ["crane", "floor", "there", "speed", "eerie", "abbey", "geese", "mamma"];
        let guesses = [
            "slate", "robot", "eerie", "speed", "crane", "ebbed", "sense", "llama", "amass",
        ];

        for answer in answers {
            let mut constraints = ConstraintSet::new();
            for guess in guesses {
                absorb(&mut constraints, guess, answer);
                assert!(
                    constraints.matches(&word(answer)),
                    "{answer} filtered out after guessing {guess}"
                );
            }
        }
    }
}
