//! Vocabulary store
//!
//! Tracks which words the game has accepted and rejected, and derives letter
//! statistics from the accepted ones. The frequency tables are a pure function
//! of the valid set, so a store is fully rebuilt from a [`VocabularySnapshot`].

use crate::core::{ALPHABET_SIZE, WORD_LENGTH, Word, letter_index};
use log::{debug, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::starter::STARTER_WORDS;

/// Default size above which the exploration used-set is cleared
pub const DEFAULT_EXPLORATION_RESET: usize = 50;

/// Weight of positional frequency relative to plain letter frequency
const POSITION_WEIGHT: f64 = 0.5;

/// Error type for vocabulary construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("Starter vocabulary is empty; at least one seed word is required")]
    EmptyStarterList,
}

/// Persisted form of a vocabulary
///
/// Only the two word sets are stored; frequencies are rebuilt on restore.
/// Malformed entries are skipped on load rather than failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySnapshot {
    #[serde(deserialize_with = "skip_malformed_words")]
    pub valid_words: Vec<Word>,
    #[serde(deserialize_with = "skip_malformed_words")]
    pub invalid_words: Vec<Word>,
    #[serde(default)]
    pub total_learned: usize,
}

fn skip_malformed_words<'de, D>(deserializer: D) -> Result<Vec<Word>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|text| match Word::new(text.as_str()) {
            Ok(word) => Some(word),
            Err(e) => {
                warn!("Skipping saved word '{text}': {e}");
                None
            }
        })
        .collect())
}

/// Known-valid and known-invalid words plus derived letter statistics
#[derive(Debug, Clone)]
pub struct Vocabulary {
    starters: Vec<Word>,
    /// Valid words in insertion order; this order breaks scoring ties
    valid: Vec<Word>,
    valid_index: FxHashSet<Word>,
    invalid: FxHashSet<Word>,
    letter_freq: [u32; ALPHABET_SIZE],
    position_freq: [[u32; ALPHABET_SIZE]; WORD_LENGTH],
    exploration_used: FxHashSet<Word>,
    exploration_reset: usize,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocabulary {
    /// Create a vocabulary seeded with the embedded starter words
    #[must_use]
    pub fn new() -> Self {
        let starters = STARTER_WORDS
            .iter()
            .filter_map(|&s| Word::new(s).ok())
            .collect();
        Self::from_starters(starters)
    }

    /// Create a vocabulary seeded with a custom starter list
    ///
    /// # Errors
    /// Returns `VocabularyError::EmptyStarterList` if `starters` is empty.
    pub fn with_starters(starters: Vec<Word>) -> Result<Self, VocabularyError> {
        if starters.is_empty() {
            return Err(VocabularyError::EmptyStarterList);
        }
        Ok(Self::from_starters(starters))
    }

    /// Rebuild a vocabulary from a persisted snapshot
    ///
    /// Starter words are always merged into the valid set. Invalid entries
    /// that are also valid are dropped to keep the two sets disjoint.
    ///
    /// # Errors
    /// Returns `VocabularyError::EmptyStarterList` if `starters` is empty.
    pub fn restore(
        starters: Vec<Word>,
        snapshot: VocabularySnapshot,
    ) -> Result<Self, VocabularyError> {
        let mut vocabulary = Self::with_starters(starters)?;
        vocabulary.absorb_snapshot(snapshot);
        Ok(vocabulary)
    }

    /// Rebuild a vocabulary from a snapshot on top of the embedded starters
    #[must_use]
    pub fn from_snapshot(snapshot: VocabularySnapshot) -> Self {
        let mut vocabulary = Self::new();
        vocabulary.absorb_snapshot(snapshot);
        vocabulary
    }

    fn absorb_snapshot(&mut self, snapshot: VocabularySnapshot) {
        for word in snapshot.valid_words {
            self.insert_valid(word);
        }

        let mut dropped = 0;
        for word in snapshot.invalid_words {
            if self.valid_index.contains(&word) {
                dropped += 1;
            } else {
                self.invalid.insert(word);
            }
        }
        if dropped > 0 {
            warn!("Dropped {dropped} invalid entries that are also known valid");
        }

        debug!(
            "Restored vocabulary: {} valid, {} invalid",
            self.valid.len(),
            self.invalid.len()
        );
    }

    fn from_starters(starters: Vec<Word>) -> Self {
        let mut vocabulary = Self {
            starters: Vec::new(),
            valid: Vec::with_capacity(starters.len()),
            valid_index: FxHashSet::default(),
            invalid: FxHashSet::default(),
            letter_freq: [0; ALPHABET_SIZE],
            position_freq: [[0; ALPHABET_SIZE]; WORD_LENGTH],
            exploration_used: FxHashSet::default(),
            exploration_reset: DEFAULT_EXPLORATION_RESET,
        };
        for word in &starters {
            vocabulary.insert_valid(word.clone());
        }
        vocabulary.starters = starters;
        vocabulary
    }

    /// Change the size above which the exploration used-set is cleared
    pub fn set_exploration_reset(&mut self, size: usize) {
        self.exploration_reset = size;
    }

    /// Record a word the game accepted
    ///
    /// Returns `true` if the word was newly learned. Known-valid words leave
    /// the frequency tables untouched. A word already recorded as invalid is
    /// not moved, so the valid and invalid sets stay disjoint.
    pub fn record_valid(&mut self, word: &Word) -> bool {
        if self.valid_index.contains(word) {
            return false;
        }
        if self.invalid.contains(word) {
            warn!("'{word}' was accepted but is already recorded as invalid");
            return false;
        }
        self.insert_valid(word.clone())
    }

    /// Record a word the game rejected
    ///
    /// Returns `true` if the word was newly recorded. Valid words are never
    /// marked invalid.
    pub fn record_invalid(&mut self, word: &Word) -> bool {
        if self.valid_index.contains(word) {
            debug!("'{word}' is known valid, not recording it as invalid");
            return false;
        }
        self.invalid.insert(word.clone())
    }

    fn insert_valid(&mut self, word: Word) -> bool {
        if !self.valid_index.insert(word.clone()) {
            return false;
        }
        for letter in word.unique_letters() {
            self.letter_freq[letter_index(letter)] += 1;
        }
        for (position, &letter) in word.chars().iter().enumerate() {
            self.position_freq[position][letter_index(letter)] += 1;
        }
        self.valid.push(word);
        true
    }

    /// Frequency heuristic for ranking candidate guesses
    ///
    /// `(Σ letter_freq[l] over unique letters + 0.5 · Σ position_freq[i][word[i]])`
    /// scaled by `unique letters / 5`. Common letters and common placements
    /// score higher; repeated letters are penalised. This is a cheap ranking
    /// heuristic, not an estimate of information gain.
    #[must_use]
    pub fn score_candidate(&self, word: &Word) -> f64 {
        let unique = word.unique_letters();

        let letter_score: u32 = unique
            .iter()
            .map(|&letter| self.letter_freq[letter_index(letter)])
            .sum();

        let position_score: u32 = word
            .chars()
            .iter()
            .enumerate()
            .map(|(position, &letter)| self.position_freq[position][letter_index(letter)])
            .sum();

        let raw = f64::from(letter_score) + POSITION_WEIGHT * f64::from(position_score);
        raw * (unique.len() as f64 / WORD_LENGTH as f64)
    }

    /// Pick a word to explore with and mark it used
    ///
    /// Unused starter words come first, then unused learned words. Once both
    /// are exhausted and the used-set has grown past the reset size it is
    /// cleared and the pick starts over.
    pub fn pick_exploration_word<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Word {
        self.pick_exploration_word_except(&[], rng)
    }

    /// Like [`Vocabulary::pick_exploration_word`], never returning a word in
    /// `avoid` unless every known word is in it
    pub fn pick_exploration_word_except<R: Rng + ?Sized>(
        &mut self,
        avoid: &[Word],
        rng: &mut R,
    ) -> Word {
        if let Some(word) = self.choose_unused(avoid, rng) {
            self.exploration_used.insert(word.clone());
            return word;
        }

        if self.exploration_used.len() > self.exploration_reset {
            debug!(
                "Exploration pool exhausted, clearing {} used words",
                self.exploration_used.len()
            );
            self.exploration_used.clear();
            if let Some(word) = self.choose_unused(avoid, rng) {
                self.exploration_used.insert(word.clone());
                return word;
            }
        }

        // Used-set too small to reset: reuse any known word
        let reusable: Vec<&Word> = self.valid.iter().filter(|w| !avoid.contains(*w)).collect();
        reusable
            .choose(rng)
            .copied()
            .unwrap_or(&self.starters[0])
            .clone()
    }

    fn choose_unused<R: Rng + ?Sized>(&self, avoid: &[Word], rng: &mut R) -> Option<Word> {
        let unused = |w: &&Word| !self.exploration_used.contains(*w) && !avoid.contains(*w);

        let unused_starters: Vec<&Word> = self.starters.iter().filter(unused).collect();
        if let Some(&word) = unused_starters.choose(rng) {
            return Some(word.clone());
        }

        let available: Vec<&Word> = self.valid.iter().filter(unused).collect();
        available.choose(rng).map(|&word| word.clone())
    }

    /// Valid words in the order they were learned
    #[must_use]
    pub fn valid_words(&self) -> &[Word] {
        &self.valid
    }

    #[must_use]
    pub fn starters(&self) -> &[Word] {
        &self.starters
    }

    #[must_use]
    pub fn is_valid(&self, word: &Word) -> bool {
        self.valid_index.contains(word)
    }

    #[must_use]
    pub fn is_invalid(&self, word: &Word) -> bool {
        self.invalid.contains(word)
    }

    /// Number of known-valid words
    #[must_use]
    pub fn len(&self) -> usize {
        self.valid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    #[must_use]
    pub fn exploration_used_count(&self) -> usize {
        self.exploration_used.len()
    }

    /// Number of valid words containing `letter` at least once
    #[must_use]
    pub fn letter_frequency(&self, letter: u8) -> u32 {
        self.letter_freq[letter_index(letter)]
    }

    /// Number of valid words with `letter` at `position`
    #[must_use]
    pub fn position_frequency(&self, position: usize, letter: u8) -> u32 {
        self.position_freq[position][letter_index(letter)]
    }

    /// The `n` most common letters, most common first
    #[must_use]
    pub fn top_letters(&self, n: usize) -> Vec<(char, u32)> {
        let mut letters: Vec<(char, u32)> = (b'a'..=b'z')
            .map(|letter| (char::from(letter), self.letter_frequency(letter)))
            .filter(|&(_, count)| count > 0)
            .collect();
        letters.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        letters.truncate(n);
        letters
    }

    /// Sorted snapshot of both word sets for persistence
    #[must_use]
    pub fn snapshot(&self) -> VocabularySnapshot {
        let mut valid_words = self.valid.clone();
        valid_words.sort();
        let mut invalid_words: Vec<Word> = self.invalid.iter().cloned().collect();
        invalid_words.sort();

        VocabularySnapshot {
            total_learned: valid_words.len(),
            valid_words,
            invalid_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn words(texts: &[&str]) -> Vec<Word> {
        texts.iter().map(|t| word(t)).collect()
    }

    fn assert_frequencies_consistent(vocabulary: &Vocabulary) {
        for letter in b'a'..=b'z' {
            let expected = vocabulary
                .valid_words()
                .iter()
                .filter(|w| w.has_letter(letter))
                .count() as u32;
            assert_eq!(vocabulary.letter_frequency(letter), expected);

            for position in 0..WORD_LENGTH {
                let expected = vocabulary
                    .valid_words()
                    .iter()
                    .filter(|w| w.char_at(position) == letter)
                    .count() as u32;
                assert_eq!(vocabulary.position_frequency(position, letter), expected);
            }
        }
    }

    #[test]
    fn new_vocabulary_is_seeded_with_starters() {
        let vocabulary = Vocabulary::new();
        assert_eq!(vocabulary.len(), STARTER_WORDS.len());
        assert_eq!(vocabulary.starters().len(), STARTER_WORDS.len());
        assert!(vocabulary.is_valid(&word("crane")));
        assert_eq!(vocabulary.invalid_count(), 0);
        assert_frequencies_consistent(&vocabulary);
    }

    #[test]
    fn empty_starter_list_is_rejected() {
        assert_eq!(
            Vocabulary::with_starters(Vec::new()).unwrap_err(),
            VocabularyError::EmptyStarterList
        );
    }

    #[test]
    fn record_valid_learns_new_words_once() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane"])).unwrap();

        assert!(vocabulary.record_valid(&word("slate")));
        let letter_e = vocabulary.letter_frequency(b'e');
        let pos_a = vocabulary.position_frequency(2, b'a');

        // Second call is a no-op on the frequency tables
        assert!(!vocabulary.record_valid(&word("slate")));
        assert_eq!(vocabulary.letter_frequency(b'e'), letter_e);
        assert_eq!(vocabulary.position_frequency(2, b'a'), pos_a);
        assert_eq!(vocabulary.len(), 2);
    }

    #[test]
    fn letter_frequency_counts_each_word_once() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane"])).unwrap();
        vocabulary.record_valid(&word("speed"));

        // SPEED has two E's but contributes 1 to letter frequency
        assert_eq!(vocabulary.letter_frequency(b'e'), 2);
        assert_eq!(vocabulary.position_frequency(2, b'e'), 1);
        assert_eq!(vocabulary.position_frequency(3, b'e'), 1);
        assert_eq!(vocabulary.position_frequency(4, b'e'), 1);
    }

    #[test]
    fn frequencies_stay_consistent() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane", "slate"])).unwrap();
        for w in ["speed", "house", "crane", "eerie", "trace", "house", "aaaaa"] {
            vocabulary.record_valid(&word(w));
            assert_frequencies_consistent(&vocabulary);
        }
    }

    #[test]
    fn record_invalid_is_idempotent_and_ignores_frequencies() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane"])).unwrap();
        let before = vocabulary.letter_frequency(b'x');

        assert!(vocabulary.record_invalid(&word("xylyx")));
        assert!(!vocabulary.record_invalid(&word("xylyx")));
        assert_eq!(vocabulary.invalid_count(), 1);
        assert_eq!(vocabulary.letter_frequency(b'x'), before);
    }

    #[test]
    fn valid_and_invalid_stay_disjoint_and_monotonic() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane"])).unwrap();
        let ops: [(&str, bool); 8] = [
            ("slate", true),
            ("qwert", false),
            ("slate", false),
            ("qwert", true),
            ("house", true),
            ("crane", false),
            ("zzzzz", false),
            ("house", false),
        ];

        let mut last = (vocabulary.len(), vocabulary.invalid_count());
        for (text, accepted) in ops {
            let w = word(text);
            if accepted {
                vocabulary.record_valid(&w);
            } else {
                vocabulary.record_invalid(&w);
            }

            let now = (vocabulary.len(), vocabulary.invalid_count());
            assert!(now.0 >= last.0 && now.1 >= last.1);
            last = now;

            for valid in vocabulary.valid_words() {
                assert!(!vocabulary.is_invalid(valid), "{valid} is in both sets");
            }
        }

        assert!(vocabulary.is_valid(&word("slate")));
        assert!(vocabulary.is_invalid(&word("qwert")));
        assert!(!vocabulary.is_valid(&word("qwert")));
    }

    #[test]
    fn score_matches_formula_for_single_word() {
        let vocabulary = Vocabulary::with_starters(words(&["crane"])).unwrap();

        // 5 unique letters of frequency 1, plus 0.5 × 5 position matches
        assert!((vocabulary.score_candidate(&word("crane")) - 7.5).abs() < 1e-9);

        // SPEED: only E is known (1), no position matches, 4/5 unique
        assert!((vocabulary.score_candidate(&word("speed")) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn score_rewards_common_letters_and_positions() {
        let vocabulary = Vocabulary::with_starters(words(&["crane", "slate"])).unwrap();

        // Letters t1 r1 a2 c1 e2 = 7; positions r@1 1, a@2 2, e@4 2 = 5 → 7 + 2.5
        assert!((vocabulary.score_candidate(&word("trace")) - 9.5).abs() < 1e-9);

        // Unknown letters score nothing
        assert!(vocabulary.score_candidate(&word("pudgy")).abs() < 1e-9);
    }

    #[test]
    fn score_penalises_repeated_letters() {
        let vocabulary = Vocabulary::new();
        let repeated = vocabulary.score_candidate(&word("eerie"));
        let distinct = vocabulary.score_candidate(&word("irate"));
        assert!(repeated < distinct);
    }

    #[test]
    fn exploration_prefers_starters() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane", "slate"])).unwrap();
        vocabulary.record_valid(&word("house"));
        let mut rng = StdRng::seed_from_u64(7);

        let first = vocabulary.pick_exploration_word(&mut rng);
        let second = vocabulary.pick_exploration_word(&mut rng);
        let third = vocabulary.pick_exploration_word(&mut rng);

        let mut starters = vec![first, second];
        starters.sort();
        assert_eq!(starters, words(&["crane", "slate"]));
        assert_eq!(third, word("house"));
        assert_eq!(vocabulary.exploration_used_count(), 3);
    }

    #[test]
    fn exploration_never_repeats_before_exhaustion() {
        let mut vocabulary = Vocabulary::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = FxHashSet::default();

        for _ in 0..vocabulary.len() {
            let pick = vocabulary.pick_exploration_word(&mut rng);
            assert!(seen.insert(pick), "exploration repeated a word");
        }
    }

    #[test]
    fn exploration_resets_after_exhaustion() {
        let mut vocabulary = Vocabulary::new();
        for w in ["abide", "acorn", "actor"] {
            vocabulary.record_valid(&word(w));
        }
        let mut rng = StdRng::seed_from_u64(1);

        // Use up every starter and every learned word
        for _ in 0..vocabulary.len() {
            vocabulary.pick_exploration_word(&mut rng);
        }
        assert_eq!(vocabulary.exploration_used_count(), vocabulary.len());
        assert!(vocabulary.exploration_used_count() > DEFAULT_EXPLORATION_RESET);

        let pick = vocabulary.pick_exploration_word(&mut rng);
        assert!(vocabulary.is_valid(&pick));
        assert_eq!(vocabulary.exploration_used_count(), 1);
    }

    #[test]
    fn exploration_falls_back_below_reset_size() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane"])).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(vocabulary.pick_exploration_word(&mut rng), word("crane"));
        // Pool exhausted but used-set is tiny: reuse without clearing
        assert_eq!(vocabulary.pick_exploration_word(&mut rng), word("crane"));
        assert_eq!(vocabulary.exploration_used_count(), 1);
    }

    #[test]
    fn snapshot_restores_identical_statistics() {
        let mut vocabulary = Vocabulary::new();
        for w in ["abide", "speed", "house"] {
            vocabulary.record_valid(&word(w));
        }
        vocabulary.record_invalid(&word("qwert"));

        let snapshot = vocabulary.snapshot();
        assert_eq!(snapshot.total_learned, vocabulary.len());
        assert!(snapshot.valid_words.windows(2).all(|w| w[0] < w[1]));

        let restored = Vocabulary::restore(vocabulary.starters().to_vec(), snapshot).unwrap();
        assert_eq!(restored.len(), vocabulary.len());
        assert!(restored.is_invalid(&word("qwert")));
        for letter in b'a'..=b'z' {
            assert_eq!(
                restored.letter_frequency(letter),
                vocabulary.letter_frequency(letter)
            );
        }
        assert_frequencies_consistent(&restored);
    }

    #[test]
    fn restore_keeps_sets_disjoint() {
        let snapshot = VocabularySnapshot {
            valid_words: words(&["house"]),
            invalid_words: words(&["house", "crane", "qwert"]),
            total_learned: 1,
        };
        let restored = Vocabulary::restore(words(&["crane"]), snapshot).unwrap();

        assert!(restored.is_valid(&word("house")));
        assert!(!restored.is_invalid(&word("house")));
        assert!(!restored.is_invalid(&word("crane")));
        assert!(restored.is_invalid(&word("qwert")));
    }

    #[test]
    fn exploration_skips_avoided_words() {
        let mut vocabulary = Vocabulary::with_starters(words(&["crane", "slate"])).unwrap();
        let avoid = words(&["crane"]);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..4 {
            assert_eq!(
                vocabulary.pick_exploration_word_except(&avoid, &mut rng),
                word("slate")
            );
        }
        assert!(!vocabulary.exploration_used.contains(&word("crane")));

        // Nothing left to offer but avoided words
        let everything = words(&["crane", "slate"]);
        assert_eq!(
            vocabulary.pick_exploration_word_except(&everything, &mut rng),
            word("crane")
        );
    }

    #[test]
    fn snapshot_load_skips_malformed_words() {
        let json = r#"{
            "valid_words": ["house", "toolong", "ab1de", "speed"],
            "invalid_words": ["qwert", ""],
            "total_learned": 4
        }"#;
        let snapshot: VocabularySnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.valid_words, words(&["house", "speed"]));
        assert_eq!(snapshot.invalid_words, words(&["qwert"]));
        assert_eq!(snapshot.total_learned, 4);
    }

    #[test]
    fn top_letters_sorted_by_frequency() {
        let vocabulary = Vocabulary::with_starters(words(&["crane", "slate"])).unwrap();
        let top = vocabulary.top_letters(2);
        assert_eq!(top, vec![('a', 2), ('e', 2)]);
    }
}
