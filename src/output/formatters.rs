//! Formatting utilities for terminal output

use crate::game::AttemptRecord;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One board row: `"3: CRANE 🟩⬜🟨⬜⬜"`
#[must_use]
pub fn attempt_line(attempt: &AttemptRecord) -> String {
    let tiles = attempt
        .feedback()
        .map_or_else(|| "(no feedback)".to_string(), |feedback| feedback.to_emoji());
    format!(
        "{}: {} {tiles}",
        attempt.attempt,
        attempt.word.text().to_uppercase()
    )
}

/// Letters with counts, e.g. `"E:40 A:38 R:31"`
#[must_use]
pub fn letter_counts(letters: &[(char, u32)]) -> String {
    letters
        .iter()
        .map(|(letter, count)| format!("{}:{count}", letter.to_ascii_uppercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, Word};

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(150.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn attempt_line_shows_tiles() {
        let guess = Word::new("crane").unwrap();
        let feedback = Feedback::calculate(&guess, &Word::new("slate").unwrap());
        let line = attempt_line(&AttemptRecord::new(1, guess, Some(&feedback)));
        assert_eq!(line, "1: CRANE ⬜⬜🟩⬜🟩");
    }

    #[test]
    fn attempt_line_without_feedback() {
        let line = attempt_line(&AttemptRecord::new(2, Word::new("slate").unwrap(), None));
        assert_eq!(line, "2: SLATE (no feedback)");
    }

    #[test]
    fn letter_counts_are_uppercased() {
        assert_eq!(letter_counts(&[('e', 40), ('a', 38)]), "E:40 A:38");
        assert_eq!(letter_counts(&[]), "");
    }
}
