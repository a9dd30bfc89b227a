//! Formatting utilities for terminal output

use crate::core::{GuessRecord, Mark, marks_to_emoji};
use colored::{ColoredString, Colorize};

/// One letter as a colored tile
#[must_use]
pub fn tile(letter: u8, mark: Mark) -> ColoredString {
    let text = format!(" {} ", char::from(letter.to_ascii_uppercase()));
    match mark {
        Mark::Correct => text.black().on_green().bold(),
        Mark::Present => text.black().on_yellow().bold(),
        Mark::Absent => text.white().on_bright_black(),
    }
}

/// A guess rendered as colored tiles
#[must_use]
pub fn record_tiles(record: &GuessRecord) -> String {
    record
        .word
        .chars()
        .iter()
        .zip(&record.marks)
        .map(|(&letter, &mark)| tile(letter, mark).to_string())
        .collect()
}

/// A guess as `WORD 🟩⬜...`
#[must_use]
pub fn record_line(record: &GuessRecord) -> String {
    format!(
        "{} {}",
        record.word.text().to_uppercase(),
        marks_to_emoji(&record.marks)
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        // Clamped to [0, width] below
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Share of the dictionary still in play
#[must_use]
pub fn candidate_bar(candidates: usize, dictionary: usize, width: usize) -> String {
    create_progress_bar(candidates as f64, dictionary as f64, width)
}
