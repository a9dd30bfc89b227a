//! Per-letter feedback marks
//!
//! The server reports one mark per letter position of a guess, encoded on the
//! wire as an integer:
//! - 0 = Absent (letter not in word)
//! - 1 = Present (letter in word, wrong position)
//! - 2 = Correct (letter in correct position)

use super::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mark {
    Absent,
    Present,
    Correct,
}

/// Error for a wire mark code outside 0..=2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMark(pub u8);

impl fmt::Display for InvalidMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mark code must be 0, 1 or 2, got {}", self.0)
    }
}

impl std::error::Error for InvalidMark {}

impl Mark {
    /// Wire code for this mark
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }

    /// Emoji tile for this mark
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Absent => '⬜',
            Self::Present => '🟨',
            Self::Correct => '🟩',
        }
    }

    /// Parse a single feedback character
    ///
    /// Accepts 'G'/'g'/🟩 for correct, 'Y'/'y'/🟨 for present and '-'/'_'/⬜ for absent.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Mark {
    type Error = InvalidMark;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Present),
            2 => Ok(Self::Correct),
            other => Err(InvalidMark(other)),
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        mark.code()
    }
}

/// Parse a row of marks from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
///
/// # Examples
/// ```
/// use wordle_client::core::{Mark, parse_marks};
///
/// let marks = parse_marks("GY-").unwrap();
/// assert_eq!(marks, vec![Mark::Correct, Mark::Present, Mark::Absent]);
/// assert!(parse_marks("GX").is_none());
/// ```
#[must_use]
pub fn parse_marks(s: &str) -> Option<Vec<Mark>> {
    s.chars().map(Mark::from_char).collect()
}

/// Convert a row of marks to an emoji string
#[must_use]
pub fn marks_to_emoji(marks: &[Mark]) -> String {
    marks.iter().map(|m| m.emoji()).collect()
}

/// Calculate the feedback the game would give when `guess` is played against `answer`
///
/// This implements Wordle's exact feedback rules, including proper handling
/// of duplicate letters.
///
/// # Algorithm
/// 1. First pass: mark all exact matches and remove them from the available pool
/// 2. Second pass: mark present-but-wrong-position letters from the remaining pool
///
/// Positions beyond the shorter word are Absent.
///
/// # Examples
/// ```
/// use wordle_client::core::{Mark, Word, feedback};
///
/// let guess = Word::new("robot").unwrap();
/// let answer = Word::new("floor").unwrap();
///
/// use Mark::{Absent as A, Correct as C, Present as P};
/// assert_eq!(feedback(&guess, &answer), vec![P, P, A, C, A]);
/// ```
#[must_use]
pub fn feedback(guess: &Word, answer: &Word) -> Vec<Mark> {
    let mut result = vec![Mark::Absent; guess.len()];
    let mut answer_available = answer.char_counts();

    // Index needed to compare guess[i] with answer[i] and set result[i]
    #[allow(clippy::needless_range_loop)]
    for i in 0..guess.len() {
        let letter = guess.chars()[i];
        if answer.char_at(i) == Some(letter) {
            result[i] = Mark::Correct;
            if let Some(count) = answer_available.get_mut(&letter) {
                *count = count.saturating_sub(1);
            }
        }
    }

    #[allow(clippy::needless_range_loop)]
    for i in 0..guess.len() {
        if result[i] == Mark::Absent {
            let letter = guess.chars()[i];
            if let Some(count) = answer_available.get_mut(&letter)
                && *count > 0
            {
                result[i] = Mark::Present;
                *count -= 1;
            }
        }
    }

    result
}
