//! A guess together with the feedback the server gave for it

use super::{Mark, WORD_LEN, Word};
use serde::{Deserialize, Serialize};

/// One guessed word and its per-letter marks
///
/// Serialized as `{"word": "...", "marks": [0, 1, 2, ...]}` inside `retry` messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: Word,
    pub marks: Vec<Mark>,
}

impl GuessRecord {
    #[must_use]
    pub const fn new(word: Word, marks: Vec<Mark>) -> Self {
        Self { word, marks }
    }

    /// Check the record has one mark per letter and the game's word length
    ///
    /// # Errors
    /// Returns a description of the mismatch.
    pub fn validate(&self) -> Result<(), String> {
        if self.word.len() != WORD_LEN {
            return Err(format!(
                "guess '{}' has {} letters, expected {WORD_LEN}",
                self.word,
                self.word.len()
            ));
        }
        if self.marks.len() != self.word.len() {
            return Err(format!(
                "guess '{}' has {} marks for {} letters",
                self.word,
                self.marks.len(),
                self.word.len()
            ));
        }
        Ok(())
    }
}
