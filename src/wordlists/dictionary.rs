//! Ordered, immutable word list

use crate::core::Word;
use crate::error::{ClientError, Result};
use rand::Rng;

/// The words the client may guess, in word-list order
///
/// Never empty. Duplicates are kept. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    /// Build a dictionary from words in their source order
    ///
    /// # Errors
    /// Returns `ClientError::Dictionary` if `words` is empty.
    pub fn new(words: Vec<Word>) -> Result<Self> {
        if words.is_empty() {
            return Err(ClientError::Dictionary("word list is empty".to_string()));
        }
        Ok(Self { words })
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: construction rejects empty lists
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Find a word by its text
    #[must_use]
    pub fn find(&self, text: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.text() == text)
    }

    /// Pick a uniformly random word
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Word {
        &self.words[rng.random_range(0..self.words.len())]
    }
}
