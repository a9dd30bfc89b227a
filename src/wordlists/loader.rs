//! Word list loading utilities
//!
//! Reads a newline-delimited word list into a [`Dictionary`].

use super::Dictionary;
use crate::core::Word;
use crate::error::{ClientError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load a dictionary from a file
///
/// One word per line. Lines are trimmed and lowercased; blank lines and lines
/// with non-alphabetic characters are skipped. File order and duplicates are
/// preserved and word length is not checked.
///
/// # Errors
///
/// Returns `ClientError::Dictionary` if the file cannot be read or holds no words.
///
/// # Examples
/// ```no_run
/// use wordle_client::wordlists::loader::load_from_file;
///
/// let dictionary = load_from_file("project1-words.txt").unwrap();
/// println!("Loaded {} words", dictionary.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| ClientError::Dictionary(format!("cannot read {}: {e}", path.display())))?;

    let words = words_from_lines(content.lines());
    debug!(path = %path.display(), words = words.len(), "loaded word list");

    Dictionary::new(words)
        .map_err(|_| ClientError::Dictionary(format!("{} contains no words", path.display())))
}

fn words_from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Word> {
    lines
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            match Word::new(trimmed) {
                Ok(word) => Some(word),
                Err(e) => {
                    warn!(line = index + 1, entry = trimmed, "skipping word list entry: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Convert a string slice to a Word vector, skipping invalid entries
///
/// # Examples
/// ```
/// use wordle_client::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["crane", "slate"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
