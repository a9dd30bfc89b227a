//! Core domain types for Wordle
//!
//! This module contains the fundamental domain types: words, per-letter marks
//! and the guess records the server sends back. Everything here is pure.

mod mark;
mod record;
mod word;

pub use mark::{InvalidMark, Mark, feedback, marks_to_emoji, parse_marks};
pub use record::GuessRecord;
pub use word::{WORD_LEN, Word, WordError};
