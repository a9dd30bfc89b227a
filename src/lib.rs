//! Wordle Client
//!
//! Client for a line-delimited JSON word-guessing game: connects over TCP or
//! TLS, narrows a dictionary with the server's per-letter feedback and guesses
//! until the server hands back a flag.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_client::core::{GuessRecord, Word, parse_marks};
//! use wordle_client::solver::CandidateFilter;
//! use wordle_client::wordlists::loader::words_from_slice;
//!
//! let dictionary = words_from_slice(&["swing", "apple", "table"]);
//! let history = vec![GuessRecord::new(
//!     Word::new("swing").unwrap(),
//!     parse_marks("-----").unwrap(),
//! )];
//!
//! let candidates = CandidateFilter::default().apply(&dictionary, &history);
//! assert_eq!(candidates.len(), 2);
//! ```

// Core domain types
pub mod core;

// Word lists
pub mod wordlists;

// Candidate filtering and guess selection
pub mod solver;

// Wire messages, framing and transport
pub mod protocol;

// Per-game state machine
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub mod config;
pub mod error;

pub use error::{ClientError, Result};
