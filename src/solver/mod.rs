//! Candidate filtering and guess selection
//!
//! This module narrows the dictionary against server feedback and picks the
//! word to submit next.

mod engine;
pub mod filter;
pub mod strategy;

pub use engine::{Solver, Suggestion};
pub use filter::{CandidateFilter, FilterMode};
pub use strategy::{FirstCandidateStrategy, GuessStrategy};
