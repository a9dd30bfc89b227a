//! Terminal output formatting
//!
//! Display utilities for game reports and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::print_game_report;
