//! Command implementations

pub mod play;

pub use play::{GameReport, play_game};
