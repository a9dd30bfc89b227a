//! Word lists for guessing
//!
//! The dictionary is read once at startup and never changes afterwards.

mod dictionary;
pub mod loader;

pub use dictionary::Dictionary;
pub use loader::load_from_file;
