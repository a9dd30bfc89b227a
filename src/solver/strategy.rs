//! Guess selection strategies
//!
//! Defines the `GuessStrategy` trait and the first-candidate implementation.

use crate::core::Word;
use crate::wordlists::Dictionary;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// Chooses the words the client submits
pub trait GuessStrategy {
    /// The opening guess, before any feedback has arrived
    fn first_guess(&mut self, dictionary: &Dictionary) -> Word;

    /// The next guess given the surviving candidates (in dictionary order)
    ///
    /// `candidates` may be empty, in which case the strategy must still return
    /// a word from `dictionary`.
    fn next_guess(&mut self, candidates: &[&Word], dictionary: &Dictionary) -> Word;
}

/// Guesses the first surviving candidate
///
/// - First guess: the configured seed word, or a random dictionary word
/// - Later guesses: the first candidate in dictionary order
/// - No candidates left: a random dictionary word
///
/// The random source is injectable so tests can make every choice deterministic.
pub struct FirstCandidateStrategy<R = StdRng> {
    seed_word: Option<Word>,
    rng: R,
}

impl FirstCandidateStrategy<StdRng> {
    /// Strategy seeded from OS entropy
    #[must_use]
    pub fn from_os_rng(seed_word: Option<Word>) -> Self {
        Self::new(seed_word, StdRng::from_os_rng())
    }

    /// Strategy with a reproducible random source
    #[must_use]
    pub fn seeded(seed_word: Option<Word>, seed: u64) -> Self {
        Self::new(seed_word, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FirstCandidateStrategy<R> {
    #[must_use]
    pub const fn new(seed_word: Option<Word>, rng: R) -> Self {
        Self { seed_word, rng }
    }
}

impl<R: Rng> GuessStrategy for FirstCandidateStrategy<R> {
    fn first_guess(&mut self, dictionary: &Dictionary) -> Word {
        match &self.seed_word {
            Some(word) => word.clone(),
            None => dictionary.choose(&mut self.rng).clone(),
        }
    }

    fn next_guess(&mut self, candidates: &[&Word], dictionary: &Dictionary) -> Word {
        if let Some(&first) = candidates.first() {
            return first.clone();
        }

        let fallback = dictionary.choose(&mut self.rng).clone();
        warn!(%fallback, "no candidates remain, guessing a random dictionary word");
        fallback
    }
}
