//! Main solver interface

use super::filter::CandidateFilter;
use super::strategy::GuessStrategy;
use crate::core::{GuessRecord, Word};
use crate::wordlists::Dictionary;
use tracing::debug;

/// A guess chosen by the solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: Word,
    /// Candidates that survived filtering when this guess was chosen
    pub candidates: usize,
    /// True when no candidate survived and the word came from the full dictionary
    pub fallback: bool,
}

/// Wordle solver
///
/// Coordinates filtering and guess selection over a fixed dictionary.
/// Candidates are recomputed from the full dictionary on every round.
pub struct Solver<'a, S: GuessStrategy> {
    strategy: S,
    filter: CandidateFilter,
    dictionary: &'a Dictionary,
}

impl<'a, S: GuessStrategy> Solver<'a, S> {
    pub const fn new(strategy: S, filter: CandidateFilter, dictionary: &'a Dictionary) -> Self {
        Self {
            strategy,
            filter,
            dictionary,
        }
    }

    /// Get the opening guess for a new game
    pub fn first_guess(&mut self) -> Suggestion {
        Suggestion {
            word: self.strategy.first_guess(self.dictionary),
            candidates: self.dictionary.len(),
            fallback: false,
        }
    }

    /// Get the next guess given the feedback received so far
    pub fn next_guess(&mut self, history: &[GuessRecord]) -> Suggestion {
        let candidates = self.candidates(history);
        debug!(
            rounds = history.len(),
            candidates = candidates.len(),
            "filtered dictionary"
        );

        let word = self.strategy.next_guess(&candidates, self.dictionary);
        Suggestion {
            word,
            candidates: candidates.len(),
            fallback: candidates.is_empty(),
        }
    }

    /// Dictionary words consistent with every record in `history`
    pub fn candidates(&self, history: &[GuessRecord]) -> Vec<&'a Word> {
        self.filter.apply(self.dictionary.words(), history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mark, feedback, parse_marks};
    use crate::solver::{FilterMode, FirstCandidateStrategy};
    use crate::wordlists::loader::words_from_slice;

    fn dictionary() -> Dictionary {
        Dictionary::new(words_from_slice(&["crane", "slate", "irate", "crate", "grate"])).unwrap()
    }

    fn solver(dict: &Dictionary) -> Solver<'_, FirstCandidateStrategy> {
        Solver::new(
            FirstCandidateStrategy::seeded(Some(Word::new("crane").unwrap()), 9),
            CandidateFilter::default(),
            dict,
        )
    }

    fn scored(guess: &str, answer: &str) -> GuessRecord {
        let guess = Word::new(guess).unwrap();
        let marks = feedback(&guess, &Word::new(answer).unwrap());
        GuessRecord::new(guess, marks)
    }

    #[test]
    fn first_guess_reports_full_dictionary() {
        let dict = dictionary();
        let suggestion = solver(&dict).first_guess();

        assert_eq!(suggestion.word.text(), "crane");
        assert_eq!(suggestion.candidates, 5);
        assert!(!suggestion.fallback);
    }

    #[test]
    fn next_guess_filters_candidates() {
        let dict = dictionary();
        let mut solver = solver(&dict);

        let history = vec![scored("crane", "grate")];
        let suggestion = solver.next_guess(&history);

        // Only words with -RA-E and no C/N survive: irate, grate
        assert_eq!(suggestion.word.text(), "irate");
        assert_eq!(suggestion.candidates, 2);
        assert!(!suggestion.fallback);
    }

    #[test]
    fn candidates_shrink_with_history() {
        let dict = dictionary();
        let solver = solver(&dict);

        assert_eq!(solver.candidates(&[]).len(), dict.len());

        let one = vec![scored("crane", "grate")];
        let two = vec![scored("crane", "grate"), scored("irate", "grate")];
        assert!(solver.candidates(&two).len() <= solver.candidates(&one).len());
        assert_eq!(solver.candidates(&two).len(), 1);
    }

    #[test]
    fn next_guess_falls_back_when_nothing_survives() {
        let dict = dictionary();
        let mut solver = solver(&dict);

        // Claim ZZZZZ was all correct: no dictionary word matches
        let history = vec![GuessRecord::new(
            Word::new("zzzzz").unwrap(),
            vec![Mark::Correct; 5],
        )];
        let suggestion = solver.next_guess(&history);

        assert!(suggestion.fallback);
        assert_eq!(suggestion.candidates, 0);
        assert!(dict.find(suggestion.word.text()).is_some());
    }

    #[test]
    fn filter_mode_is_respected() {
        let dict = Dictionary::new(words_from_slice(&["abide", "speed"])).unwrap();
        let history = vec![GuessRecord::new(
            Word::new("speed").unwrap(),
            parse_marks("--Y-Y").unwrap(),
        )];

        let strategy = || FirstCandidateStrategy::seeded(None, 0);
        let per_position = Solver::new(strategy(), CandidateFilter::default(), &dict);
        let letter_counts = Solver::new(
            strategy(),
            CandidateFilter::new(FilterMode::LetterCounts),
            &dict,
        );

        assert_eq!(per_position.candidates(&history).len(), 0);
        assert_eq!(letter_counts.candidates(&history).len(), 1);
    }
}
