//! Candidate filtering against server feedback
//!
//! A candidate survives only if it is consistent with every guess record in the
//! history. Constraints only ever remove words, so filtering is idempotent and
//! the candidate set never grows as the history gets longer.

use crate::core::{GuessRecord, Mark, Word, feedback};
use rayon::prelude::*;
use std::borrow::Borrow;

/// How marks on repeated letters are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Each position is checked on its own:
    /// - Correct: the candidate has the letter at that position
    /// - Present: the candidate has the letter, but not at that position
    /// - Absent: the candidate does not have the letter anywhere
    ///
    /// An Absent mark on a repeated letter therefore removes every candidate
    /// containing that letter, even when another occurrence was Correct or Present.
    #[default]
    PerPosition,
    /// The candidate must reproduce the exact marks under Wordle's
    /// letter-count accounting for duplicates.
    LetterCounts,
}

/// Narrows a word list to the words consistent with a guess history
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFilter {
    mode: FilterMode,
}

impl CandidateFilter {
    #[must_use]
    pub const fn new(mode: FilterMode) -> Self {
        Self { mode }
    }

    /// Keep the candidates consistent with every record in `history`
    ///
    /// Order of `candidates` is preserved. Accepts either owned words (a
    /// dictionary slice) or references (a previous result), so the output of
    /// one pass can be fed back in.
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::{GuessRecord, Mark, Word};
    /// use wordle_client::solver::CandidateFilter;
    /// use wordle_client::wordlists::loader::words_from_slice;
    ///
    /// let dictionary = words_from_slice(&["apple", "angle", "table"]);
    /// let history = vec![GuessRecord::new(Word::new("apple").unwrap(), vec![Mark::Correct; 5])];
    ///
    /// let candidates = CandidateFilter::default().apply(&dictionary, &history);
    /// assert_eq!(candidates, vec![&dictionary[0]]);
    /// ```
    pub fn apply<'a, W>(&self, candidates: &'a [W], history: &[GuessRecord]) -> Vec<&'a Word>
    where
        W: Borrow<Word> + Sync,
    {
        candidates
            .par_iter()
            .map(<W as Borrow<Word>>::borrow)
            .filter(|candidate| self.is_consistent(candidate, history))
            .collect()
    }

    /// Check a single word against every record in `history`
    #[must_use]
    pub fn is_consistent(&self, candidate: &Word, history: &[GuessRecord]) -> bool {
        history.iter().all(|record| match self.mode {
            FilterMode::PerPosition => matches_per_position(candidate, record),
            FilterMode::LetterCounts => matches_letter_counts(candidate, record),
        })
    }
}

fn matches_per_position(candidate: &Word, record: &GuessRecord) -> bool {
    if candidate.len() != record.word.len() {
        return false;
    }

    record
        .word
        .chars()
        .iter()
        .zip(&record.marks)
        .enumerate()
        .all(|(i, (&letter, &mark))| match mark {
            Mark::Correct => candidate.char_at(i) == Some(letter),
            Mark::Present => candidate.has_letter(letter) && candidate.char_at(i) != Some(letter),
            Mark::Absent => !candidate.has_letter(letter),
        })
}

fn matches_letter_counts(candidate: &Word, record: &GuessRecord) -> bool {
    candidate.len() == record.word.len() && feedback(&record.word, candidate) == record.marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_marks;
    use crate::wordlists::loader::words_from_slice;
    use proptest::prelude::*;

    fn record(word: &str, marks: &str) -> GuessRecord {
        GuessRecord::new(Word::new(word).unwrap(), parse_marks(marks).unwrap())
    }

    fn texts<'a>(words: &[&'a Word]) -> Vec<&'a str> {
        words.iter().map(|w| w.text()).collect()
    }

    #[test]
    fn exact_match_leaves_single_word() {
        let dict = words_from_slice(&["apple", "angle", "table"]);
        let history = vec![record("apple", "GGGGG")];

        let result = CandidateFilter::default().apply(&dict, &history);
        assert_eq!(texts(&result), ["apple"]);
    }

    #[test]
    fn absent_letters_remove_sharing_words() {
        let dict = words_from_slice(&["swing", "adieu", "cloud", "phlox", "nymph", "radio"]);
        let history = vec![record("audio", "-----")];

        let result = CandidateFilter::default().apply(&dict, &history);
        assert_eq!(texts(&result), ["swing", "nymph"]);
    }

    #[test]
    fn present_requires_letter_elsewhere() {
        let dict = words_from_slice(&["steal", "least", "sting", "haste"]);
        // S present at 0, T present at 1, rest absent
        let history = vec![record("stomp", "YY---")];

        let result = CandidateFilter::default().apply(&dict, &history);
        assert_eq!(texts(&result), ["least", "haste"]);
    }

    #[test]
    fn empty_history_keeps_everything() {
        let dict = words_from_slice(&["crane", "slate"]);
        let result = CandidateFilter::default().apply(&dict, &[]);
        assert_eq!(texts(&result), ["crane", "slate"]);
    }

    #[test]
    fn wrong_length_candidates_never_match() {
        let dict = words_from_slice(&["swing", "swings", "swin"]);
        let history = vec![record("audio", "-----")];

        let result = CandidateFilter::default().apply(&dict, &history);
        assert_eq!(texts(&result), ["swing"]);
    }

    #[test]
    fn per_position_drops_answer_with_repeated_guess_letter() {
        // SPEED against ABIDE: second E is Absent although ABIDE contains E
        let answer = Word::new("abide").unwrap();
        let guess = Word::new("speed").unwrap();
        let history = vec![GuessRecord::new(guess.clone(), feedback(&guess, &answer))];

        let per_position = CandidateFilter::new(FilterMode::PerPosition);
        let letter_counts = CandidateFilter::new(FilterMode::LetterCounts);

        assert!(!per_position.is_consistent(&answer, &history));
        assert!(letter_counts.is_consistent(&answer, &history));
    }

    #[test]
    fn letter_counts_matches_reference_feedback() {
        let dict = words_from_slice(&["floor", "robot", "motor", "flour"]);
        let guess = Word::new("robot").unwrap();
        let answer = Word::new("floor").unwrap();
        let history = vec![GuessRecord::new(guess.clone(), feedback(&guess, &answer))];

        let result = CandidateFilter::new(FilterMode::LetterCounts).apply(&dict, &history);
        assert_eq!(texts(&result), ["floor"]);
    }

    #[test]
    fn refiltering_a_result_is_stable() {
        let dict = words_from_slice(&["swing", "sting", "sling", "stink"]);
        let history = vec![record("swing", "G-GGG")];

        let filter = CandidateFilter::default();
        let once = filter.apply(&dict, &history);
        let twice = filter.apply(&once, &history);
        assert_eq!(texts(&once), ["sting", "sling"]);
        assert_eq!(once, twice);
    }

    fn word_strategy() -> impl Strategy<Value = String> {
        "[a-f]{5}"
    }

    fn record_strategy() -> impl Strategy<Value = GuessRecord> {
        (word_strategy(), prop::collection::vec(0u8..3, 5)).prop_map(|(word, codes)| {
            let marks = codes
                .into_iter()
                .filter_map(|c| Mark::try_from(c).ok())
                .collect();
            GuessRecord::new(Word::new(word).unwrap(), marks)
        })
    }

    fn mode_strategy() -> impl Strategy<Value = FilterMode> {
        prop_oneof![Just(FilterMode::PerPosition), Just(FilterMode::LetterCounts)]
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(
            words in prop::collection::vec(word_strategy(), 1..60),
            history in prop::collection::vec(record_strategy(), 0..4),
            mode in mode_strategy(),
        ) {
            let dict: Vec<Word> = words.into_iter().filter_map(|w| Word::new(w).ok()).collect();
            let filter = CandidateFilter::new(mode);

            let once = filter.apply(&dict, &history);
            let twice = filter.apply(&once, &history);
            prop_assert_eq!(&once, &twice);
        }

        #[test]
        fn longer_history_never_grows_candidates(
            words in prop::collection::vec(word_strategy(), 1..60),
            history in prop::collection::vec(record_strategy(), 0..5),
            split in 0usize..5,
            mode in mode_strategy(),
        ) {
            let dict: Vec<Word> = words.into_iter().filter_map(|w| Word::new(w).ok()).collect();
            let filter = CandidateFilter::new(mode);
            let prefix = &history[..split.min(history.len())];

            let shorter = filter.apply(&dict, prefix);
            let longer = filter.apply(&dict, &history);
            prop_assert!(longer.len() <= shorter.len());
            prop_assert!(longer.iter().all(|w| shorter.contains(w)));
        }

        #[test]
        fn true_feedback_keeps_answer_with_letter_counts(
            answer in word_strategy(),
            guesses in prop::collection::vec(word_strategy(), 1..4),
        ) {
            let answer = Word::new(answer).unwrap();
            let history: Vec<GuessRecord> = guesses
                .into_iter()
                .filter_map(|g| Word::new(g).ok())
                .map(|g| {
                    let marks = feedback(&g, &answer);
                    GuessRecord::new(g, marks)
                })
                .collect();

            let filter = CandidateFilter::new(FilterMode::LetterCounts);
            prop_assert!(filter.is_consistent(&answer, &history));
        }
    }
}
