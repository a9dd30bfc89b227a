//! Play one game against the server
//!
//! Loads the dictionary, connects, drives the session to a terminal state and
//! closes the connection whatever the result.

use crate::config::ClientConfig;
use crate::core::GuessRecord;
use crate::error::{ClientError, Result};
use crate::protocol::{Connection, FramedStream};
use crate::session::{Outcome, RoundSummary, Session, SessionState};
use crate::solver::{CandidateFilter, FirstCandidateStrategy, GuessStrategy, Solver};
use crate::wordlists::load_from_file;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, warn};

/// What happened in a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub game_id: Option<String>,
    pub outcome: Outcome,
    /// Feedback for every guess, as last reported by the server
    pub history: Vec<GuessRecord>,
    /// One entry per guess sent
    pub rounds: Vec<RoundSummary>,
}

impl GameReport {
    /// Snapshot a finished session
    ///
    /// Returns `None` while the session has no outcome.
    pub fn from_session<S: GuessStrategy>(session: &Session<'_, S>) -> Option<Self> {
        Some(Self {
            game_id: session.game_id().map(str::to_owned),
            outcome: session.outcome()?.clone(),
            history: session.history().to_vec(),
            rounds: session.rounds().to_vec(),
        })
    }

    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Solved { flag } => Some(flag),
            Outcome::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub const fn guesses(&self) -> usize {
        self.rounds.len()
    }
}

/// Play one full game as configured
///
/// # Errors
/// `ClientError::Dictionary` or `ClientError::Config` before connecting,
/// `ClientError::Connection`, `ClientError::Tls` or `ClientError::Protocol`
/// once connected. A server `error` message is not an error here; it is
/// reported as [`Outcome::Rejected`].
pub fn play_game(config: &ClientConfig) -> Result<GameReport> {
    let dictionary = load_from_file(&config.wordlist)?;
    let seed_word = config.seed_word()?;
    if let Some(word) = &seed_word
        && dictionary.find(word.text()).is_none()
    {
        warn!(%word, "first word is not in the dictionary");
    }
    let strategy = match config.seed {
        Some(seed) => FirstCandidateStrategy::seeded(seed_word, seed),
        None => FirstCandidateStrategy::from_os_rng(seed_word),
    };
    let solver = Solver::new(strategy, CandidateFilter::new(config.filter_mode), &dictionary);
    let mut session = Session::new(config.username.clone(), solver);

    let connection = Connection::connect(
        &config.host,
        config.effective_port(),
        config.tls_options().as_ref(),
    )?;
    let mut stream = FramedStream::new(connection);

    let spinner = spinner(config.progress);
    let result = session.drive(&mut stream, |s| spinner.set_message(progress_message(s)));
    spinner.finish_and_clear();
    stream.into_inner().close();

    let outcome = result?;
    debug!(?outcome, state = ?session.state(), "game over");

    GameReport::from_session(&session)
        .ok_or_else(|| ClientError::Protocol("game ended without an outcome".to_string()))
}

fn spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One-line status for the spinner
fn progress_message<S: GuessStrategy>(session: &Session<'_, S>) -> String {
    match (session.state(), session.rounds().last()) {
        (SessionState::AwaitingStart, _) => "waiting for game to start".to_string(),
        (SessionState::Done, _) => format!("solved in {} guesses", session.rounds().len()),
        (SessionState::Errored, _) => "game ended with an error".to_string(),
        (_, Some(round)) => match session.pending_guess() {
            Some(word) => format!(
                "round {}: guessed {word} from {} candidates",
                session.rounds().len(),
                round.candidates
            ),
            None => format!("round {}: choosing next guess", session.rounds().len() + 1),
        },
        (_, None) => "connecting".to_string(),
    }
}
