//! Protocol state machine for one game
//!
//! `Init → AwaitingStart → Active → Done`, with `Errored` reachable from
//! `AwaitingStart` and `Active`. States only move forward; a finished session
//! refuses further input.

use crate::core::{GuessRecord, Word};
use crate::error::{ClientError, Result};
use crate::protocol::{ClientMessage, FrameTransport, ServerMessage};
use crate::solver::{GuessStrategy, Solver, Suggestion};
use tracing::{debug, info, warn};

/// Where the session is in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Init,
    AwaitingStart,
    Active,
    Done,
    Errored,
}

impl SessionState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Errored)
    }
}

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted a guess and sent the flag
    Solved { flag: String },
    /// The server sent an `error` message
    Rejected { message: String },
}

/// One guess the client sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub guess: Word,
    /// Candidates the guess was chosen from
    pub candidates: usize,
    /// True when no candidate survived and the guess is a random dictionary word
    pub fallback: bool,
}

/// What the caller should do after handling a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Send(ClientMessage),
    Finished(Outcome),
}

/// Client side of one game
pub struct Session<'a, S: GuessStrategy> {
    username: String,
    solver: Solver<'a, S>,
    state: SessionState,
    game_id: Option<String>,
    history: Vec<GuessRecord>,
    pending: Option<Word>,
    rounds: Vec<RoundSummary>,
    outcome: Option<Outcome>,
}

impl<'a, S: GuessStrategy> Session<'a, S> {
    pub fn new(username: impl Into<String>, solver: Solver<'a, S>) -> Self {
        Self {
            username: username.into(),
            solver,
            state: SessionState::Init,
            game_id: None,
            history: Vec::new(),
            pending: None,
            rounds: Vec::new(),
            outcome: None,
        }
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    /// Feedback for every guess so far, as last reported by the server
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// The most recent guess, until the server reports feedback for it
    pub const fn pending_guess(&self) -> Option<&Word> {
        self.pending.as_ref()
    }

    pub fn rounds(&self) -> &[RoundSummary] {
        &self.rounds
    }

    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Produce the `hello` message and wait for `start`
    ///
    /// # Errors
    /// `ClientError::Protocol` if the session was already started.
    pub fn start(&mut self) -> Result<ClientMessage> {
        if self.state != SessionState::Init {
            return Err(self.reject(format!("session already started ({:?})", self.state)));
        }
        self.state = SessionState::AwaitingStart;
        debug!(username = %self.username, "sending hello");
        Ok(ClientMessage::hello(self.username.clone()))
    }

    /// Handle one message from the server
    ///
    /// # Errors
    /// `ClientError::Protocol` if the message is not valid in the current state
    /// or carries malformed feedback. The session is `Errored` afterwards.
    pub fn handle(&mut self, message: ServerMessage) -> Result<Step> {
        let result = self.dispatch(message);
        if result.is_err() {
            self.fail();
        }
        result
    }

    /// Mark the session as failed unless it already finished
    fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Errored;
        }
    }

    /// Run the whole exchange over `transport`
    ///
    /// `observe` is called after every step with the updated session.
    ///
    /// # Errors
    /// Any transport or protocol error. The session is `Errored` afterwards.
    pub fn drive<T, F>(&mut self, transport: &mut T, mut observe: F) -> Result<Outcome>
    where
        T: FrameTransport,
        F: FnMut(&Self),
    {
        let result = self.exchange(transport, &mut observe);
        if result.is_err() {
            self.fail();
        }
        result
    }

    fn exchange<T, F>(&mut self, transport: &mut T, observe: &mut F) -> Result<Outcome>
    where
        T: FrameTransport,
        F: FnMut(&Self),
    {
        let hello = self.start()?;
        transport.send(&hello)?;
        observe(self);

        loop {
            let message = transport.receive()?;
            match self.handle(message)? {
                Step::Send(reply) => {
                    transport.send(&reply)?;
                    observe(self);
                }
                Step::Finished(outcome) => {
                    observe(self);
                    return Ok(outcome);
                }
            }
        }
    }

    fn dispatch(&mut self, message: ServerMessage) -> Result<Step> {
        match (self.state, message) {
            (SessionState::AwaitingStart, ServerMessage::Start { id }) => {
                info!(game = %id, "game started");
                self.game_id = Some(id.clone());
                self.state = SessionState::Active;
                let suggestion = self.solver.first_guess();
                Ok(Step::Send(self.submit(id, suggestion)))
            }
            (SessionState::Active, ServerMessage::Retry { guesses }) => {
                for record in &guesses {
                    record.validate().map_err(ClientError::Protocol)?;
                }
                let Some(id) = self.game_id.clone() else {
                    return Err(ClientError::Protocol("retry before a game id".to_string()));
                };

                self.history = guesses;
                self.pending = None;
                let suggestion = self.solver.next_guess(&self.history);
                Ok(Step::Send(self.submit(id, suggestion)))
            }
            (SessionState::Active, ServerMessage::Bye { flag }) => {
                info!(rounds = self.rounds.len(), "game solved");
                self.state = SessionState::Done;
                Ok(self.finish(Outcome::Solved { flag }))
            }
            (SessionState::AwaitingStart | SessionState::Active, ServerMessage::Error { message }) => {
                warn!(%message, "server reported an error");
                self.state = SessionState::Errored;
                Ok(self.finish(Outcome::Rejected { message }))
            }
            (state, message) => Err(ClientError::Protocol(format!(
                "unexpected '{}' message while {state:?}",
                message.kind()
            ))),
        }
    }

    fn submit(&mut self, id: String, suggestion: Suggestion) -> ClientMessage {
        let Suggestion {
            word,
            candidates,
            fallback,
        } = suggestion;
        debug!(round = self.rounds.len() + 1, guess = %word, candidates, "guessing");

        self.pending = Some(word.clone());
        self.rounds.push(RoundSummary {
            guess: word.clone(),
            candidates,
            fallback,
        });
        ClientMessage::guess(id, word)
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.pending = None;
        self.outcome = Some(outcome.clone());
        Step::Finished(outcome)
    }

    fn reject(&mut self, reason: String) -> ClientError {
        self.fail();
        ClientError::Protocol(reason)
    }
}
