//! Game session
//!
//! [`Session`] tracks protocol state and guess history for one game and asks
//! the solver for each guess. It is driven either message by message through
//! [`Session::handle`] or end to end over a [`crate::protocol::FrameTransport`].

mod machine;

pub use machine::{Outcome, RoundSummary, Session, SessionState, Step};
