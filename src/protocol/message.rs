//! Wire messages
//!
//! Every frame is a JSON object discriminated by its `type` field. Unknown
//! types fail to decode instead of being ignored.

use crate::core::{GuessRecord, Word};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Messages the client sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Opens the session for a user
    Hello { northeastern_username: String },
    /// Submits a word for the game `id`
    Guess { id: String, word: Word },
}

/// Messages the server sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// A game has been created
    Start { id: String },
    /// The last guess was wrong; carries feedback for every guess so far
    Retry { guesses: Vec<GuessRecord> },
    /// The word was found
    Bye { flag: String },
    /// The server rejected something and ended the game
    Error { message: String },
}

impl ClientMessage {
    pub fn hello(username: impl Into<String>) -> Self {
        Self::Hello {
            northeastern_username: username.into(),
        }
    }

    pub fn guess(id: impl Into<String>, word: Word) -> Self {
        Self::Guess {
            id: id.into(),
            word,
        }
    }

    /// Message type as it appears on the wire
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "hello",
            Self::Guess { .. } => "guess",
        }
    }
}

impl ServerMessage {
    /// Message type as it appears on the wire
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Retry { .. } => "retry",
            Self::Bye { .. } => "bye",
            Self::Error { .. } => "error",
        }
    }
}

/// Encode a message as one newline-terminated frame
///
/// # Errors
/// Returns `ClientError::Protocol` if serialization fails.
///
/// # Examples
/// ```
/// use wordle_client::protocol::{ClientMessage, encode_frame};
///
/// let frame = encode_frame(&ClientMessage::hello("quach.l")).unwrap();
/// assert_eq!(frame, b"{\"type\":\"hello\",\"northeastern_username\":\"quach.l\"}\n");
/// ```
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    let mut frame = serde_json::to_vec(message)?;
    frame.push(b'\n');
    Ok(frame)
}

/// Decode one complete frame (without its newline)
///
/// # Errors
/// Returns `ClientError::Protocol` for malformed JSON, a missing field or an unknown `type`.
pub fn decode_frame<T: for<'de> Deserialize<'de>>(frame: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(frame)?)
}
