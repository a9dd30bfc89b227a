//! Error types for the Wordle protocol client.
//!
//! Every failure is fatal to the session: nothing here is retried or recovered
//! locally. The variants mirror the stage at which the session gave up.
//!
//! | Category | Variant |
//! |----------|---------|
//! | Startup | [`ClientError::Dictionary`], [`ClientError::Config`] |
//! | Transport | [`ClientError::Connection`], [`ClientError::Tls`] |
//! | Protocol | [`ClientError::Protocol`] |

use thiserror::Error;

/// Result type alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for the crate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Socket create/connect/read/write failure, or the peer closed mid-frame.
    #[error("connection error: {0}")]
    Connection(String),

    /// TLS handshake or certificate verification failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Malformed JSON, missing field, or a message the session did not expect.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Word list missing or empty at startup.
    #[error("dictionary error: {0}")]
    Dictionary(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a [`ClientError::Connection`] from an I/O error and the operation that failed.
    pub(crate) fn connection(operation: &str, err: &std::io::Error) -> Self {
        Self::Connection(format!("{operation}: {err}"))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(format!("invalid frame: {err}"))
    }
}
