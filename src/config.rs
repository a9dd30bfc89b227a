//! Client configuration
//!
//! Resolved settings for one run, independent of how they were parsed.

use crate::core::Word;
use crate::error::{ClientError, Result};
use crate::protocol::TlsOptions;
use crate::solver::FilterMode;
use std::path::PathBuf;

/// Server port without TLS
pub const DEFAULT_PORT: u16 = 27993;

/// Server port with TLS
pub const DEFAULT_TLS_PORT: u16 = 27994;

/// Dictionary looked up in the working directory
pub const DEFAULT_WORDLIST: &str = "project1-words.txt";

/// Everything needed to play one game
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    /// Explicit port; see [`ClientConfig::effective_port`]
    pub port: Option<u16>,
    pub tls: bool,
    pub username: String,
    pub wordlist: PathBuf,
    /// Fixed first guess; random when unset
    pub first_word: Option<String>,
    /// Seed for the random source; OS entropy when unset
    pub seed: Option<u64>,
    pub filter_mode: FilterMode,
    pub ca_file: Option<PathBuf>,
    pub progress: bool,
}

impl ClientConfig {
    /// Defaults for everything except the server and user
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            tls: false,
            username: username.into(),
            wordlist: PathBuf::from(DEFAULT_WORDLIST),
            first_word: None,
            seed: None,
            filter_mode: FilterMode::default(),
            ca_file: None,
            progress: false,
        }
    }

    /// Port to connect to
    ///
    /// # Examples
    /// ```
    /// use wordle_client::config::ClientConfig;
    ///
    /// let mut config = ClientConfig::new("localhost", "user");
    /// assert_eq!(config.effective_port(), 27993);
    ///
    /// config.tls = true;
    /// assert_eq!(config.effective_port(), 27994);
    ///
    /// config.port = Some(9000);
    /// assert_eq!(config.effective_port(), 9000);
    /// ```
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        match (self.port, self.tls) {
            (Some(port), _) => port,
            (None, true) => DEFAULT_TLS_PORT,
            (None, false) => DEFAULT_PORT,
        }
    }

    /// TLS options when `-s` was given
    #[must_use]
    pub fn tls_options(&self) -> Option<TlsOptions> {
        self.tls.then(|| TlsOptions {
            ca_file: self.ca_file.clone(),
        })
    }

    /// Parse the configured first word
    ///
    /// # Errors
    /// `ClientError::Config` if the word is not alphabetic.
    pub fn seed_word(&self) -> Result<Option<Word>> {
        self.first_word
            .as_deref()
            .map(|text| {
                Word::new(text).map_err(|e| ClientError::Config(format!("invalid first word '{text}': {e}")))
            })
            .transpose()
    }
}
