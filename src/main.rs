//! Wordle Client - CLI
//!
//! Plays one game against the server and prints the flag.
//!
//! # Usage
//!
//! ```bash
//! client proj1.example.edu quach.l
//! client -s --ca-file roots.pem proj1.example.edu quach.l
//! ```

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wordle_client::{
    commands::play_game,
    config::{ClientConfig, DEFAULT_WORDLIST},
    output::print_game_report,
    session::Outcome,
    solver::FilterMode,
};

#[derive(Parser, Debug)]
#[command(
    name = "client",
    about = "Plays the word-guessing game against a server and prints the flag",
    version
)]
struct Cli {
    /// Server port (default 27993, or 27994 with -s)
    #[arg(short, long)]
    port: Option<u16>,

    /// Connect with TLS
    #[arg(short = 's', long = "tls")]
    tls: bool,

    /// Server hostname or IP address
    hostname: String,

    /// Username sent in the hello message
    username: String,

    /// Word list, one word per line
    #[arg(short = 'w', long, default_value = DEFAULT_WORDLIST)]
    wordlist: PathBuf,

    /// Fixed first guess (default: random dictionary word)
    #[arg(short = 'f', long)]
    first_word: Option<String>,

    /// Seed for the random source
    #[arg(long)]
    seed: Option<u64>,

    /// Filter with exact duplicate-letter accounting
    #[arg(long)]
    exact_duplicates: bool,

    /// PEM bundle of trusted root certificates for -s
    #[arg(long)]
    ca_file: Option<PathBuf>,

    /// Print a round-by-round summary to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Show a progress spinner on stderr
    #[arg(long)]
    progress: bool,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn to_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.hostname.clone(),
            port: self.port,
            tls: self.tls,
            username: self.username.clone(),
            wordlist: self.wordlist.clone(),
            first_word: self.first_word.clone(),
            seed: self.seed,
            filter_mode: if self.exact_duplicates {
                FilterMode::LetterCounts
            } else {
                FilterMode::PerPosition
            },
            ca_file: self.ca_file.clone(),
            progress: self.progress,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let report = play_game(&cli.to_config())?;
    if cli.verbose {
        print_game_report(&report);
    }

    match report.outcome {
        Outcome::Solved { flag } => {
            println!("{flag}");
            Ok(())
        }
        Outcome::Rejected { message } => bail!("server error: {message}"),
    }
}
