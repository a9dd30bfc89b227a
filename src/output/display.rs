//! Game report rendering
//!
//! Everything goes to stderr; stdout is reserved for the flag.

use super::formatters::{candidate_bar, record_line, record_tiles};
use crate::commands::GameReport;
use crate::session::Outcome;
use colored::Colorize;

/// Print a round-by-round summary of a finished game
pub fn print_game_report(report: &GameReport) {
    eprintln!("\n{}", "─".repeat(60).cyan());
    match &report.game_id {
        Some(id) => eprintln!("Game: {}", id.bright_yellow().bold()),
        None => eprintln!("Game: {}", "(not started)".bright_black()),
    }
    eprintln!("{}", "─".repeat(60).cyan());

    let dictionary = report.rounds.first().map_or(0, |r| r.candidates);
    for (i, round) in report.rounds.iter().enumerate() {
        let turn = i + 1;
        let feedback = report.history.get(i);

        let row = feedback.map_or_else(
            || round.guess.text().to_uppercase(),
            |record| format!("{}  {}", record_tiles(record), record_line(record)),
        );
        eprintln!("\nTurn {turn}: {row}");

        let bar = candidate_bar(round.candidates, dictionary, 30);
        eprintln!("  Candidates: [{}] {}", bar.green(), round.candidates);
        if round.fallback {
            eprintln!("  {}", "No candidate left; guessed at random".yellow());
        }
    }

    eprintln!();
    if let Some(flag) = report.flag() {
        eprintln!("Flag: {}", flag.bright_yellow());
    }
    match &report.outcome {
        Outcome::Solved { .. } => eprintln!(
            "{}",
            format!("✅ Solved in {} guesses!", report.guesses()).green().bold()
        ),
        Outcome::Rejected { message } => eprintln!(
            "{}",
            format!("❌ Server ended the game: {message}").red().bold()
        ),
    }
}
