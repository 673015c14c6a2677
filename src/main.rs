//! Gomoku - console entry point.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use gomoku::{Game, RandomAi, ScoreRepository, StdConsole};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the game's prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Command::Play { scores, name } => run_play(scores, name),
        Command::Highscore { scores, limit } => run_highscore(scores, limit),
    }
}

/// Run an interactive game against the random computer opponent.
fn run_play(scores: PathBuf, name: Option<String>) -> Result<()> {
    info!(scores = %scores.display(), "Starting game");
    let repository = ScoreRepository::new(scores);
    let mut game = Game::new(StdConsole::new(), RandomAi::new(), repository, name);
    game.run()?;
    Ok(())
}

/// Print the standings without starting a game.
fn run_highscore(scores: PathBuf, limit: usize) -> Result<()> {
    let repository = ScoreRepository::new(scores);
    let top = repository.top_scores(limit);
    if top.is_empty() {
        println!("No high score data.");
        return Ok(());
    }
    println!("High score:");
    for (rank, (name, wins)) in top.iter().enumerate() {
        println!("{}. {} - {}", rank + 1, name, wins);
    }
    Ok(())
}
