//! Command-line interface for gomoku.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gomoku - console connected-five against a random computer opponent
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Console connected-five board game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run; defaults to `play`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game against the computer
    Play {
        /// Path to the high score file
        #[arg(long, default_value = "highscore.txt")]
        scores: PathBuf,

        /// Player display name (skips the name prompt)
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the current standings without starting a game
    Highscore {
        /// Path to the high score file
        #[arg(long, default_value = "highscore.txt")]
        scores: PathBuf,

        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            scores: PathBuf::from("highscore.txt"),
            name: None,
        }
    }
}
