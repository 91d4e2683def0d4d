//! Command-line interface for mastermind.

use clap::{Parser, Subcommand};
use mastermind::{Difficulty, SourceKind};
use std::path::PathBuf;

/// Mastermind - guess the secret code
#[derive(Parser, Debug)]
#[command(name = "mastermind")]
#[command(about = "Mastermind code-breaking game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to $MASTERMIND_CONFIG if set)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Code length preset: easy (4), medium (6) or hard (8)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for a reproducible secret
        #[arg(long)]
        seed: Option<u64>,

        /// Secret provider: local or random_org
        #[arg(long)]
        source: Option<SourceKind>,
    },

    /// Score a single guess against a given secret
    Score {
        /// Secret symbols, e.g. "1 4 1 4"
        #[arg(long, allow_hyphen_values = true)]
        secret: String,

        /// Guess symbols, e.g. "4 4 1 2"
        #[arg(long, allow_hyphen_values = true)]
        guess: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List difficulty presets
    Difficulties,
}
