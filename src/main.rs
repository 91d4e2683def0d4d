//! Mastermind - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use mastermind::{
    AppConfig, Difficulty, SessionManager, SourceKind, build_source, parse_guess, run_game, score,
};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so game output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Command::Play {
            difficulty,
            seed,
            source,
        } => run_play(config, difficulty, seed, source).await,
        Command::Score {
            secret,
            guess,
            json,
        } => run_score(&secret, &guess, json),
        Command::Difficulties => {
            for difficulty in Difficulty::iter() {
                println!("{:<8} {} numbers", difficulty.to_string(), difficulty.symbol_count());
            }
            Ok(())
        }
    }
}

/// Loads config from `--config`, then `MASTERMIND_CONFIG`, else defaults.
#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let path = path.or_else(|| std::env::var_os("MASTERMIND_CONFIG").map(PathBuf::from));
    match path {
        Some(path) => Ok(AppConfig::from_file(path)?),
        None => Ok(AppConfig::default()),
    }
}

/// Play games on stdin/stdout
#[instrument(skip(config))]
async fn run_play(
    mut config: AppConfig,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    source: Option<SourceKind>,
) -> Result<()> {
    if let Some(difficulty) = difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(source) = source {
        config = config.with_source(source);
    }

    let game_config = config.game_config()?;
    let manager = SessionManager::new(build_source(&config)?);
    let session_id = format!("terminal-{}", std::process::id());
    info!(session_id = %session_id, source = %config.source(), "Starting terminal play");

    let stdin = std::io::stdin();
    let summary = run_game(
        &manager,
        &session_id,
        game_config,
        stdin.lock(),
        std::io::stdout(),
    )
    .await?;
    info!(?summary, "Finished");
    Ok(())
}

/// Score one guess and print the result
#[instrument(skip(secret, guess))]
fn run_score(secret: &str, guess: &str, json: bool) -> Result<()> {
    let secret = parse_guess(secret)?;
    let guess = parse_guess(guess)?;
    if secret.len() != guess.len() {
        bail!(
            "Guess has {} numbers but the secret has {}",
            guess.len(),
            secret.len()
        );
    }

    let result = score(&secret, &guess);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
        if *result.won() {
            println!("Exact match!");
        }
    }
    Ok(())
}
