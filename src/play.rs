//! Line-oriented game loop over any reader and writer.

use crate::input::parse_guess;
use crate::session::{SessionError, SessionManager};
use anyhow::Result;
use derive_getters::Getters;
use mastermind_core::{GameConfig, GameView};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// Totals for one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct PlaySummary {
    /// Games started, including abandoned ones.
    games_started: u32,
    /// Games won.
    games_won: u32,
    /// Games lost.
    games_lost: u32,
}

/// Plays games under session `id` until `quit` or end of input.
///
/// Each line is a guess, `new` to abandon the current game and start
/// another, `help`, or `quit`. Rejected guesses print the reason and do not
/// use up an attempt.
#[instrument(skip(manager, config, input, output))]
pub async fn run_game<R: BufRead, W: Write>(
    manager: &SessionManager,
    id: &str,
    config: GameConfig,
    mut input: R,
    mut output: W,
) -> Result<PlaySummary> {
    let mut summary = PlaySummary::default();
    start(manager, id, config, &mut output, &mut summary).await?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("End of input");
            break;
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "quit" | "q" | "exit" => break,
            "new" => start(manager, id, config, &mut output, &mut summary).await?,
            "help" | "?" => write_help(&mut output, &config)?,
            text => {
                let guess = match parse_guess(text) {
                    Ok(guess) => guess,
                    Err(e) => {
                        writeln!(output, "{}", e)?;
                        continue;
                    }
                };
                match manager.submit_guess(id, guess) {
                    Ok(view) => {
                        write_progress(&mut output, &view)?;
                        if *view.has_won() {
                            summary.games_won += 1;
                        } else if *view.is_over() {
                            summary.games_lost += 1;
                        }
                    }
                    Err(SessionError::Guess(e)) => {
                        writeln!(output, "{}.", e)?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    info!(
        started = summary.games_started,
        won = summary.games_won,
        lost = summary.games_lost,
        "Play loop finished"
    );
    writeln!(output, "Goodbye!")?;
    Ok(summary)
}

async fn start<W: Write>(
    manager: &SessionManager,
    id: &str,
    config: GameConfig,
    output: &mut W,
    summary: &mut PlaySummary,
) -> Result<()> {
    let view = manager.start_game(id.to_string(), config).await?;
    summary.games_started += 1;
    writeln!(output, "New game started!")?;
    write_help(output, &config)?;
    writeln!(output, "You have {} guesses left.", view.attempts_remaining())?;
    Ok(())
}

fn write_help<W: Write>(output: &mut W, config: &GameConfig) -> std::io::Result<()> {
    writeln!(
        output,
        "Guess {} numbers between {} and {}, separated by spaces. \
         Type 'new' for a new game or 'quit' to exit.",
        config.symbol_count(),
        config.range().lower(),
        config.range().upper()
    )
}

fn write_progress<W: Write>(output: &mut W, view: &GameView) -> std::io::Result<()> {
    for (record, text) in view.history().iter().zip(view.feedback()) {
        writeln!(output, "  {}  {}", record.guess(), text)?;
    }

    let secret = view.secret().as_ref().map(ToString::to_string).unwrap_or_default();
    if *view.has_won() {
        writeln!(output, "You won! The secret was {}.", secret)?;
        writeln!(output, "Type 'new' to play again or 'quit' to exit.")
    } else if *view.is_over() {
        writeln!(output, "Out of guesses. The secret was {}.", secret)?;
        writeln!(output, "Type 'new' to play again or 'quit' to exit.")
    } else {
        writeln!(output, "You have {} guesses left.", view.attempts_remaining())
    }
}
