//! Strictly Ultimate - terminal front end
//!
//! Plays Ultimate Tic-Tac-Toe on stdin/stdout, or replays a move list.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_ultimate::{GameConfig, GameSession};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_ultimate=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.command)?;

    match cli.command {
        Command::Play { .. } => run_play(config),
        Command::Replay { json, moves, .. } => run_replay(config, json, &moves),
    }
}

/// Loads the config file (if any) and applies command-line overrides.
#[instrument(skip(command))]
fn load_config(command: &Command) -> Result<GameConfig> {
    let (path, draw_policy) = command.settings();
    let config = GameConfig::load(path.map(|p| p.as_path()))
        .with_context(|| format!("Failed to load config from {:?}", path))?;

    Ok(match draw_policy {
        Some(policy) => config.with_draw_policy(policy),
        None => config,
    })
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: GameConfig) -> Result<()> {
    info!(draw_policy = %config.draw_policy(), "Starting interactive game");

    let mut session = GameSession::new(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session
        .run(stdin.lock(), stdout.lock())
        .context("Interactive session failed")?;

    Ok(())
}

/// Apply a move list and print the final game
#[instrument(skip(config, moves))]
fn run_replay(config: GameConfig, json: bool, moves: &[String]) -> Result<()> {
    let mut session = GameSession::new(config);
    let outcome = session.replay(moves);

    if json {
        println!("{}", serde_json::to_string_pretty(session.game())?);
    } else {
        println!("{}", session.board_text());
    }

    outcome.context("Replay stopped")?;
    info!(count = moves.len(), "Replay finished");
    Ok(())
}
