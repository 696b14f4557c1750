//! Command-line interface for strictly_ultimate.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_ultimate::DrawPolicy;

/// Strictly Ultimate - Ultimate Tic-Tac-Toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_ultimate")]
#[command(about = "Ultimate Tic-Tac-Toe rules engine with a terminal front end", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, reading moves from stdin
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured draw policy (parity or explicit)
        #[arg(long)]
        draw_policy: Option<DrawPolicy>,
    },

    /// Apply a list of moves and print the resulting game
    Replay {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured draw policy (parity or explicit)
        #[arg(long)]
        draw_policy: Option<DrawPolicy>,

        /// Print the final game as JSON instead of a board
        #[arg(long)]
        json: bool,

        /// Moves as BOARD:CELL, e.g. 4:0 0:4
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

impl Command {
    /// Config path and draw policy override shared by every subcommand.
    pub fn settings(&self) -> (Option<&PathBuf>, Option<DrawPolicy>) {
        match self {
            Command::Play {
                config,
                draw_policy,
            }
            | Command::Replay {
                config,
                draw_policy,
                ..
            } => (config.as_ref(), *draw_policy),
        }
    }
}
