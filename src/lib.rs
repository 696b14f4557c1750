//! Strictly Ultimate - a type-safe Ultimate Tic-Tac-Toe rules engine
//!
//! Nine tic-tac-toe boards sit on a 3x3 meta grid. The cell a player marks
//! sends the opponent to the matching board; winning a board claims it on
//! the meta grid, and three claimed boards in a line win the game.
//!
//! # Architecture
//!
//! - **Games**: the [`GameState`] aggregate, its move contract and invariants
//! - **Config**: TOML game settings ([`GameConfig`])
//! - **Session**: a text-driven session used by the terminal binary
//!
//! # Example
//!
//! ```
//! use strictly_ultimate::{GameState, Player, Position};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.attempt_move(4, 2), Ok(true));
//!
//! // O is sent to board 2 and cannot play elsewhere
//! assert_eq!(game.forced_board(), Some(Position::TopRight));
//! assert_eq!(game.attempt_move(4, 0), Ok(false));
//! assert_eq!(game.current_player(), Player::O);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Session
pub use session::{GameSession, Input, InputError, ReplayError, SessionError};

// Crate-level exports - Game types
pub use games::ultimate::{
    Board, DrawPolicy, GRID_SIZE, GameState, GameStatus, IllegalMove, IndexError, Move,
    MoveReport, Player, Position, SnapshotError, Square, Status, SubBoardResult, render,
};

// Crate-level exports - Rules, contracts and invariants
pub use games::ultimate::{contracts, invariants, rules};
