//! Ultimate Tic-Tac-Toe: nine tic-tac-toe boards on a 3x3 meta grid.
//!
//! Winning a sub-board claims that square of the meta grid; three claimed
//! squares in a line win the game. The cell a player marks decides which
//! board the opponent must play in next.

mod action;
pub mod contracts;
mod game;
pub mod invariants;
mod position;
mod render;
pub mod rules;
mod types;

pub use action::{GRID_SIZE, IllegalMove, IndexError, Move};
pub use game::{GameState, MoveReport, SnapshotError};
pub use position::Position;
pub use render::render;
pub use types::{Board, DrawPolicy, GameStatus, Player, Square, Status, SubBoardResult};
