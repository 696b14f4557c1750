//! First-class move types for Ultimate Tic-Tac-Toe.
//!
//! A move names a sub-board and a cell within it. Moves can be built from
//! raw indices or from global 9x9 grid coordinates; both constructors
//! validate their input and report out-of-range values as [`IndexError`],
//! which is kept apart from [`IllegalMove`] (a well-formed move the rules
//! refuse right now).

use super::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the full 9x9 grid.
pub const GRID_SIZE: usize = 9;

/// A move: which sub-board, and which cell inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Sub-board on the meta grid.
    pub board: Position,
    /// Cell inside that sub-board. Also names the opponent's next board.
    pub cell: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(board: Position, cell: Position) -> Self {
        Self { board, cell }
    }

    /// Builds a move from zero-based board and cell indices.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if either index is outside 0-8.
    #[instrument]
    pub fn from_indices(board: usize, cell: usize) -> Result<Self, IndexError> {
        let board = Position::from_index(board).ok_or(IndexError::Board(board))?;
        let cell = Position::from_index(cell).ok_or(IndexError::Cell(cell))?;
        Ok(Self { board, cell })
    }

    /// Builds a move from global grid coordinates (row and column, 0-8).
    ///
    /// `board = 3 * (row / 3) + col / 3` and `cell = 3 * (row % 3) + col % 3`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Grid`] if either coordinate is outside 0-8.
    #[instrument]
    pub fn from_grid(row: usize, col: usize) -> Result<Self, IndexError> {
        // The board lookup fails once row or col reaches 9
        let board = Position::from_row_col(row / 3, col / 3);
        let cell = Position::from_row_col(row % 3, col % 3);
        match (board, cell) {
            (Some(board), Some(cell)) => Ok(Self { board, cell }),
            _ => Err(IndexError::Grid { row, col }),
        }
    }

    /// Global grid coordinates `(row, col)` of this move; inverse of [`Move::from_grid`].
    pub fn to_grid(self) -> (usize, usize) {
        (
            3 * self.board.row() + self.cell.row(),
            3 * self.board.col() + self.cell.col(),
        )
    }

    /// Board index (0-8).
    pub fn board_index(self) -> usize {
        self.board.to_index()
    }

    /// Cell index (0-8).
    pub fn cell_index(self) -> usize {
        self.cell.to_index()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.board.to_index(), self.cell.to_index())
    }
}

/// An index passed to the engine was outside the 0-8 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IndexError {
    /// Board index outside 0-8.
    #[display("Board index {} is out of range (must be 0-8)", _0)]
    Board(usize),

    /// Cell index outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    Cell(usize),

    /// Grid coordinate outside 0-8.
    #[display("Grid coordinate ({}, {}) is out of range (must be 0-8)", row, col)]
    Grid {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

impl std::error::Error for IndexError {}

/// Why a well-formed move was refused.
///
/// Variants are listed in the order the checks run: the first failing
/// check decides the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalMove {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The move targets a board other than the forced one.
    #[display("Must play in board {}, not board {}", required, attempted)]
    WrongBoard {
        /// Board the player is sent to.
        required: Position,
        /// Board the move targeted.
        attempted: Position,
    },

    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Move),

    /// The target board has already been decided.
    #[display("Board {} is already decided", _0)]
    BoardLocked(Position),
}

impl std::error::Error for IllegalMove {}
