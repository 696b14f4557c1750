//! Fullness and draw detection.

use super::super::{Board, Square, SubBoardResult};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no line.
#[instrument(skip(board))]
pub fn is_drawn(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

/// Checks if every sub-board has been decided.
#[instrument(skip(results))]
pub fn all_decided(results: &[SubBoardResult; 9]) -> bool {
    results.iter().all(|r| r.is_decided())
}
