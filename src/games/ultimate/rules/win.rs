//! Win detection, shared by sub-boards and the meta-board.

use super::super::{Board, Player, Position, SubBoardResult};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns true if `player` owns all three positions of any line.
///
/// `owner` reports who holds a position on the grid being checked.
pub fn completes_line(player: Player, owner: impl Fn(Position) -> Option<Player>) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&pos| owner(pos) == Some(player)))
}

/// Returns true if `player` has three in a row on the board.
#[instrument(skip(board))]
pub fn wins_board(board: &Board, player: Player) -> bool {
    completes_line(player, |pos| board.get(pos).player())
}

/// Returns true if `player` has won three sub-boards in a row.
#[instrument(skip(results))]
pub fn wins_meta(results: &[SubBoardResult; 9], player: Player) -> bool {
    completes_line(player, |pos| results[pos.to_index()].winner())
}

/// Checks if there is a winner on the board.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    Player::iter().find(|&player| wins_board(board, player))
}

/// Checks if a player has a line of won sub-boards.
#[instrument(skip(results))]
pub fn meta_winner(results: &[SubBoardResult; 9]) -> Option<Player> {
    Player::iter().find(|&player| wins_meta(results, player))
}

#[cfg(test)]
mod tests {
    use super::super::super::Square;
    use super::*;

    fn board_with(marks: &[(Position, Player)]) -> Board {
        let mut board = Board::new();
        for &(pos, player) in marks {
            board.set(pos, Square::Occupied(player));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert!(!wins_board(&board, Player::X));
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::X),
            (Position::TopRight, Player::X),
        ]);
        assert_eq!(check_winner(&board), Some(Player::X));
        assert!(!wins_board(&board, Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[
            (Position::TopRight, Player::O),
            (Position::Center, Player::O),
            (Position::BottomLeft, Player::O),
        ]);
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::O),
            (Position::TopRight, Player::X),
        ]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_meta_winner_ignores_drawn_boards() {
        let mut results = [SubBoardResult::Undecided; 9];
        results[0] = SubBoardResult::Won(Player::O);
        results[3] = SubBoardResult::Drawn;
        results[6] = SubBoardResult::Won(Player::O);
        assert_eq!(meta_winner(&results), None);

        results[3] = SubBoardResult::Won(Player::O);
        assert_eq!(meta_winner(&results), Some(Player::O));
        assert!(wins_meta(&results, Player::O));
        assert!(!wins_meta(&results, Player::X));
    }
}
