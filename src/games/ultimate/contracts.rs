//! Contract-based validation for Ultimate Tic-Tac-Toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{IllegalMove, Move};
use super::game::GameState;
use super::invariants::{
    InvariantSet, InvariantViolation, PermanentMarksInvariant, TransitionInvariant,
    UltimateInvariants,
};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The game must still be in progress.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`IllegalMove::GameOver`] once the game has ended.
    #[instrument(skip(game))]
    pub fn check(_mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        if game.is_over() {
            Err(IllegalMove::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The move targets the forced board, if there is one.
pub struct OnForcedBoard;

impl OnForcedBoard {
    /// Fails with [`IllegalMove::WrongBoard`] when the move ignores the forced board.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        match game.forced_board() {
            Some(required) if required != mov.board => Err(IllegalMove::WrongBoard {
                required,
                attempted: mov.board,
            }),
            _ => Ok(()),
        }
    }
}

/// Precondition: The target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`IllegalMove::CellOccupied`] when the cell holds a mark.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        if !game.board(mov.board).is_empty(mov.cell) {
            Err(IllegalMove::CellOccupied(*mov))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target board must not be decided.
pub struct BoardUndecided;

impl BoardUndecided {
    /// Fails with [`IllegalMove::BoardLocked`] when the board is won or drawn.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        if game.result(mov.board).is_decided() {
            Err(IllegalMove::BoardLocked(mov.board))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: all move checks, in order. The first failure wins.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        GameNotOver::check(mov, game)?;
        OnForcedBoard::check(mov, game)?;
        CellIsEmpty::check(mov, game)?;
        BoardUndecided::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game is not over
/// - Move is on the forced board, if any
/// - Cell is empty
/// - Board is undecided
///
/// Postconditions:
/// - Exactly one mark added; marks and decided results kept
/// - Players still alternate
/// - Forced board is undecided
/// - Results and status match the grid
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), IllegalMove> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match UltimateInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if !PermanentMarksInvariant::holds(before, after) {
            violations.push(InvariantViolation::new(
                PermanentMarksInvariant::description(),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Asserts that a move's postconditions hold (panics on violation).
///
/// Called from [`GameState::play`] in debug builds only.
#[instrument(skip_all)]
pub fn assert_postconditions(before: &GameState, after: &GameState) {
    if let Err(violations) = MoveContract::post(before, after) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        panic!("Postcondition failed: {}", descriptions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ultimate::{Player, Position, Square, SubBoardResult};

    fn mv(board: usize, cell: usize) -> Move {
        Move::from_indices(board, cell).unwrap()
    }

    #[test]
    fn test_precondition_fresh_game() {
        let game = GameState::new();
        assert!(MoveContract::pre(&game, &mv(4, 4)).is_ok());
    }

    #[test]
    fn test_precondition_wrong_board() {
        let mut game = GameState::new();
        game.play(mv(4, 2)).unwrap();
        assert_eq!(
            MoveContract::pre(&game, &mv(5, 0)),
            Err(IllegalMove::WrongBoard {
                required: Position::TopRight,
                attempted: Position::MiddleRight,
            })
        );
    }

    #[test]
    fn test_precondition_order_game_over_first() {
        let mut game = GameState::new();
        game.status = crate::games::ultimate::GameStatus::Won(Player::X);
        game.forced_board = Some(Position::Center);
        // Wrong board and game over: game over reported
        assert_eq!(MoveContract::pre(&game, &mv(0, 0)), Err(IllegalMove::GameOver));
    }

    #[test]
    fn test_precondition_occupied_before_locked() {
        let mut game = GameState::new();
        game.boards[2].set(Position::Center, Square::Occupied(Player::X));
        game.results[2] = SubBoardResult::Won(Player::X);

        assert_eq!(
            MoveContract::pre(&game, &mv(2, 4)),
            Err(IllegalMove::CellOccupied(mv(2, 4)))
        );
        assert_eq!(
            MoveContract::pre(&game, &mv(2, 0)),
            Err(IllegalMove::BoardLocked(Position::TopRight))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::new();
        let mut after = before.clone();
        after.play(mv(4, 4)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = GameState::new();
        let mut after = before.clone();
        after.play(mv(4, 4)).unwrap();

        // Second mark without a turn change
        after.boards[7].set(Position::TopLeft, Square::Occupied(Player::O));

        let violations = MoveContract::post(&before, &after).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    #[should_panic(expected = "Postcondition failed")]
    fn test_assert_postconditions_panics() {
        let game = GameState::new();
        assert_postconditions(&game, &game);
    }
}
