//! First-class invariants for Ultimate Tic-Tac-Toe.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! State invariants look at one snapshot; transition invariants compare the
//! state before and after a move.

use derive_more::Display;

/// A logical property that must hold for a given state.
///
/// Invariants express system guarantees that should never be violated.
/// They are checked in debug builds and can be tested independently.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A property relating the state before a move to the state after it.
pub trait TransitionInvariant<S> {
    /// Checks if the invariant holds across the transition.
    fn holds(before: &S, after: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod forced_board;
pub mod permanent_marks;
pub mod result_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use forced_board::ForcedBoardInvariant;
pub use permanent_marks::PermanentMarksInvariant;
pub use result_consistent::ResultConsistentInvariant;

/// All single-state invariants of the game as a composable set.
pub type UltimateInvariants = (
    AlternatingTurnInvariant,
    ForcedBoardInvariant,
    ResultConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ultimate::{GameState, Move, Player, Position, Square};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameState::new();
        assert!(UltimateInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = GameState::new();
        for (b, c) in [(4, 4), (4, 0), (0, 4), (4, 8)] {
            game.play(Move::from_indices(b, c).unwrap()).unwrap();
        }
        assert!(UltimateInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = GameState::new();
        game.play(Move::from_indices(4, 4).unwrap()).unwrap();

        // An extra O mark breaks the turn count
        game.boards[0].set(Position::TopLeft, Square::Occupied(Player::O));
        game.boards[0].set(Position::TopCenter, Square::Occupied(Player::O));

        let violations = UltimateInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            AlternatingTurnInvariant::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameState::new();

        type TwoInvariants = (AlternatingTurnInvariant, ForcedBoardInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
