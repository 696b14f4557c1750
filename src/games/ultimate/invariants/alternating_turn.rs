//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// X moves first, so across all nine boards X has either as many marks as O
/// or exactly one more. While the game runs the player to move is the one
/// behind; once it ends the current player stays on whoever moved last.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let (x, o) = game.boards().iter().fold((0, 0), |(x, o), board| {
            (x + board.count(Player::X), o + board.count(Player::O))
        });

        if x != o && x != o + 1 {
            return false;
        }

        let expected = match (game.is_over(), x == o) {
            (false, true) => Player::X,
            (false, false) => Player::O,
            // Last mover keeps the turn
            (true, true) => Player::O,
            (true, false) => Player::X,
        };

        game.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
