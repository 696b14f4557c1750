//! Forced board invariant: a player is never sent to a decided board.

use super::super::GameState;
use super::Invariant;

/// Invariant: The forced board, if any, is undecided.
pub struct ForcedBoardInvariant;

impl Invariant<GameState> for ForcedBoardInvariant {
    fn holds(game: &GameState) -> bool {
        game.forced_board()
            .is_none_or(|board| !game.result(board).is_decided())
    }

    fn description() -> &'static str {
        "Forced board is never a decided board"
    }
}
