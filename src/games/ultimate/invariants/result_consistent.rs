//! Result consistency invariant: cached results agree with the marks on the boards.

use super::super::rules::{all_decided, is_full, meta_winner, wins_board};
use super::super::{DrawPolicy, GameState, GameStatus, Player, SubBoardResult};
use super::Invariant;
use tracing::warn;

/// Invariant: Sub-board results and game status match the grid.
///
/// - `Won(p)`: `p` has a line on that board and the opponent does not.
/// - `Undecided`: nobody has a line; under the explicit policy the board is not full.
/// - `Drawn`: only under the explicit policy, on a full board without a line.
/// - The status is `Won(p)` exactly when `p` has a meta line; `Draw` only
///   under the explicit policy once every board is decided.
pub struct ResultConsistentInvariant;

impl ResultConsistentInvariant {
    fn board_consistent(game: &GameState, idx: usize) -> bool {
        let board = &game.boards()[idx];
        let explicit = game.draw_policy() == DrawPolicy::Explicit;
        let lines = (wins_board(board, Player::X), wins_board(board, Player::O));

        match game.results()[idx] {
            SubBoardResult::Won(p) => wins_board(board, p) && !wins_board(board, p.opponent()),
            SubBoardResult::Undecided => lines == (false, false) && !(explicit && is_full(board)),
            SubBoardResult::Drawn => explicit && is_full(board) && lines == (false, false),
        }
    }
}

impl Invariant<GameState> for ResultConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        if let Some(idx) = (0..9).find(|&idx| !Self::board_consistent(game, idx)) {
            warn!(board = idx, result = ?game.results()[idx], "Sub-board result out of sync");
            return false;
        }

        let meta = meta_winner(game.results());
        let explicit = game.draw_policy() == DrawPolicy::Explicit;

        match game.game_status() {
            GameStatus::Won(p) => meta == Some(p),
            GameStatus::Draw => explicit && meta.is_none() && all_decided(game.results()),
            GameStatus::InProgress => meta.is_none() && !(explicit && all_decided(game.results())),
        }
    }

    fn description() -> &'static str {
        "Sub-board results and game status match the marks on the grid"
    }
}
