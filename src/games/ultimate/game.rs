//! The Ultimate Tic-Tac-Toe game state machine.

use super::action::{IllegalMove, IndexError, Move};
use super::contracts::{Contract, MoveContract};
use super::invariants::{InvariantSet, UltimateInvariants};
use super::position::Position;
use super::rules;
use super::types::{Board, DrawPolicy, GameStatus, Player, Square, Status, SubBoardResult};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Complete game state: nine sub-boards, their results, and turn bookkeeping.
///
/// The owner holds the only instance and mutates it through
/// [`GameState::attempt_move`], [`GameState::play`] and [`GameState::reset`].
/// Everything else is a read-only query.
///
/// Deserializing checks the game invariants, so a snapshot whose results,
/// turn or forced board disagree with its marks is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct GameState {
    /// Sub-boards in row-major order over the meta grid.
    pub(super) boards: [Board; 9],
    /// Cached result of each sub-board.
    pub(super) results: [SubBoardResult; 9],
    /// Player to move.
    pub(super) current_player: Player,
    /// Board the next move must target; `None` means any undecided board.
    pub(super) forced_board: Option<Position>,
    /// Game status.
    pub(super) status: GameStatus,
    /// How full boards without a line are treated.
    pub(super) draw_policy: DrawPolicy,
}

/// Field-for-field form of a serialized [`GameState`], not yet checked.
#[derive(Deserialize)]
struct GameSnapshot {
    boards: [Board; 9],
    results: [SubBoardResult; 9],
    current_player: Player,
    forced_board: Option<Position>,
    status: GameStatus,
    draw_policy: DrawPolicy,
}

/// A deserialized game broke one or more invariants.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Inconsistent game snapshot: {}", message)]
pub struct SnapshotError {
    /// The violated invariants, joined with `; `.
    pub message: String,
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        let game = Self {
            boards: snapshot.boards,
            results: snapshot.results,
            current_player: snapshot.current_player,
            forced_board: snapshot.forced_board,
            status: snapshot.status,
            draw_policy: snapshot.draw_policy,
        };

        UltimateInvariants::check_all(&game).map_err(|violations| {
            let message = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%message, "Rejected game snapshot");
            SnapshotError { message }
        })?;

        Ok(game)
    }
}

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// The move that was played.
    pub played: Move,
    /// Who played it.
    pub player: Player,
    /// Result of the board the move landed in, after the move.
    pub board_result: SubBoardResult,
    /// Board the next move must target.
    pub forced_board: Option<Position>,
    /// Game status after the move.
    pub status: GameStatus,
}

impl GameState {
    /// Creates a new game with the classic (parity) draw handling.
    #[instrument]
    pub fn new() -> Self {
        Self::with_policy(DrawPolicy::default())
    }

    /// Creates a new game with the given draw policy.
    #[instrument]
    pub fn with_policy(draw_policy: DrawPolicy) -> Self {
        Self {
            boards: Default::default(),
            results: [SubBoardResult::Undecided; 9],
            current_player: Player::X,
            forced_board: None,
            status: GameStatus::InProgress,
            draw_policy,
        }
    }

    /// Discards all progress. The draw policy is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::with_policy(self.draw_policy);
        info!(policy = %self.draw_policy, "Game reset");
    }

    /// Attempts a move by raw indices.
    ///
    /// Returns `Ok(true)` if the move was applied and `Ok(false)` if the rules
    /// refused it (game over, wrong board, occupied cell, decided board); a
    /// refused move leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `board_index` or `cell_index` is outside 0-8.
    #[instrument(skip(self))]
    pub fn attempt_move(
        &mut self,
        board_index: usize,
        cell_index: usize,
    ) -> Result<bool, IndexError> {
        let mv = Move::from_indices(board_index, cell_index)?;
        Ok(self.play(mv).is_ok())
    }

    /// Checks whether a move is currently legal without applying it.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in the order: game over, wrong board,
    /// occupied cell, decided board.
    pub fn check(&self, mv: Move) -> Result<(), IllegalMove> {
        MoveContract::pre(self, &mv)
    }

    /// Applies a move for the current player.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] describing the first rule the move breaks.
    /// The state is unchanged on error.
    #[instrument(
        skip(self),
        fields(board = mv.board_index(), cell = mv.cell_index(), player = %self.current_player)
    )]
    pub fn play(&mut self, mv: Move) -> Result<MoveReport, IllegalMove> {
        if let Err(reason) = MoveContract::pre(self, &mv) {
            debug!(%reason, "Move rejected");
            return Err(reason);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.current_player;
        self.boards[mv.board_index()].set(mv.cell, Square::Occupied(player));

        let board_result = self.settle_board(mv.board, player);
        if board_result == SubBoardResult::Won(player) && rules::wins_meta(&self.results, player) {
            self.status = GameStatus::Won(player);
            info!(winner = %player, "Game won");
        } else if self.draw_policy == DrawPolicy::Explicit
            && board_result.is_decided()
            && rules::all_decided(&self.results)
        {
            self.status = GameStatus::Draw;
            info!("Game drawn");
        }

        // The cell just played names the opponent's board
        self.forced_board = (!self.results[mv.cell_index()].is_decided()).then_some(mv.cell);

        if !self.status.is_over() {
            self.current_player = player.opponent();
        }

        #[cfg(debug_assertions)]
        super::contracts::assert_postconditions(&before, self);

        debug!(forced = ?self.forced_board, "Move applied");
        Ok(MoveReport {
            played: mv,
            player,
            board_result,
            forced_board: self.forced_board,
            status: self.status,
        })
    }

    /// Recomputes the result of one sub-board after `player` marked it.
    fn settle_board(&mut self, board: Position, player: Player) -> SubBoardResult {
        let idx = board.to_index();
        let cells = &self.boards[idx];

        if rules::wins_board(cells, player) {
            self.results[idx] = SubBoardResult::Won(player);
            debug!(board = idx, winner = %player, "Sub-board won");
        } else if self.draw_policy == DrawPolicy::Explicit && rules::is_drawn(cells) {
            self.results[idx] = SubBoardResult::Drawn;
            debug!(board = idx, "Sub-board drawn");
        }

        self.results[idx]
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the board the next move must target, if constrained.
    pub fn forced_board(&self) -> Option<Position> {
        self.forced_board
    }

    /// Returns true if the next move is constrained to one board.
    pub fn is_forced(&self) -> bool {
        self.forced_board.is_some()
    }

    /// Returns the game status.
    pub fn game_status(&self) -> GameStatus {
        self.status
    }

    /// Returns a snapshot of game-over flag, winner and current player.
    pub fn status(&self) -> Status {
        Status::from((self.status, self.current_player))
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the meta-game winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// Returns the draw policy this game was created with.
    pub fn draw_policy(&self) -> DrawPolicy {
        self.draw_policy
    }

    /// Returns one sub-board.
    pub fn board(&self, pos: Position) -> &Board {
        &self.boards[pos.to_index()]
    }

    /// Returns all nine sub-boards.
    pub fn boards(&self) -> &[Board; 9] {
        &self.boards
    }

    /// Returns the result of one sub-board.
    pub fn result(&self, pos: Position) -> SubBoardResult {
        self.results[pos.to_index()]
    }

    /// Returns the results of all nine sub-boards.
    pub fn results(&self) -> &[SubBoardResult; 9] {
        &self.results
    }

    /// Returns the mark at a move's target cell.
    pub fn square(&self, mv: Move) -> Square {
        self.board(mv.board).get(mv.cell)
    }

    /// Boards the next move may target.
    ///
    /// The forced board if there is one, otherwise every undecided board.
    /// Empty once the game is over.
    #[instrument(skip(self))]
    pub fn playable_boards(&self) -> Vec<Position> {
        if self.is_over() {
            return Vec::new();
        }
        match self.forced_board {
            Some(board) => vec![board],
            None => Position::ALL
                .iter()
                .copied()
                .filter(|pos| !self.result(*pos).is_decided())
                .collect(),
        }
    }

    /// Every move [`GameState::check`] currently accepts, in board then cell order.
    #[instrument(skip(self))]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.playable_boards()
            .into_iter()
            .flat_map(|board| {
                Position::empty_cells(self.board(board))
                    .into_iter()
                    .map(move |cell| Move::new(board, cell))
            })
            .filter(|mv| self.check(*mv).is_ok())
            .collect()
    }

    /// True when the game is still in progress but no move is legal.
    ///
    /// Only reachable under [`DrawPolicy::Parity`]: a filled board without a
    /// line is never marked decided, so the forced-board rule can send a
    /// player into it, or every board can be won without a meta line.
    pub fn is_stalled(&self) -> bool {
        !self.is_over() && self.legal_moves().is_empty()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
