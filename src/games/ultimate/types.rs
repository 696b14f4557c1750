//! Core domain types for Ultimate Tic-Tac-Toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A single cell of a sub-board: empty, or holding a player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the player whose mark is here, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    /// Single-character glyph used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Player::X) => 'X',
            Square::Occupied(Player::O) => 'O',
        }
    }
}

/// One ordinary 3x3 tic-tac-toe board.
///
/// Nine of these make up the meta-board; each is addressed by a [`Position`]
/// on the meta grid and its cells by a [`Position`] inside the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    ///
    /// Legality is the caller's concern; the game only ever writes to empty squares.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Counts the marks a player has on this board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }
}

/// Result of a single sub-board.
///
/// A board accepts moves only while `Undecided`; any other value locks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubBoardResult {
    /// No line completed yet.
    #[default]
    Undecided,
    /// A player completed a line on this board.
    Won(Player),
    /// Board filled with no line. Only produced under [`DrawPolicy::Explicit`].
    Drawn,
}

impl SubBoardResult {
    /// Returns true once the board no longer accepts moves.
    pub fn is_decided(self) -> bool {
        !matches!(self, SubBoardResult::Undecided)
    }

    /// Returns the player who won this board, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            SubBoardResult::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Single-character glyph used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            SubBoardResult::Undecided => '.',
            SubBoardResult::Won(Player::X) => 'X',
            SubBoardResult::Won(Player::O) => 'O',
            SubBoardResult::Drawn => '=',
        }
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once no further moves are accepted.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// How filled boards without a line are treated.
///
/// The classic rules never declare a draw: a full board with no line stays
/// undecided and is only unplayable because every cell is taken, and a meta
/// grid with no winning line simply runs out of moves. `Explicit` closes
/// both gaps.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DrawPolicy {
    /// No drawn sub-boards and no meta draw. A game can stall with no legal moves.
    #[default]
    Parity,
    /// Full boards without a line become [`SubBoardResult::Drawn`]; nine decided
    /// boards without a meta line end the game in a draw.
    Explicit,
}

/// Snapshot of whose turn it is and whether the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
    /// True once the game has ended.
    pub game_over: bool,
    /// Winner of the meta game. `None` while in progress or after a draw.
    pub winner: Option<Player>,
    /// Player to move (or the player who made the final move once over).
    pub current_player: Player,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.game_over, self.winner) {
            (true, Some(winner)) => write!(f, "Game over! Player {} wins!", winner),
            (true, None) => write!(f, "Game over! It's a draw."),
            (false, _) => write!(f, "Player {}'s turn", self.current_player),
        }
    }
}

impl From<(GameStatus, Player)> for Status {
    fn from((status, current_player): (GameStatus, Player)) -> Self {
        Self {
            game_over: status.is_over(),
            winner: status.winner(),
            current_player,
        }
    }
}
