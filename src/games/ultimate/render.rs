//! Plain-text rendering of a game.

use super::action::GRID_SIZE;
use super::game::GameState;
use super::position::Position;
use tracing::instrument;

const SEPARATOR: &str = "------+-------+------";
const COLUMN_HEADER: &str = "0 1 2   3 4 5   6 7 8";

/// Formats the game as a human-readable string.
///
/// The 9x9 grid comes first, one character per cell with `|` between
/// sub-boards, followed by a 3x3 summary of sub-board results, the status
/// line and where the next move must go. With `show_coordinates` the grid
/// carries global row and column numbers.
#[instrument(skip(game))]
pub fn render(game: &GameState, show_coordinates: bool) -> String {
    let margin = if show_coordinates { "   " } else { "" };
    let mut result = String::new();

    if show_coordinates {
        result.push_str(margin);
        result.push_str(COLUMN_HEADER);
        result.push('\n');
    }

    for row in 0..GRID_SIZE {
        if row > 0 && row % 3 == 0 {
            result.push_str(margin);
            result.push_str(SEPARATOR);
            result.push('\n');
        }
        if show_coordinates {
            result.push_str(&format!("{}  ", row));
        }
        let line = (0..GRID_SIZE)
            .map(|col| {
                let board = &game.boards()[3 * (row / 3) + col / 3];
                let cell = Position::ALL[3 * (row % 3) + col % 3];
                board.get(cell).glyph().to_string()
            })
            .collect::<Vec<_>>()
            .chunks(3)
            .map(|chunk| chunk.join(" "))
            .collect::<Vec<_>>()
            .join(" | ");
        result.push_str(&line);
        result.push('\n');
    }

    result.push_str("\nSub-boards:\n");
    for row in game.results().chunks(3) {
        let glyphs = row
            .iter()
            .map(|r| r.glyph().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        result.push_str(&glyphs);
        result.push('\n');
    }

    result.push('\n');
    result.push_str(&game.status().to_string());
    result.push('\n');

    if !game.is_over() {
        match game.forced_board() {
            Some(board) => result.push_str(&format!("Next move: board {}\n", board)),
            None => result.push_str("Next move: Any available board\n"),
        }
        if game.is_stalled() {
            result.push_str("No legal moves remain.\n");
        }
    }

    result
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render(self, false))
    }
}
