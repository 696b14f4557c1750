//! Game rules for Ultimate Tic-Tac-Toe.
//!
//! Pure functions over board and meta-board state. The same eight lines
//! decide a sub-board (over its squares) and the game (over the nine
//! sub-board results), so both levels share one line check.

pub mod draw;
pub mod win;

pub use draw::{all_decided, is_drawn, is_full};
pub use win::{LINES, check_winner, completes_line, meta_winner, wins_board, wins_meta};
