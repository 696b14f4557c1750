//! Text-driven game session used by the terminal binary.
//!
//! A session owns one [`GameState`] and turns typed commands into calls on
//! it. It holds no rules of its own: every move goes through
//! [`GameState::play`] and every reply is built from the game's queries.

use crate::config::GameConfig;
use crate::games::ultimate::{GameState, IllegalMove, IndexError, Move, Position, render};
use derive_more::{Display, Error, From};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Board and cell, typed as `B C` or `B:C` with indices or labels
    /// (`center top-left`).
    Cell {
        /// Board index as typed.
        board: usize,
        /// Cell index as typed.
        cell: usize,
    },
    /// Global grid coordinates, typed as `R,C` or `rRcC`.
    Grid {
        /// Row as typed.
        row: usize,
        /// Column as typed.
        col: usize,
    },
    /// Start over.
    Reset,
    /// List legal moves.
    Moves,
    /// Print the game as JSON.
    Json,
    /// Print the accepted commands.
    Help,
    /// End the session.
    Quit,
    /// Blank line.
    Empty,
}

/// Input that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized input: '{}' (type 'help' for commands)", input)]
pub struct InputError {
    /// The offending input, trimmed.
    pub input: String,
}

fn pair(text: &str, separator: impl Fn(char) -> bool) -> Option<(usize, usize)> {
    let mut parts = text.split(separator).filter(|p| !p.is_empty());
    let first = parts.next()?.trim().parse().ok()?;
    let second = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

fn label_pair(text: &str) -> Option<(Position, Position)> {
    let mut parts = text
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let board = Position::from_label_or_number(parts.next()?)?;
    let cell = Position::from_label_or_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((board, cell))
}

impl Input {
    /// Parses one line of input.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let text = line.trim().to_lowercase();
        let unrecognized = || InputError {
            input: line.trim().to_string(),
        };

        match text.as_str() {
            "" => return Ok(Input::Empty),
            "reset" | "new" => return Ok(Input::Reset),
            "moves" | "legal" => return Ok(Input::Moves),
            "json" => return Ok(Input::Json),
            "help" | "?" => return Ok(Input::Help),
            "quit" | "exit" | "q" => return Ok(Input::Quit),
            _ => {}
        }

        if let Some(rest) = text.strip_prefix('r') {
            let (row, col) = rest
                .split_once('c')
                .and_then(|(row, col)| Some((row.trim().parse().ok()?, col.trim().parse().ok()?)))
                .ok_or_else(unrecognized)?;
            return Ok(Input::Grid { row, col });
        }

        if text.contains(',') {
            let (row, col) = pair(&text, |c| c == ',').ok_or_else(unrecognized)?;
            return Ok(Input::Grid { row, col });
        }

        if let Some((board, cell)) = pair(&text, |c: char| c == ':' || c.is_whitespace()) {
            return Ok(Input::Cell { board, cell });
        }

        let (board, cell) = label_pair(&text).ok_or_else(unrecognized)?;
        Ok(Input::Cell {
            board: board.to_index(),
            cell: cell.to_index(),
        })
    }
}

/// Errors that end a session.
#[derive(Debug, Display, Error, From)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[display("I/O error: {}", _0)]
    Io(std::io::Error),
    /// Serializing the game failed.
    #[display("JSON error: {}", _0)]
    Json(serde_json::Error),
}

/// Why a scripted replay stopped.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ReplayError {
    /// A token was not of the form `B:C`.
    #[display("Move {}: cannot parse '{}' (expected BOARD:CELL)", number, token)]
    Parse {
        /// One-based position in the move list.
        number: usize,
        /// The token as given.
        token: String,
    },
    /// A token named an index outside 0-8.
    #[display("Move {}: {}", number, source)]
    Index {
        /// One-based position in the move list.
        number: usize,
        /// The index error.
        source: IndexError,
    },
    /// The rules refused the move.
    #[display("Move {} ({}): {}", number, played, reason)]
    Illegal {
        /// One-based position in the move list.
        number: usize,
        /// The refused move.
        played: Move,
        /// Why it was refused.
        reason: IllegalMove,
    },
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Parse { .. } => None,
            ReplayError::Index { source, .. } => Some(source),
            ReplayError::Illegal { reason, .. } => Some(reason),
        }
    }
}

/// An interactive game driven by text commands.
#[derive(Debug, Clone)]
pub struct GameSession {
    game: GameState,
    config: GameConfig,
}

impl GameSession {
    /// Creates a session with a fresh game using the configured draw policy.
    #[instrument(skip(config), fields(draw_policy = %config.draw_policy()))]
    pub fn new(config: GameConfig) -> Self {
        info!("Creating new game session");
        Self {
            game: GameState::with_policy(*config.draw_policy()),
            config,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Renders the game with the configured coordinate guides.
    pub fn board_text(&self) -> String {
        render(&self.game, *self.config.show_coordinates())
    }

    /// Applies moves in `B:C` form, stopping at the first one that fails.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] naming the failing move; moves before it stay applied.
    #[instrument(skip(self, tokens))]
    pub fn replay<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), ReplayError> {
        for (i, token) in tokens.iter().enumerate() {
            let number = i + 1;
            let token = token.as_ref();
            let (board, cell) = pair(token, |c| c == ':').ok_or_else(|| ReplayError::Parse {
                number,
                token: token.to_string(),
            })?;
            let played = Move::from_indices(board, cell)
                .map_err(|source| ReplayError::Index { number, source })?;
            self.game
                .play(played)
                .map_err(|reason| ReplayError::Illegal {
                    number,
                    played,
                    reason,
                })?;
        }
        debug!(count = tokens.len(), "Replay complete");
        Ok(())
    }

    /// Handles one line of input and returns the text to show.
    ///
    /// Returns `Ok(None)` when the session should end.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Json`] if the game cannot be serialized.
    #[instrument(skip(self))]
    pub fn handle(&mut self, line: &str) -> Result<Option<String>, SessionError> {
        let input = match Input::parse(line) {
            Ok(input) => input,
            Err(e) => return Ok(Some(e.to_string())),
        };

        let reply = match input {
            Input::Quit => return Ok(None),
            Input::Empty => String::new(),
            Input::Help => HELP.to_string(),
            Input::Reset => {
                self.game.reset();
                self.board_text()
            }
            Input::Moves => {
                let moves = self.game.legal_moves();
                if moves.is_empty() {
                    "No legal moves".to_string()
                } else {
                    moves
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            }
            Input::Json => serde_json::to_string_pretty(&self.game)?,
            Input::Cell { board, cell } => self.try_move(Move::from_indices(board, cell)),
            Input::Grid { row, col } => self.try_move(Move::from_grid(row, col)),
        };
        Ok(Some(reply))
    }

    fn try_move(&mut self, parsed: Result<Move, IndexError>) -> String {
        let mv = match parsed {
            Ok(mv) => mv,
            Err(e) => {
                debug!(error = %e, "Index out of range");
                return format!("Invalid input: {}", e);
            }
        };
        match self.game.play(mv) {
            Ok(_) => self.board_text(),
            Err(reason) => format!("Illegal move: {}", reason),
        }
    }

    /// Runs the read-eval-print loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] on I/O or serialization failure.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), SessionError> {
        writeln!(output, "{}", self.board_text())?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.handle(&line)? {
                Some(reply) => {
                    if !reply.is_empty() {
                        writeln!(output, "{}", reply)?;
                    }
                }
                None => {
                    info!("Session ended by user");
                    return Ok(());
                }
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        warn!("Input closed before quit");
        Ok(())
    }
}

const HELP: &str = "\
Commands:
  B C | B:C     play cell C of board B (0-8 or a label like top-left)
  R,C | rRcC    play global row R, column C (both 0-8)
  moves         list legal moves
  json          print the game as JSON
  reset         start a new game
  quit          leave";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ultimate::{DrawPolicy, Player, Position, Square};

    #[test]
    fn test_parse_cell_forms() {
        assert_eq!(Input::parse("4 2"), Ok(Input::Cell { board: 4, cell: 2 }));
        assert_eq!(Input::parse(" 4:2 "), Ok(Input::Cell { board: 4, cell: 2 }));
        assert_eq!(Input::parse("12 0"), Ok(Input::Cell { board: 12, cell: 0 }));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(
            Input::parse("center top-left"),
            Ok(Input::Cell { board: 4, cell: 0 })
        );
        assert_eq!(
            Input::parse("Bottom-Right:4"),
            Ok(Input::Cell { board: 8, cell: 4 })
        );
        assert!(Input::parse("center nowhere").is_err());
    }

    #[test]
    fn test_label_input_plays_move() {
        let mut session = GameSession::new(GameConfig::default());
        session.handle("middle-left bottom-center").unwrap();
        assert_eq!(
            session.game().board(Position::MiddleLeft).get(Position::BottomCenter),
            Square::Occupied(Player::X)
        );
        assert_eq!(session.game().forced_board(), Some(Position::BottomCenter));
    }

    #[test]
    fn test_parse_grid_forms() {
        assert_eq!(Input::parse("3,7"), Ok(Input::Grid { row: 3, col: 7 }));
        assert_eq!(Input::parse("R3C7"), Ok(Input::Grid { row: 3, col: 7 }));
    }

    #[test]
    fn test_parse_keywords_and_garbage() {
        assert_eq!(Input::parse("QUIT"), Ok(Input::Quit));
        assert_eq!(Input::parse(""), Ok(Input::Empty));
        assert_eq!(Input::parse("moves"), Ok(Input::Moves));
        assert!(Input::parse("reset please").is_err());
        assert!(Input::parse("1 2 3").is_err());
        assert!(Input::parse("rxc1").is_err());
    }

    #[test]
    fn test_handle_reports_rejections() {
        let mut session = GameSession::new(GameConfig::default());
        session.handle("0 0").unwrap();

        let reply = session.handle("1 0").unwrap().unwrap();
        assert_eq!(
            reply,
            "Illegal move: Must play in board 0 (Top-left), not board 1 (Top-center)"
        );

        let reply = session.handle("0 9").unwrap().unwrap();
        assert_eq!(reply, "Invalid input: Cell index 9 is out of range (must be 0-8)");
    }

    #[test]
    fn test_grid_input_maps_to_board_and_cell() {
        let mut session = GameSession::new(GameConfig::default());
        session.handle("r4c5").unwrap();
        assert_eq!(
            session.game().board(Position::Center).get(Position::MiddleRight),
            Square::Occupied(Player::X)
        );
    }

    #[test]
    fn test_run_until_quit() {
        let config = GameConfig::default().with_show_coordinates(false);
        let mut session = GameSession::new(config);
        let mut out = Vec::new();

        session.run("4 4\nmoves\nquit\n4 0\n".as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Player O's turn"));
        assert!(text.contains("4:0 4:1 4:2 4:3 4:5 4:6 4:7 4:8"));
        // Input after quit is ignored
        assert_eq!(session.game().board(Position::Center).get(Position::TopLeft), Square::Empty);
    }

    #[test]
    fn test_replay_stops_at_first_failure() {
        let config = GameConfig::default().with_draw_policy(DrawPolicy::Explicit);
        let mut session = GameSession::new(config);
        let err = session.replay(&["0:0", "0:4", "9:1"]).unwrap_err();
        assert_eq!(
            err,
            ReplayError::Index {
                number: 3,
                source: IndexError::Board(9),
            }
        );
        assert_eq!(session.game().current_player(), Player::X);

        let err = session.replay(&["bogus"]).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { number: 1, .. }));
    }
}
