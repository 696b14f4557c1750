//! Tests for how full boards and exhausted meta grids are handled.

use strictly_ultimate::{
    DrawPolicy, GameState, GameStatus, Player, Position, Square, SubBoardResult,
};

fn play_all(game: &mut GameState, moves: &[(usize, usize)]) {
    for (i, &(board, cell)) in moves.iter().enumerate() {
        assert_eq!(
            game.attempt_move(board, cell),
            Ok(true),
            "move {} ({}:{}) should be accepted",
            i,
            board,
            cell
        );
    }
}

/// Fills board 7 with no line on move 31, then sends X into it.
const FILL_BOARD_SEVEN: [(usize, usize); 32] = [
    (7, 1),
    (1, 0),
    (0, 7),
    (7, 2),
    (2, 1),
    (1, 4),
    (4, 4),
    (4, 0),
    (0, 6),
    (6, 1),
    (1, 7),
    (7, 3),
    (3, 0),
    (0, 3),
    (3, 2),
    (2, 4),
    (4, 5),
    (5, 8),
    (8, 7),
    (7, 0),
    (0, 2),
    (2, 7),
    (7, 6),
    (6, 7),
    (7, 4),
    (4, 7),
    (7, 8),
    (8, 3),
    (3, 7),
    (7, 7),
    (7, 5), // board 7 full, no line
    (5, 7), // sends X to board 7
];

/// Decides all nine boards without a meta line.
const NO_META_LINE: [(usize, usize); 44] = [
    (1, 2),
    (2, 5),
    (5, 3),
    (3, 0),
    (0, 4),
    (4, 2),
    (2, 8),
    (8, 0),
    (0, 7),
    (7, 6),
    (6, 8),
    (8, 8),
    (8, 7),
    (7, 0),
    (0, 3),
    (3, 4),
    (4, 1),
    (1, 6),
    (6, 7),
    (7, 8),
    (8, 1),
    (1, 0),
    (0, 8),
    (8, 4),
    (4, 8),
    (7, 7),
    (4, 7),
    (3, 8),
    (1, 1),
    (1, 3),
    (6, 6),
    (2, 2),
    (2, 3),
    (0, 5),
    (5, 8),
    (2, 1),
    (5, 0),
    (0, 1),
    (5, 6),
    (4, 3),
    (4, 4),
    (0, 0),
    (0, 6),
    (2, 0),
];

const NO_META_LINE_RESULTS: [SubBoardResult; 9] = [
    SubBoardResult::Won(Player::X),
    SubBoardResult::Won(Player::O),
    SubBoardResult::Won(Player::O),
    SubBoardResult::Won(Player::O),
    SubBoardResult::Won(Player::X),
    SubBoardResult::Won(Player::X),
    SubBoardResult::Won(Player::X),
    SubBoardResult::Won(Player::O),
    SubBoardResult::Won(Player::O),
];

#[test]
fn test_default_policy_is_parity() {
    assert_eq!(GameState::new().draw_policy(), DrawPolicy::Parity);
    assert_eq!(GameState::default(), GameState::with_policy(DrawPolicy::Parity));
}

#[test]
fn test_parity_full_board_stays_undecided_and_stalls() {
    let mut game = GameState::with_policy(DrawPolicy::Parity);
    play_all(&mut game, &FILL_BOARD_SEVEN);

    let board = game.board(Position::BottomCenter);
    assert!(board.squares().iter().all(|s| *s != Square::Empty));
    assert_eq!(board.count(Player::X), 5);
    assert_eq!(board.count(Player::O), 4);

    assert!(game.results().iter().all(|r| *r == SubBoardResult::Undecided));
    assert_eq!(game.forced_board(), Some(Position::BottomCenter));
    assert_eq!(game.current_player(), Player::X);
    assert!(!game.is_over());
    assert!(game.legal_moves().is_empty());
    assert!(game.is_stalled());

    // Every attempt on the forced board hits an occupied cell
    for cell in 0..9 {
        assert_eq!(game.attempt_move(7, cell), Ok(false));
    }
}

#[test]
fn test_explicit_full_board_is_drawn_and_frees_next_move() {
    let mut game = GameState::with_policy(DrawPolicy::Explicit);
    play_all(&mut game, &FILL_BOARD_SEVEN[..31]);
    assert_eq!(game.result(Position::BottomCenter), SubBoardResult::Drawn);

    play_all(&mut game, &FILL_BOARD_SEVEN[31..]);
    assert_eq!(game.forced_board(), None);
    assert_eq!(game.current_player(), Player::X);
    assert_eq!(game.legal_moves().len(), 49);
    assert!(!game.is_stalled());
    assert!(!game.playable_boards().contains(&Position::BottomCenter));
}

#[test]
fn test_parity_exhausted_meta_grid_stalls() {
    let mut game = GameState::with_policy(DrawPolicy::Parity);
    play_all(&mut game, &NO_META_LINE);

    assert_eq!(*game.results(), NO_META_LINE_RESULTS);
    assert_eq!(game.game_status(), GameStatus::InProgress);
    assert_eq!(game.forced_board(), None);
    assert!(game.playable_boards().is_empty());
    assert!(game.is_stalled());
    assert_eq!(game.status().to_string(), "Player X's turn");
}

#[test]
fn test_explicit_exhausted_meta_grid_is_draw() {
    let mut game = GameState::with_policy(DrawPolicy::Explicit);
    play_all(&mut game, &NO_META_LINE[..43]);
    assert!(!game.is_over());

    let (board, cell) = NO_META_LINE[43];
    assert_eq!(game.attempt_move(board, cell), Ok(true));

    assert_eq!(*game.results(), NO_META_LINE_RESULTS);
    assert_eq!(game.game_status(), GameStatus::Draw);
    assert!(game.is_over());
    assert_eq!(game.winner(), None);
    // Last mover keeps the turn
    assert_eq!(game.current_player(), Player::O);
    assert_eq!(game.status().to_string(), "Game over! It's a draw.");
    assert!(!game.is_stalled());
}

#[test]
fn test_policy_parses_from_text() {
    assert_eq!("explicit".parse::<DrawPolicy>().unwrap(), DrawPolicy::Explicit);
    assert_eq!("parity".parse::<DrawPolicy>().unwrap(), DrawPolicy::Parity);
    assert!("sometimes".parse::<DrawPolicy>().is_err());
    assert_eq!(DrawPolicy::Explicit.to_string(), "explicit");
}
