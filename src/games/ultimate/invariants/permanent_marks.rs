//! Permanent marks invariant: a move adds exactly one mark and overwrites nothing.

use super::super::{GameState, Position, Square};
use super::TransitionInvariant;

/// Invariant: Marks and decided results are permanent.
///
/// Across one move every occupied square keeps its mark, exactly one empty
/// square becomes occupied, and no decided board changes its result.
pub struct PermanentMarksInvariant;

impl TransitionInvariant<GameState> for PermanentMarksInvariant {
    fn holds(before: &GameState, after: &GameState) -> bool {
        let mut added = 0;

        for (old, new) in before.boards().iter().zip(after.boards()) {
            for pos in Position::ALL {
                match (old.get(pos), new.get(pos)) {
                    (Square::Empty, Square::Occupied(_)) => added += 1,
                    (a, b) if a != b => return false,
                    _ => {}
                }
            }
        }

        let results_kept = before
            .results()
            .iter()
            .zip(after.results())
            .all(|(old, new)| !old.is_decided() || old == new);

        added == 1 && results_kept
    }

    fn description() -> &'static str {
        "Each move adds one mark; marks and decided results never change"
    }
}
