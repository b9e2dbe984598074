//! Draw detection.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if every cell holds a mark.
///
/// A full board with no winner is a cat's game.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().flatten().all(|s| *s != Square::Empty)
}
