//! Game rules for three-in-a-row.
//!
//! Pure functions over board contents. Rules are kept apart from board
//! storage so they can be tested against hand-built grids.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Direction, check_winner, has_run, window_matches};

use super::{Board, Outcome};
use tracing::instrument;

/// Classifies the board.
///
/// A run for either mark wins, X checked first. Otherwise a full board is a
/// draw and anything else is undecided.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::NoDecision
    }
}
