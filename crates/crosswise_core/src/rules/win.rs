//! Win detection by sliding a `WIN_LENGTH` window across the board.

use super::super::{Board, Mark, Square, BOARD_SIZE, WIN_LENGTH};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Orientation of a window of consecutive cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Direction {
    /// Along a row, left to right.
    Horizontal,
    /// Down a column.
    Vertical,
    /// Down and to the right.
    Falling,
    /// Up and to the right, anchored at the window's top-left corner.
    Rising,
}

impl Direction {
    /// Offset of the `step`-th cell from the window's top-left corner.
    fn offset(self, step: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, step),
            Direction::Vertical => (step, 0),
            Direction::Falling => (step, step),
            Direction::Rising => (WIN_LENGTH - 1 - step, step),
        }
    }
}

/// Returns true if the window starting at `(row, column)` (0-based top-left
/// corner of its bounding box) holds `mark` in every cell.
///
/// Windows that extend past the edge never match.
pub fn window_matches(
    board: &Board,
    mark: Mark,
    row: usize,
    column: usize,
    direction: Direction,
) -> bool {
    (0..WIN_LENGTH).all(|step| {
        let (dr, dc) = direction.offset(step);
        board.cell(row + dr, column + dc) == Some(Square::Occupied(mark))
    })
}

/// Returns true if `mark` has a run anywhere on the board.
#[instrument(skip(board))]
pub fn has_run(board: &Board, mark: Mark) -> bool {
    Direction::iter().any(|direction| {
        (0..BOARD_SIZE).any(|row| {
            (0..BOARD_SIZE).any(|column| window_matches(board, mark, row, column, direction))
        })
    })
}

/// Returns the mark holding a run, checking X before O.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    Mark::iter().find(|mark| has_run(board, *mark))
}
