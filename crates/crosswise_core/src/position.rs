//! User-facing board coordinates.

use super::error::BoardError;
use super::types::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell address in 1-based `(row, column)` coordinates.
///
/// No validation happens at construction. Whether a position is usable
/// depends on the board it is applied to, so the check is deferred to
/// [`Position::to_index`], the single place where coordinates are turned
/// into grid indices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    /// Row, counted from 1.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column, counted from 1.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Converts to 0-based `(row, column)` grid indices.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] unless both coordinates fall in
    /// `1..=BOARD_SIZE`.
    pub fn to_index(self) -> Result<(usize, usize), BoardError> {
        if (1..=BOARD_SIZE).contains(&self.row) && (1..=BOARD_SIZE).contains(&self.column) {
            Ok((self.row - 1, self.column - 1))
        } else {
            Err(BoardError::OutOfBounds {
                row: self.row,
                column: self.column,
            })
        }
    }

    /// Builds a position from 0-based grid indices.
    pub fn from_index(row: usize, column: usize) -> Self {
        Self::new(row + 1, column + 1)
    }

    /// Every position on the board in row-major order.
    #[instrument]
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=BOARD_SIZE)
            .flat_map(|row| (1..=BOARD_SIZE).map(move |column| Position::new(row, column)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Error parsing a position from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Expected \"row,column\", got {input:?}")]
pub struct ParsePositionError {
    /// The rejected input.
    pub input: String,
}

impl std::str::FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `"row,column"`, tolerating whitespace and surrounding parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError {
            input: s.to_string(),
        };
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, column) = trimmed.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let column = column.trim().parse().map_err(|_| err())?;
        Ok(Position::new(row, column))
    }
}
