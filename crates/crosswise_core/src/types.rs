//! Core domain types for three-in-a-row.

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of consecutive marks needed to win, independent of [`BOARD_SIZE`].
pub const WIN_LENGTH: usize = 3;

/// Cells in row-major order, indexed `[row][column]` from 0.
pub type Grid = [[Square; BOARD_SIZE]; BOARD_SIZE];

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (moves first).
    X,
    /// Player O (moves second).
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a player's mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    /// Single-character symbol used in text renderings.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}
