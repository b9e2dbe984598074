//! Error types for board access and session bookkeeping.

use derive_more::{Display, Error, From};

/// Error raised when a position cannot be used on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The position lies outside `[1, BOARD_SIZE]` on either axis.
    #[display("Position ({row}, {column}) is not on the board")]
    OutOfBounds {
        /// Requested row (1-based).
        row: usize,
        /// Requested column (1-based).
        column: usize,
    },
}

/// Error raised when the tally is asked to record something impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum TallyError {
    /// A round was recorded before the board reached a terminal outcome.
    #[display("Cannot record a round that has no decision")]
    UndecidedRound,
}

/// Error raised by the round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// Board access failed.
    #[display("{_0}")]
    Board(BoardError),
    /// Tally bookkeeping failed.
    #[display("{_0}")]
    Tally(TallyError),
    /// A move was submitted while no turn was active.
    #[display("No round is in progress")]
    #[from(ignore)]
    RoundNotActive,
}
