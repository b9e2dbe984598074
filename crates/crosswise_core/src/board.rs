//! The game board and its per-round phase.

use super::error::BoardError;
use super::phases::{Outcome, Phase};
use super::position::Position;
use super::rules;
use super::types::{BOARD_SIZE, Grid, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A `BOARD_SIZE` × `BOARD_SIZE` grid plus the phase of the round being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: Grid,
    phase: Phase,
}

impl Board {
    /// Creates an empty board in [`Phase::NewRound`].
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; BOARD_SIZE]; BOARD_SIZE],
            phase: Phase::NewRound,
        }
    }

    /// Clears every cell and returns to [`Phase::NewRound`].
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Board reset");
    }

    /// Moves a fresh board into X's turn. Does nothing in any other phase.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn start_round(&mut self) {
        if self.phase == Phase::NewRound {
            self.phase = Phase::PlayerXTurn;
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns all cells.
    pub fn squares(&self) -> &Grid {
        &self.squares
    }

    /// Reads a cell by 0-based indices. `None` off the grid.
    ///
    /// This and [`Board::cell_mut`] are the only places the grid is indexed.
    pub fn cell(&self, row: usize, column: usize) -> Option<Square> {
        self.squares.get(row)?.get(column).copied()
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Square> {
        self.squares.get_mut(row)?.get_mut(column)
    }

    /// Reads the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is off the board.
    pub fn get(&self, pos: Position) -> Result<Square, BoardError> {
        let (row, column) = pos.to_index()?;
        self.cell(row, column).ok_or(BoardError::OutOfBounds {
            row: pos.row(),
            column: pos.column(),
        })
    }

    /// Returns true iff the cell at `pos` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is off the board.
    #[instrument(skip(self))]
    pub fn is_occupiable(&self, pos: Position) -> Result<bool, BoardError> {
        Ok(self.get(pos)? == Square::Empty)
    }

    /// Writes `mark` at `pos` and hands the turn to the other player.
    ///
    /// Occupancy is not checked here; an existing mark is overwritten.
    /// Callers that must not overwrite ask [`Board::is_occupiable`] first.
    /// From [`Phase::NewRound`] the turn passes to the opponent of `mark`.
    /// Terminal phases are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is off the board.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), BoardError> {
        let (row, column) = pos.to_index()?;
        let cell = self.cell_mut(row, column).ok_or(BoardError::OutOfBounds {
            row: pos.row(),
            column: pos.column(),
        })?;
        *cell = Square::Occupied(mark);

        self.phase = match self.phase {
            Phase::PlayerXTurn => Phase::PlayerOTurn,
            Phase::PlayerOTurn => Phase::PlayerXTurn,
            Phase::NewRound => Phase::turn(mark.opponent()),
            terminal => terminal,
        };
        debug!(next = ?self.phase, "Mark placed");
        Ok(())
    }

    /// Evaluates the grid and moves to the matching terminal phase.
    ///
    /// The phase is left as is on [`Outcome::NoDecision`]. Calling this twice
    /// without an intervening [`Board::place`] yields the same result.
    #[instrument(skip(self))]
    pub fn evaluate(&mut self) -> Outcome {
        let outcome = rules::evaluate(self);
        if let Some(phase) = outcome.phase() {
            self.phase = phase;
        }
        debug!(?outcome, phase = ?self.phase, "Board evaluated");
        outcome
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Positions whose cells are still empty, in row-major order.
    pub fn open_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|pos| matches!(self.get(*pos), Ok(Square::Empty)))
            .collect()
    }

    /// Formats the board as rows of symbols with 1-based headers.
    pub fn display(&self) -> String {
        let mut result = String::from(" ");
        for column in 1..=BOARD_SIZE {
            result.push_str(&format!(" {}", column));
        }
        for (row, cells) in self.squares.iter().enumerate() {
            result.push('\n');
            result.push_str(&(row + 1).to_string());
            for square in cells {
                result.push(' ');
                result.push(square.symbol());
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.phase(), Phase::NewRound);
        assert_eq!(board.open_positions().len(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn test_place_alternates_turns() {
        let mut board = Board::new();
        board.start_round();
        assert_eq!(board.phase(), Phase::PlayerXTurn);

        board.place(Position::new(1, 1), Mark::X).unwrap();
        assert_eq!(board.phase(), Phase::PlayerOTurn);

        board.place(Position::new(2, 2), Mark::O).unwrap();
        assert_eq!(board.phase(), Phase::PlayerXTurn);
    }

    #[test]
    fn test_place_from_new_round_hands_turn_to_opponent() {
        let mut board = Board::new();
        board.place(Position::new(3, 3), Mark::X).unwrap();
        assert_eq!(board.phase(), Phase::PlayerOTurn);
    }

    #[test]
    fn test_start_round_only_from_new_round() {
        let mut board = Board::new();
        board.start_round();
        board.place(Position::new(1, 1), Mark::X).unwrap();
        board.start_round();
        assert_eq!(board.phase(), Phase::PlayerOTurn);
    }

    #[test]
    fn test_terminal_phase_survives_place() {
        let mut board = Board::new();
        board.start_round();
        for column in 1..=3 {
            board.place(Position::new(1, column), Mark::O).unwrap();
        }
        assert_eq!(board.evaluate(), Outcome::Win(Mark::O));
        board.place(Position::new(4, 4), Mark::X).unwrap();
        assert_eq!(board.phase(), Phase::PlayerOWin);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new();
        assert_eq!(
            board.get(Position::new(1, 0)),
            Err(BoardError::OutOfBounds { row: 1, column: 0 })
        );
        assert_eq!(board.cell(BOARD_SIZE, 0), None);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.place(Position::new(1, 2), Mark::X).unwrap();
        board.place(Position::new(4, 4), Mark::O).unwrap();
        assert_eq!(
            board.display(),
            "  1 2 3 4\n1 . X . .\n2 . . . .\n3 . . . .\n4 . . . O"
        );
    }
}
