//! Round lifecycle: turn alternation tied to session bookkeeping.

use super::board::Board;
use super::error::SessionError;
use super::phases::Outcome;
use super::position::Position;
use super::tally::SessionTally;
use super::types::Mark;
use tracing::{debug, info, instrument, warn};

/// What happened to a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnReport {
    /// The cell was taken; the same player moves again.
    Occupied,
    /// The mark was placed and the round continues.
    Placed {
        /// Player who moved.
        mark: Mark,
        /// Player to move next.
        next: Mark,
    },
    /// The mark was placed and ended the round. The tally is already updated.
    RoundOver(Outcome),
}

/// One board and one tally, owned together for the life of a session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
    tally: SessionTally,
}

impl Session {
    /// Creates a session with an empty board and zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the tally.
    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    /// Clears the board, counts a new round and gives X the first move.
    #[instrument(skip(self))]
    pub fn begin_round(&mut self) {
        self.board.reset();
        self.tally.start_round();
        self.board.start_round();
        info!(round = self.tally.round_number(), "Round started");
    }

    /// Returns the player to move, or `None` outside an active round.
    pub fn current_turn(&self) -> Option<Mark> {
        self.board.phase().to_move()
    }

    /// Plays the current player's mark at `pos`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::RoundNotActive`] if no turn is active.
    /// - [`SessionError::Board`] if `pos` is off the board.
    #[instrument(skip(self), fields(turn = ?self.current_turn()))]
    pub fn submit(&mut self, pos: Position) -> Result<TurnReport, SessionError> {
        let mark = self.current_turn().ok_or(SessionError::RoundNotActive)?;

        if !self.board.is_occupiable(pos)? {
            debug!(%pos, "Cell already taken");
            return Ok(TurnReport::Occupied);
        }

        self.board.place(pos, mark)?;
        let outcome = self.board.evaluate();
        if outcome.is_decided() {
            self.tally.record(outcome)?;
            info!(%outcome, "Round over");
            return Ok(TurnReport::RoundOver(outcome));
        }

        Ok(TurnReport::Placed {
            mark,
            next: mark.opponent(),
        })
    }

    /// Ends the active round with no winner recorded.
    ///
    /// Returns false if no round was active.
    #[instrument(skip(self))]
    pub fn abort_round(&mut self) -> bool {
        if self.current_turn().is_none() {
            return false;
        }
        warn!(round = self.tally.round_number(), "Round aborted");
        self.tally.record_abort();
        self.board.reset();
        true
    }

    /// Discards the tally and clears the board.
    #[instrument(skip(self))]
    pub fn end_session(&mut self) {
        info!(rounds = self.tally.round_number(), "Session ended");
        self.tally.reset();
        self.board.reset();
    }
}
