//! Per-session bookkeeping across rounds.

use super::error::TallyError;
use super::phases::Outcome;
use super::types::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Win, draw and streak counters for one session.
///
/// Every counter starts at zero. `round_number` moves when a round starts;
/// the result counters move once per finished round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionTally {
    /// Rounds won by X.
    wins_x: u32,
    /// Rounds won by O.
    wins_o: u32,
    /// Cat's games.
    draws: u32,
    /// Rounds ended by abort or timeout.
    aborted: u32,
    /// Number of the round in progress (or last played), from 1.
    round_number: u32,
    /// Consecutive rounds won by `last_winner`.
    win_streak: u32,
    /// Winner of the previous finished round.
    last_winner: Option<Mark>,
}

impl SessionTally {
    /// Creates a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the start of a new round.
    #[instrument(skip(self), fields(round = self.round_number + 1))]
    pub fn start_round(&mut self) {
        self.round_number += 1;
    }

    /// Records a finished round.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::UndecidedRound`] for [`Outcome::NoDecision`];
    /// nothing is updated in that case.
    #[instrument(skip(self), fields(round = self.round_number))]
    pub fn record(&mut self, outcome: Outcome) -> Result<(), TallyError> {
        match outcome {
            Outcome::Win(Mark::X) => self.wins_x += 1,
            Outcome::Win(Mark::O) => self.wins_o += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::NoDecision => return Err(TallyError::UndecidedRound),
        }
        self.update_win_streak(outcome.winner());
        info!(
            wins_x = self.wins_x,
            wins_o = self.wins_o,
            draws = self.draws,
            win_streak = self.win_streak,
            "Round recorded"
        );
        Ok(())
    }

    /// Records a round that ended without a result (timeout or abort).
    ///
    /// No win or draw is counted; the streak treats it as a round with no winner.
    #[instrument(skip(self), fields(round = self.round_number))]
    pub fn record_abort(&mut self) {
        self.aborted += 1;
        self.update_win_streak(None);
    }

    /// Applies the win-streak rule for a round won by `winner`.
    ///
    /// Same winner as last round extends the streak, a new winner starts at 1,
    /// and no winner resets to 0.
    pub fn update_win_streak(&mut self, winner: Option<Mark>) {
        self.win_streak = match winner {
            Some(mark) if self.last_winner == Some(mark) => self.win_streak + 1,
            Some(_) => 1,
            None => 0,
        };
        self.last_winner = winner;
    }

    /// Rounds that produced a result (wins plus draws).
    pub fn rounds_decided(&self) -> u32 {
        self.wins_x + self.wins_o + self.draws
    }

    /// Wins for `mark` as a whole percentage of decided rounds.
    pub fn win_percentage(&self, mark: Mark) -> u32 {
        let decided = self.rounds_decided();
        if decided == 0 {
            return 0;
        }
        let wins = match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        };
        wins * 100 / decided
    }

    /// Discards all counters.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_continues_for_same_winner() {
        let mut tally = SessionTally::new();
        tally.record(Outcome::Win(Mark::O)).unwrap();
        tally.record(Outcome::Win(Mark::O)).unwrap();
        tally.record(Outcome::Win(Mark::O)).unwrap();
        assert_eq!(*tally.win_streak(), 3);
        assert_eq!(*tally.wins_o(), 3);
    }

    #[test]
    fn test_streak_restarts_for_other_winner() {
        let mut tally = SessionTally::new();
        tally.record(Outcome::Win(Mark::X)).unwrap();
        tally.record(Outcome::Win(Mark::X)).unwrap();
        tally.record(Outcome::Win(Mark::O)).unwrap();
        assert_eq!(*tally.win_streak(), 1);
        assert_eq!(*tally.last_winner(), Some(Mark::O));
    }

    #[test]
    fn test_win_after_draw_starts_at_one() {
        let mut tally = SessionTally::new();
        tally.record(Outcome::Win(Mark::X)).unwrap();
        tally.record(Outcome::Draw).unwrap();
        tally.record(Outcome::Win(Mark::X)).unwrap();
        assert_eq!(*tally.win_streak(), 1);
    }

    #[test]
    fn test_undecided_round_rejected() {
        let mut tally = SessionTally::new();
        tally.record(Outcome::Win(Mark::X)).unwrap();
        assert_eq!(
            tally.record(Outcome::NoDecision),
            Err(TallyError::UndecidedRound)
        );
        assert_eq!(*tally.win_streak(), 1);
        assert_eq!(tally.rounds_decided(), 1);
    }

    #[test]
    fn test_abort_resets_streak_without_counting() {
        let mut tally = SessionTally::new();
        tally.record(Outcome::Win(Mark::O)).unwrap();
        tally.record_abort();
        assert_eq!(*tally.win_streak(), 0);
        assert_eq!(*tally.last_winner(), None);
        assert_eq!(*tally.aborted(), 1);
        assert_eq!(tally.rounds_decided(), 1);
    }

    #[test]
    fn test_win_percentage() {
        let mut tally = SessionTally::new();
        assert_eq!(tally.win_percentage(Mark::X), 0);
        tally.record(Outcome::Win(Mark::X)).unwrap();
        tally.record(Outcome::Win(Mark::O)).unwrap();
        tally.record(Outcome::Draw).unwrap();
        assert_eq!(tally.win_percentage(Mark::X), 33);
        assert_eq!(tally.win_percentage(Mark::O), 33);
    }

    #[test]
    fn test_reset() {
        let mut tally = SessionTally::new();
        tally.start_round();
        tally.record(Outcome::Draw).unwrap();
        tally.reset();
        assert_eq!(tally, SessionTally::new());
    }
}
