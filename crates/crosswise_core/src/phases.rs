//! Round phases and evaluation outcomes.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Stage of the round currently being played.
///
/// `NewRound` is entered only through [`Board::reset`](crate::Board::reset).
/// The three terminal phases are left only through another reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Board was just reset; no turn has started.
    #[display("New round")]
    NewRound,
    /// X to move.
    #[display("Player X's turn")]
    PlayerXTurn,
    /// O to move.
    #[display("Player O's turn")]
    PlayerOTurn,
    /// X completed a run.
    #[display("Player X wins")]
    PlayerXWin,
    /// O completed a run.
    #[display("Player O wins")]
    PlayerOWin,
    /// Board filled with no run for either mark.
    #[display("Cat's game")]
    CatsGame,
}

impl Phase {
    /// Phase in which `mark` is to move.
    pub fn turn(mark: Mark) -> Self {
        match mark {
            Mark::X => Phase::PlayerXTurn,
            Mark::O => Phase::PlayerOTurn,
        }
    }

    /// Returns the mark whose turn it is, if a turn is active.
    pub fn to_move(self) -> Option<Mark> {
        match self {
            Phase::PlayerXTurn => Some(Mark::X),
            Phase::PlayerOTurn => Some(Mark::O),
            _ => None,
        }
    }

    /// Returns true for the win and cat's game phases.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::PlayerXWin | Phase::PlayerOWin | Phase::CatsGame)
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No run exists and empty cells remain.
    NoDecision,
    /// The mark completed a run.
    Win(Mark),
    /// Board is full and neither mark has a run.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(*mark),
            Outcome::NoDecision | Outcome::Draw => None,
        }
    }

    /// Returns true once the round is over.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::NoDecision)
    }

    /// Terminal phase for a decided outcome.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Outcome::Win(Mark::X) => Some(Phase::PlayerXWin),
            Outcome::Win(Mark::O) => Some(Phase::PlayerOWin),
            Outcome::Draw => Some(Phase::CatsGame),
            Outcome::NoDecision => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::NoDecision => write!(f, "No decision"),
            Outcome::Win(mark) => write!(f, "Player {} wins", mark),
            Outcome::Draw => write!(f, "Cat's game"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_round_trip() {
        assert_eq!(Phase::turn(Mark::X).to_move(), Some(Mark::X));
        assert_eq!(Phase::turn(Mark::O).to_move(), Some(Mark::O));
        assert_eq!(Phase::NewRound.to_move(), None);
        assert_eq!(Phase::CatsGame.to_move(), None);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!Phase::NewRound.is_terminal());
        assert!(!Phase::PlayerOTurn.is_terminal());
        assert!(Phase::PlayerXWin.is_terminal());
        assert!(Phase::CatsGame.is_terminal());
    }

    #[test]
    fn test_outcome_phase() {
        assert_eq!(Outcome::Win(Mark::O).phase(), Some(Phase::PlayerOWin));
        assert_eq!(Outcome::Draw.phase(), Some(Phase::CatsGame));
        assert_eq!(Outcome::NoDecision.phase(), None);
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
