//! Crosswise core - game logic for three-in-a-row on a 4×4 board.
//!
//! Pure state machine with no I/O:
//!
//! - **Board**: grid of [`Square`]s plus the round [`Phase`]; move
//!   validation, placement and win/draw evaluation.
//! - **Position**: 1-based `(row, column)` address, validated when used.
//! - **SessionTally**: wins, draws and the win streak across rounds.
//! - **Session**: owns one board and one tally and drives the round lifecycle.
//!
//! # Example
//!
//! ```
//! use crosswise_core::{Outcome, Position, Session, TurnReport};
//!
//! let mut session = Session::new();
//! session.begin_round();
//! for (x, o) in [((1, 1), (2, 1)), ((1, 2), (2, 2))] {
//!     session.submit(Position::new(x.0, x.1)).unwrap();
//!     session.submit(Position::new(o.0, o.1)).unwrap();
//! }
//! let report = session.submit(Position::new(1, 3)).unwrap();
//! assert!(matches!(report, TurnReport::RoundOver(Outcome::Win(_))));
//! assert_eq!(*session.tally().win_streak(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod phases;
mod position;
pub mod rules;
mod session;
mod tally;
mod types;

pub use board::Board;
pub use error::{BoardError, SessionError, TallyError};
pub use phases::{Outcome, Phase};
pub use position::{ParsePositionError, Position};
pub use session::{Session, TurnReport};
pub use tally::SessionTally;
pub use types::{BOARD_SIZE, Grid, Mark, Square, WIN_LENGTH};
