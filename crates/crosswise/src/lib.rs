//! Crosswise - hot-seat three-in-a-row in the terminal.
//!
//! Presentation layer around [`crosswise_core`]:
//!
//! - **Config**: colors, margins, turn timeout and attempt limit from TOML
//! - **Input**: keyboard source with per-turn timeout, cursor movement
//! - **UI**: stateless ratatui rendering of each screen
//! - **Controller**: the round loop tying key presses to the game session

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod input;
pub mod ui;

pub use config::{ConfigError, DEFAULT_CONFIG_PATH, GameConfig};
pub use controller::{Controller, RoundEnd, TurnInput};
pub use input::{InputSource, KeyboardInput, ScriptedInput, move_cursor};
pub use ui::Screen;
