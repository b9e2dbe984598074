//! Command-line interface for crosswise.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Crosswise - three in a row on a 4x4 board, two players at one keyboard
#[derive(Parser, Debug)]
#[command(name = "crosswise")]
#[command(about = "Hot-seat three-in-a-row in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the chosen command, falling back to `play` with defaults.
    pub fn command(self) -> Command {
        self.command.unwrap_or_else(|| Command::Play(PlayArgs::default()))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session in the terminal
    Play(PlayArgs),

    /// Print the default configuration as TOML
    DefaultConfig,
}

/// Options for a game session
#[derive(Args, Debug, Default, Clone)]
pub struct PlayArgs {
    /// Path to a TOML config file (defaults to ./crosswise.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds allowed per turn, 0 to wait forever (overrides the config file)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Invalid keys allowed per turn (overrides the config file)
    #[arg(short, long)]
    pub max_attempts: Option<u32>,

    /// File that receives log output
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
