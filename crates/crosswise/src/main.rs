//! Crosswise - terminal entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use crosswise::cli::{Cli, Command, PlayArgs};
use crosswise::{Controller, GameConfig, KeyboardInput};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "crosswise.log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Command::Play(args) => run_play(args).await,
        Command::DefaultConfig => {
            print!("{}", GameConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Run a game session in the terminal
async fn run_play(args: PlayArgs) -> Result<()> {
    // Log to a file so output does not interfere with the TUI
    let log_path = args.log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let mut config = GameConfig::load(args.config.as_deref())?;
    config.apply_overrides(args.timeout, args.max_attempts);
    info!(?config, "Starting Crosswise");

    let guard = TerminalGuard::enter(config.window_title())?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut controller = Controller::new(terminal, KeyboardInput::spawn(), config);
    let res = controller.run().await;
    drop(controller);
    guard.restore()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Raw mode and the alternate screen for the game, restored on drop.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, SetTitle(title))?;
        Ok(guard)
    }

    /// Restores the terminal, reporting any failure.
    fn restore(mut self) -> Result<()> {
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
    }
}
