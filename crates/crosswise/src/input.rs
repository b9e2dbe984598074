//! Keyboard input sources and cursor movement.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crosswise_core::{BOARD_SIZE, Position};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument, trace};

/// Something that produces key presses for the controller.
#[async_trait::async_trait]
pub trait InputSource: Send {
    /// Waits for the next key.
    ///
    /// Returns `Ok(None)` if `wait` elapses first; `None` waits forever.
    async fn next_key(&mut self, wait: Option<Duration>) -> Result<Option<KeyCode>>;
}

/// Key presses read from the terminal.
///
/// A reader thread polls crossterm and forwards presses over a channel, so
/// the controller can wait on them with a timeout.
pub struct KeyboardInput {
    input_rx: mpsc::UnboundedReceiver<KeyCode>,
}

impl KeyboardInput {
    /// Starts the reader thread.
    #[instrument]
    pub fn spawn() -> Self {
        let (key_tx, input_rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            debug!("Keyboard reader started");
            while !key_tx.is_closed() {
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "Keyboard poll failed");
                        break;
                    }
                }
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        trace!(code = ?key.code, "Key pressed");
                        if key_tx.send(key.code).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Keyboard read failed");
                        break;
                    }
                }
            }
            debug!("Keyboard reader stopped");
        });

        Self { input_rx }
    }
}

#[async_trait::async_trait]
impl InputSource for KeyboardInput {
    async fn next_key(&mut self, wait: Option<Duration>) -> Result<Option<KeyCode>> {
        let key = match wait {
            Some(wait) => match tokio::time::timeout(wait, self.input_rx.recv()).await {
                Ok(key) => key,
                Err(_) => return Ok(None),
            },
            None => self.input_rx.recv().await,
        };

        key.map(Some)
            .ok_or_else(|| anyhow::anyhow!("Input channel closed"))
    }
}

/// Plays back a fixed list of keys, then behaves as if every wait timed out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: VecDeque<KeyCode>,
}

impl ScriptedInput {
    /// Creates a source that yields `keys` in order.
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Keys not yet consumed.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

#[async_trait::async_trait]
impl InputSource for ScriptedInput {
    async fn next_key(&mut self, _wait: Option<Duration>) -> Result<Option<KeyCode>> {
        Ok(self.keys.pop_front())
    }
}

/// Moves the cursor one cell for an arrow key, stopping at the board edge.
///
/// Other keys leave the cursor where it is.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());

    match key {
        KeyCode::Up if row > 1 => Position::new(row - 1, column),
        KeyCode::Down if row < BOARD_SIZE => Position::new(row + 1, column),
        KeyCode::Left if column > 1 => Position::new(row, column - 1),
        KeyCode::Right if column < BOARD_SIZE => Position::new(row, column + 1),
        _ => cursor,
    }
}

/// Reads a board coordinate digit (`1..=BOARD_SIZE`).
pub fn coordinate_digit(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|d| (1..=BOARD_SIZE).contains(d)),
        _ => None,
    }
}
