//! Session controller: turns key presses into moves and rounds into statistics.

use crate::config::GameConfig;
use crate::input::{InputSource, coordinate_digit, move_cursor};
use crate::ui::{self, Screen};
use anyhow::Result;
use crossterm::event::KeyCode;
use crosswise_core::{BOARD_SIZE, Board, Mark, Outcome, Position, Session, TurnReport};
use ratatui::{Terminal, backend::Backend};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// What the player to move asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInput {
    /// Place the mark here.
    Place(Position),
    /// End the round without a result.
    Abort,
    /// The turn timer ran out.
    TimedOut,
    /// Too many invalid keys this turn.
    MaxAttempts,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// The board reached a result, already recorded in the tally.
    Finished(Outcome),
    /// A player ended the round. Recorded in the tally as aborted.
    Aborted,
    /// The player to move ran out of time. Recorded in the tally as aborted.
    TimedOut,
    /// The player to move used up their attempts; the game stops.
    MaxAttempts,
}

/// Drives a session: welcome, rounds, statistics, prompts, farewell.
///
/// Owns the only [`Session`] (board and tally) for the life of the program.
pub struct Controller<B: Backend, I: InputSource> {
    terminal: Terminal<B>,
    input: I,
    config: GameConfig,
    session: Session,
    final_board: Board,
    cursor: Position,
    status: String,
}

impl<B, I> Controller<B, I>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    I: InputSource,
{
    /// Creates a controller with a fresh session.
    pub fn new(terminal: Terminal<B>, input: I, config: GameConfig) -> Self {
        Self {
            terminal,
            input,
            config,
            session: Session::new(),
            final_board: Board::new(),
            cursor: start_cursor(),
            status: String::new(),
        }
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Board as it stood when the last round ended.
    pub fn final_board(&self) -> &Board {
        &self.final_board
    }

    /// Returns the terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Runs sessions until the players decline to continue.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting game");
        self.show(Screen::Welcome)?;
        self.input.next_key(None).await?;

        loop {
            self.begin_round();

            let end = self.play_round().await?;
            debug!(?end, "Round ended");

            let outcome = match end {
                RoundEnd::Finished(outcome) => Some(outcome),
                RoundEnd::Aborted => None,
                RoundEnd::TimedOut => {
                    self.show_message(
                        "Time's up",
                        "The player to move ran out of time. The round ends with no winner.",
                    )
                    .await?;
                    None
                }
                RoundEnd::MaxAttempts => {
                    self.show_message(
                        "Too many attempts",
                        "The maximum number of invalid entries was reached. The game will end.",
                    )
                    .await?;
                    break;
                }
            };

            if self.ask_result_prompt(outcome, "Play another round? (y/n)").await? {
                continue;
            }

            self.session.end_session();
            if self.ask_exit().await? {
                break;
            }
        }

        self.show(Screen::Message {
            title: "Goodbye",
            body: "Thanks for playing Crosswise.",
        })?;
        self.input.next_key(self.config.input_timeout()).await?;
        info!("Game over");
        Ok(())
    }

    /// Starts the next round with the cursor back in the middle.
    pub fn begin_round(&mut self) {
        self.session.begin_round();
        self.cursor = start_cursor();
        self.status = format!("Player {}'s turn", Mark::X);
    }

    /// Plays turns until the round ends.
    ///
    /// Aborted and timed-out rounds are recorded in the tally before returning.
    #[instrument(skip(self), fields(round = self.session.tally().round_number()))]
    pub async fn play_round(&mut self) -> Result<RoundEnd> {
        loop {
            let Some(mark) = self.session.current_turn() else {
                anyhow::bail!("Round has no player to move");
            };

            let end = match self.read_move(mark).await? {
                TurnInput::Place(pos) => match self.session.submit(pos)? {
                    TurnReport::Occupied => {
                        self.status =
                            format!("Position {} is taken. Player {}, choose another.", pos, mark);
                        continue;
                    }
                    TurnReport::Placed { next, .. } => {
                        self.status = format!("Player {}'s turn", next);
                        continue;
                    }
                    TurnReport::RoundOver(outcome) => RoundEnd::Finished(outcome),
                },
                TurnInput::Abort => RoundEnd::Aborted,
                TurnInput::TimedOut => RoundEnd::TimedOut,
                TurnInput::MaxAttempts => RoundEnd::MaxAttempts,
            };

            self.final_board = self.session.board().clone();
            if matches!(end, RoundEnd::Aborted | RoundEnd::TimedOut) {
                self.session.abort_round();
            }
            return Ok(end);
        }
    }

    /// Collects one move from the player to move.
    ///
    /// Arrow keys move the cursor and Enter or Space picks it. Two digits
    /// pick row then column directly. The turn timer covers the whole turn;
    /// a timeout too large to schedule waits forever.
    #[instrument(skip(self))]
    pub async fn read_move(&mut self, mark: Mark) -> Result<TurnInput> {
        let deadline = self
            .config
            .input_timeout()
            .and_then(|wait| Instant::now().checked_add(wait));
        let max_attempts = *self.config.max_attempts();
        let mut attempts = 0;
        let mut pending_row: Option<usize> = None;

        loop {
            self.show_game()?;

            let wait = deadline.map(|deadline| deadline.saturating_duration_since(Instant::now()));
            let Some(key) = self.input.next_key(wait).await? else {
                warn!(%mark, "Turn timed out");
                return Ok(TurnInput::TimedOut);
            };

            match key {
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    self.cursor = move_cursor(self.cursor, key);
                    if pending_row.take().is_some() {
                        self.status = format!("Player {}'s turn", mark);
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(TurnInput::Place(self.cursor)),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(TurnInput::Abort),
                key => match (coordinate_digit(key), pending_row) {
                    (Some(row), None) => {
                        pending_row = Some(row);
                        self.status = format!(
                            "Player {}: row {}, now choose a column (1-{})",
                            mark, row, BOARD_SIZE
                        );
                    }
                    (Some(column), Some(row)) => {
                        self.cursor = Position::new(row, column);
                        return Ok(TurnInput::Place(self.cursor));
                    }
                    (None, _) => {
                        attempts += 1;
                        debug!(?key, attempts, "Invalid key");
                        if attempts >= max_attempts {
                            warn!(%mark, attempts, "Maximum attempts reached");
                            return Ok(TurnInput::MaxAttempts);
                        }
                        pending_row = None;
                        self.status = format!(
                            "Invalid key. Player {}, {} attempt(s) left.",
                            mark,
                            max_attempts - attempts
                        );
                    }
                },
            }
        }
    }

    fn show(&mut self, screen: Screen<'_>) -> Result<()> {
        let config = &self.config;
        self.terminal.draw(|f| ui::draw(f, &screen, config))?;
        Ok(())
    }

    fn show_game(&mut self) -> Result<()> {
        let Self {
            terminal,
            config,
            session,
            cursor,
            status,
            ..
        } = self;
        let screen = Screen::Game {
            board: session.board(),
            cursor: *cursor,
            round: *session.tally().round_number(),
            status: status.as_str(),
        };
        terminal.draw(|f| ui::draw(f, &screen, config))?;
        Ok(())
    }

    async fn show_message(&mut self, title: &str, body: &str) -> Result<()> {
        self.show(Screen::Message { title, body })?;
        self.input.next_key(self.config.input_timeout()).await?;
        Ok(())
    }

    /// Shows the round result and statistics, then waits for y or n.
    async fn ask_result_prompt(&mut self, outcome: Option<Outcome>, prompt: &str) -> Result<bool> {
        let Self {
            terminal,
            config,
            session,
            final_board,
            ..
        } = self;
        let screen = Screen::RoundResult {
            board: final_board,
            outcome,
            tally: session.tally(),
            prompt,
        };
        terminal.draw(|f| ui::draw(f, &screen, config))?;
        self.read_yes_no(false).await
    }

    /// Asks whether to quit. Nobody answering counts as yes.
    async fn ask_exit(&mut self) -> Result<bool> {
        self.show(Screen::Message {
            title: "Exit",
            body: "Exit the game? (y/n)  Answering n starts a new session.",
        })?;
        self.read_yes_no(true).await
    }

    /// Waits for y or n, ignoring other keys. Running out of time answers `unanswered`.
    async fn read_yes_no(&mut self, unanswered: bool) -> Result<bool> {
        loop {
            match self.input.next_key(self.config.input_timeout()).await? {
                Some(KeyCode::Char('y' | 'Y')) => return Ok(true),
                Some(KeyCode::Char('n' | 'N')) => return Ok(false),
                None => return Ok(unanswered),
                Some(key) => debug!(?key, "Ignoring key at prompt"),
            }
        }
    }
}

fn start_cursor() -> Position {
    let middle = BOARD_SIZE.div_ceil(2);
    Position::new(middle, middle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use ratatui::backend::TestBackend;

    fn controller(
        keys: impl IntoIterator<Item = KeyCode>,
    ) -> Controller<TestBackend, ScriptedInput> {
        controller_with(keys, GameConfig::default())
    }

    fn controller_with(
        keys: impl IntoIterator<Item = KeyCode>,
        config: GameConfig,
    ) -> Controller<TestBackend, ScriptedInput> {
        let terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        Controller::new(terminal, ScriptedInput::new(keys), config)
    }

    #[tokio::test]
    async fn test_enter_places_at_cursor() {
        let mut c = controller([KeyCode::Up, KeyCode::Left, KeyCode::Enter]);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::Place(Position::new(1, 1)));
    }

    #[tokio::test]
    async fn test_digits_pick_row_then_column() {
        let mut c = controller([KeyCode::Char('3'), KeyCode::Char('4')]);
        assert_eq!(c.read_move(Mark::O).await.unwrap(), TurnInput::Place(Position::new(3, 4)));
    }

    #[tokio::test]
    async fn test_arrow_key_cancels_pending_row() {
        let keys = [
            KeyCode::Char('3'),
            KeyCode::Right,
            KeyCode::Char('4'),
            KeyCode::Char('1'),
        ];
        let mut c = controller(keys);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::Place(Position::new(4, 1)));
    }

    #[tokio::test]
    async fn test_enter_after_row_digit_places_at_cursor() {
        let mut c = controller([KeyCode::Char('3'), KeyCode::Enter]);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::Place(start_cursor()));
    }

    #[tokio::test]
    async fn test_unschedulable_timeout_waits_forever() {
        let mut config = GameConfig::default();
        config.apply_overrides(Some(u64::MAX), None);
        let mut c = controller_with([KeyCode::Enter], config);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::Place(start_cursor()));
    }

    #[tokio::test]
    async fn test_escape_aborts() {
        let mut c = controller([KeyCode::Esc]);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::Abort);
    }

    #[tokio::test]
    async fn test_exhausted_input_times_out() {
        let mut c = controller([KeyCode::Right]);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::TimedOut);
    }

    #[tokio::test]
    async fn test_invalid_keys_use_up_attempts() {
        let mut c = controller([KeyCode::Char('z'), KeyCode::Char('9'), KeyCode::Tab]);
        assert_eq!(c.read_move(Mark::X).await.unwrap(), TurnInput::MaxAttempts);
    }

    #[test]
    fn test_start_cursor_is_central() {
        assert_eq!(start_cursor(), Position::new(2, 2));
    }
}
