//! Stateless UI rendering.

use crate::config::GameConfig;
use crosswise_core::{BOARD_SIZE, Board, Mark, Outcome, Position, SessionTally, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const CELL_WIDTH: u16 = 5;
const LABEL_WIDTH: u16 = 2;
const BOARD_WIDTH: u16 = LABEL_WIDTH + CELL_WIDTH * BOARD_SIZE as u16 + (BOARD_SIZE as u16 - 1);
const BOARD_HEIGHT: u16 = 1 + BOARD_SIZE as u16 * 2 - 1;

/// What the terminal should currently show.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    /// Title card and controls, shown once per run.
    Welcome,
    /// The board during a round.
    Game {
        /// Board being played.
        board: &'a Board,
        /// Highlighted cell.
        cursor: Position,
        /// Round number.
        round: u32,
        /// Feedback for the player to move.
        status: &'a str,
    },
    /// Result of the last round with session statistics.
    RoundResult {
        /// Final board of the round.
        board: &'a Board,
        /// `None` when the round ended without a result.
        outcome: Option<Outcome>,
        /// Session counters.
        tally: &'a SessionTally,
        /// Question shown under the statistics.
        prompt: &'a str,
    },
    /// A titled message (prompts, timeouts, farewell).
    Message {
        /// Title of the message box.
        title: &'a str,
        /// Message text.
        body: &'a str,
    },
}

/// Renders `screen` with the configured colors and margins.
pub fn draw(frame: &mut Frame, screen: &Screen<'_>, config: &GameConfig) {
    let (body_fg, body_bg) = config.body_colors();
    let body_style = Style::default().fg(body_fg).bg(body_bg);
    frame.render_widget(Block::default().style(body_style), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(*config.horizontal_margin())
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let (header_fg, header_bg) = config.header_colors();
    let header = Paragraph::new(config.header_text().as_str())
        .style(
            Style::default()
                .fg(header_fg)
                .bg(header_bg)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let help = match screen {
        Screen::Welcome => "Press any key to begin",
        Screen::Game { .. } => "Arrows move, Enter places, digits pick row/column, Esc ends round",
        Screen::RoundResult { .. } => "y: yes    n: no",
        Screen::Message { .. } => "Press any key",
    };
    let controls = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, chunks[2]);

    match *screen {
        Screen::Welcome => draw_welcome(frame, chunks[1]),
        Screen::Game {
            board,
            cursor,
            round,
            status,
        } => draw_game(frame, chunks[1], board, cursor, round, status),
        Screen::RoundResult {
            board,
            outcome,
            tally,
            prompt,
        } => draw_result(frame, chunks[1], board, outcome, tally, prompt),
        Screen::Message { title, body } => draw_message(frame, chunks[1], title, body),
    }
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Welcome to Crosswise",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Two players share the keyboard on a {n}x{n} board.",
            n = BOARD_SIZE
        )),
        Line::from("Player X moves first. Three marks in a row, column or diagonal wins."),
        Line::from("A full board with no three in a row is a cat's game."),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_game(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    round: u32,
    status: &str,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Round and phase
            Constraint::Length(1),
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(1), // Status
        ])
        .split(area);

    let info = Paragraph::new(format!("Round {}  -  {}", round, board.phase()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(info, rows[0]);

    draw_board(frame, rows[2], board, Some(cursor));

    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(status, rows[3]);
}

fn draw_result(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    outcome: Option<Outcome>,
    tally: &SessionTally,
    prompt: &str,
) {
    let headline = match outcome {
        Some(Outcome::Win(mark)) => format!("Player {} wins round {}!", mark, tally.round_number()),
        Some(Outcome::Draw) => format!("Round {} is a cat's game.", tally.round_number()),
        Some(Outcome::NoDecision) | None => {
            format!("Round {} ended with no winner.", tally.round_number())
        }
    };
    let streak = match tally.last_winner() {
        Some(mark) if *tally.win_streak() > 0 => {
            format!("{} (Player {})", tally.win_streak(), mark)
        }
        _ => tally.win_streak().to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(headline, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(format!("Rounds played:  {}", tally.round_number())),
        Line::from(format!(
            "Player X wins:  {} ({}%)",
            tally.wins_x(),
            tally.win_percentage(Mark::X)
        )),
        Line::from(format!(
            "Player O wins:  {} ({}%)",
            tally.wins_o(),
            tally.win_percentage(Mark::O)
        )),
        Line::from(format!("Cat's games:    {}", tally.draws())),
        Line::from(format!("Win streak:     {}", streak)),
        Line::from(""),
        Line::from(Span::styled(prompt, Style::default().fg(Color::Yellow))),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(lines.len() as u16), Constraint::Min(BOARD_HEIGHT)])
        .split(area);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    draw_board(frame, chunks[1], board, None);
}

fn draw_message(frame: &mut Frame, area: Rect, title: &str, body: &str) {
    let paragraph = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, center_rect(area, area.width.min(60), 5));
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let mut constraints = vec![Constraint::Length(1)]; // Column labels
    for row in 0..BOARD_SIZE {
        constraints.push(Constraint::Length(1));
        if row + 1 < BOARD_SIZE {
            constraints.push(Constraint::Length(1));
        }
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(board_area);

    draw_column_labels(frame, rows[0]);
    for row in 0..BOARD_SIZE {
        draw_row(frame, rows[1 + row * 2], board, cursor, row);
        if row + 1 < BOARD_SIZE {
            draw_separator(frame, rows[2 + row * 2]);
        }
    }
}

fn row_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    let mut constraints = vec![Constraint::Length(LABEL_WIDTH)];
    for column in 0..BOARD_SIZE {
        constraints.push(Constraint::Length(CELL_WIDTH));
        if column + 1 < BOARD_SIZE {
            constraints.push(Constraint::Length(1));
        }
    }
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
}

fn draw_column_labels(frame: &mut Frame, area: Rect) {
    let cols = row_layout(area);
    for column in 0..BOARD_SIZE {
        let label = Paragraph::new((column + 1).to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(label, cols[1 + column * 2]);
    }
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>, row: usize) {
    let cols = row_layout(area);

    let label = Paragraph::new((row + 1).to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(label, cols[0]);

    for column in 0..BOARD_SIZE {
        draw_cell(frame, cols[1 + column * 2], board, cursor, Position::from_index(row, column));
        if column + 1 < BOARD_SIZE {
            draw_separator_vertical(frame, cols[2 + column * 2]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    pos: Position,
) {
    let (symbol, base_style) = match board.get(pos) {
        Ok(Square::Occupied(Mark::X)) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Ok(Square::Occupied(Mark::O)) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Ok(Square::Empty) | Err(_) => ("   ", Style::default().fg(Color::DarkGray)),
    };

    let style = if cursor == Some(pos) {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let width = BOARD_WIDTH.saturating_sub(LABEL_WIDTH) as usize;
    let line = format!("{}{}", " ".repeat(LABEL_WIDTH as usize), "─".repeat(width));
    let sep = Paragraph::new(line).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
