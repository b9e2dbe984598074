//! Tests for board evaluation scenarios on the 4x4 board.

use crosswise_core::{
    BOARD_SIZE, Board, BoardError, Mark, Outcome, Phase, Position, Square, WIN_LENGTH,
};
use strum::IntoEnumIterator;

fn board_from(rows: [&str; BOARD_SIZE]) -> Board {
    let mut board = Board::new();
    for (r, line) in rows.iter().enumerate() {
        for (c, symbol) in line.chars().enumerate() {
            let mark = match symbol {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => continue,
            };
            board.place(Position::from_index(r, c), mark).unwrap();
        }
    }
    board
}

fn mirrored(board: &Board) -> Board {
    let mut mirror = Board::new();
    for pos in Position::all() {
        if let Square::Occupied(mark) = board.get(pos).unwrap() {
            mirror.place(Position::new(pos.column(), pos.row()), mark).unwrap();
        }
    }
    mirror
}

#[test]
fn test_reset_clears_everything() {
    let mut board = board_from(["XO..", ".X..", "..O.", "...X"]);
    board.evaluate();
    board.reset();
    assert_eq!(board.phase(), Phase::NewRound);
    assert!(board.squares().iter().flatten().all(|s| *s == Square::Empty));
}

#[test]
fn test_place_then_not_occupiable() {
    let mut board = Board::new();
    for pos in Position::all() {
        assert!(board.is_occupiable(pos).unwrap());
        board.place(pos, Mark::X).unwrap();
        assert!(!board.is_occupiable(pos).unwrap());
    }
}

#[test]
fn test_untouched_cells_stay_occupiable() {
    let mut board = Board::new();
    board.place(Position::new(2, 3), Mark::O).unwrap();
    for pos in Position::all().filter(|p| *p != Position::new(2, 3)) {
        assert!(board.is_occupiable(pos).unwrap());
    }
}

#[test]
fn test_evaluate_is_idempotent() {
    for rows in [
        ["....", "....", "....", "...."],
        ["XXX.", "OO..", "....", "...."],
        ["XXOO", "OOXX", "XXOO", "OOXX"],
        ["X...", ".O..", "..X.", "...."],
    ] {
        let mut board = board_from(rows);
        let first = board.evaluate();
        let phase = board.phase();
        assert_eq!(board.evaluate(), first);
        assert_eq!(board.phase(), phase);
    }
}

#[test]
fn test_mirror_symmetry() {
    for rows in [
        ["XXX.", "OO..", "....", "...."],
        [".O..", ".O..", ".O..", "X.X."],
        ["...X", "..X.", ".X..", "OO.."],
        ["XXOO", "OOXX", "XXOO", "OOXX"],
        ["X...", ".O..", "..X.", "...."],
    ] {
        let mut board = board_from(rows);
        let mut mirror = mirrored(&board);
        assert_eq!(board.evaluate(), mirror.evaluate(), "mirror of {rows:?}");
    }
}

#[test]
fn test_every_window_wins() {
    let steps: [(usize, usize, fn(usize) -> (usize, usize)); 4] = [
        (BOARD_SIZE, BOARD_SIZE - WIN_LENGTH + 1, |i| (0, i)),
        (BOARD_SIZE - WIN_LENGTH + 1, BOARD_SIZE, |i| (i, 0)),
        (BOARD_SIZE - WIN_LENGTH + 1, BOARD_SIZE - WIN_LENGTH + 1, |i| (i, i)),
        (BOARD_SIZE - WIN_LENGTH + 1, BOARD_SIZE - WIN_LENGTH + 1, |i| (WIN_LENGTH - 1 - i, i)),
    ];
    for mark in Mark::iter() {
        for (rows, columns, offset) in steps {
            for row in 0..rows {
                for column in 0..columns {
                    let mut board = Board::new();
                    for i in 0..WIN_LENGTH {
                        let (dr, dc) = offset(i);
                        board.place(Position::from_index(row + dr, column + dc), mark).unwrap();
                    }
                    assert_eq!(board.evaluate(), Outcome::Win(mark), "window at ({row}, {column})");
                }
            }
        }
    }
}

#[test]
fn test_scenario_a_empty_board_undecided() {
    let mut board = Board::new();
    assert_eq!(board.evaluate(), Outcome::NoDecision);
    assert_eq!(board.phase(), Phase::NewRound);
}

#[test]
fn test_scenario_b_top_row_wins_for_x() {
    let mut board = Board::new();
    board.start_round();
    for column in 1..=3 {
        board.place(Position::new(1, column), Mark::X).unwrap();
    }
    assert_eq!(board.evaluate(), Outcome::Win(Mark::X));
    assert_eq!(board.phase(), Phase::PlayerXWin);
}

#[test]
fn test_scenario_c_full_board_without_run_is_draw() {
    let mut board = board_from(["XXOO", "OOXX", "XXOO", "OOXX"]);
    assert_eq!(board.evaluate(), Outcome::Draw);
    assert_eq!(board.phase(), Phase::CatsGame);
}

#[test]
fn test_scenario_e_place_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(
        board.place(Position::new(5, 1), Mark::X),
        Err(BoardError::OutOfBounds { row: 5, column: 1 })
    );
    assert_eq!(
        board.is_occupiable(Position::new(1, 0)),
        Err(BoardError::OutOfBounds { row: 1, column: 0 })
    );
}

#[test]
fn test_scenario_f_place_overwrites_without_check() {
    // Occupancy is the caller's guard; place itself overwrites.
    let mut board = Board::new();
    let pos = Position::new(3, 3);
    board.place(pos, Mark::X).unwrap();
    board.place(pos, Mark::O).unwrap();
    assert_eq!(board.get(pos), Ok(Square::Occupied(Mark::O)));
}
