//! Tests for board construction, legality, and win detection.

use gomoku::{Board, BoardError, Mark, Position};

#[test]
fn test_construct_valid_dimensions() {
    let board = Board::new(10, 10).expect("Construction failed");
    assert_eq!(*board.rows(), 10);
    assert_eq!(*board.cols(), 10);
}

#[test]
fn test_construct_invalid_dimensions_fail() {
    // cols below 4, rows below cols, rows above 25
    for (rows, cols) in [(3, 4), (26, 5), (5, 6)] {
        let result = Board::new(rows, cols);
        assert_eq!(
            result,
            Err(BoardError::InvalidDimensions { rows, cols }),
            "expected {}x{} to be rejected",
            rows,
            cols
        );
    }
}

#[test]
fn test_boundary_dimensions_accepted() {
    assert!(Board::new(4, 4).is_ok());
    assert!(Board::new(25, 25).is_ok());
    assert!(Board::new(25, 4).is_ok());
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(5, 4).expect("Construction failed");
    for row in 0..5 {
        for col in 0..4 {
            assert_eq!(board.mark_at(Position::new(row, col)), Some(Mark::Empty));
        }
    }
}

#[test]
fn test_place_and_read_back() {
    let mut board = Board::new(6, 5).expect("Construction failed");
    let pos = Position::new(2, 3);
    board.place(Mark::X, pos).expect("Place failed");
    assert_eq!(board.mark_at(pos), Some(Mark::X));
}

#[test]
fn test_place_out_of_bounds_fails_without_mutation() {
    let mut board = Board::new(5, 4).expect("Construction failed");
    let before = board.clone();
    let result = board.place(Mark::X, Position::new(5, 0));
    assert_eq!(
        result,
        Err(BoardError::OutOfBounds {
            position: Position::new(5, 0)
        })
    );
    assert_eq!(board, before);
}

#[test]
fn test_place_occupied_fails_without_mutation() {
    let mut board = Board::new(5, 4).expect("Construction failed");
    let pos = Position::new(1, 1);
    board.place(Mark::X, pos).expect("Place failed");
    let before = board.clone();
    let result = board.place(Mark::O, pos);
    assert_eq!(result, Err(BoardError::CellOccupied { position: pos }));
    assert_eq!(board, before);
}

#[test]
fn test_legal_positions_empty_board() {
    let board = Board::new(10, 10).expect("Construction failed");
    assert!(board.legal_positions_by_adjacency().is_empty());
}

#[test]
fn test_legal_positions_single_mark() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    board
        .place(Mark::X, Position::new(5, 5))
        .expect("Place failed");

    let legal = board.legal_positions_by_adjacency();
    assert_eq!(legal.len(), 8);
    assert!(legal.contains(&Position::new(4, 4)));
    assert!(!legal.contains(&Position::new(5, 5)));
}

#[test]
fn test_legal_positions_corner_mark() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    board
        .place(Mark::O, Position::new(0, 0))
        .expect("Place failed");

    let legal = board.legal_positions_by_adjacency();
    assert_eq!(legal.len(), 3);
    assert!(legal.contains(&Position::new(0, 1)));
    assert!(legal.contains(&Position::new(1, 0)));
    assert!(legal.contains(&Position::new(1, 1)));
}

#[test]
fn test_legal_positions_deduplicated_and_exclude_occupied() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    // Two adjacent marks share several empty neighbors.
    board
        .place(Mark::X, Position::new(5, 5))
        .expect("Place failed");
    board
        .place(Mark::O, Position::new(5, 6))
        .expect("Place failed");

    let legal = board.legal_positions_by_adjacency();
    // 3x4 block around the pair minus the two occupied cells.
    assert_eq!(legal.len(), 10);
    for pos in &legal {
        assert_eq!(board.mark_at(*pos), Some(Mark::Empty));
        let near_some_mark = [Position::new(5, 5), Position::new(5, 6)]
            .iter()
            .any(|occ| {
                pos.row.abs_diff(occ.row) <= 1 && pos.col.abs_diff(occ.col) <= 1
            });
        assert!(near_some_mark, "{pos} is not adjacent to any mark");
    }
}

#[test]
fn test_horizontal_win_detected() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    for col in 2..7 {
        board
            .place(Mark::X, Position::new(5, col))
            .expect("Place failed");
    }
    assert!(board.has_winning_line_through(Mark::X, Position::new(5, 6)));
    // Also detected from the middle of the run.
    assert!(board.has_winning_line_through(Mark::X, Position::new(5, 4)));
}

#[test]
fn test_vertical_win_detected() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    for row in 1..6 {
        board
            .place(Mark::O, Position::new(row, 3))
            .expect("Place failed");
    }
    assert!(board.has_winning_line_through(Mark::O, Position::new(3, 3)));
}

#[test]
fn test_diagonal_wins_detected() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    for i in 0..5 {
        board
            .place(Mark::X, Position::new(2 + i, 2 + i))
            .expect("Place failed");
    }
    assert!(board.has_winning_line_through(Mark::X, Position::new(4, 4)));

    let mut board = Board::new(10, 10).expect("Construction failed");
    for i in 0..5 {
        board
            .place(Mark::O, Position::new(2 + i, 8 - i))
            .expect("Place failed");
    }
    assert!(board.has_winning_line_through(Mark::O, Position::new(6, 4)));
}

#[test]
fn test_four_in_a_row_is_not_a_win() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    for col in 2..6 {
        board
            .place(Mark::X, Position::new(5, col))
            .expect("Place failed");
    }
    assert!(!board.has_winning_line_through(Mark::X, Position::new(5, 5)));
}

#[test]
fn test_win_check_respects_mark() {
    let mut board = Board::new(10, 10).expect("Construction failed");
    for col in 2..7 {
        board
            .place(Mark::X, Position::new(5, col))
            .expect("Place failed");
    }
    assert!(!board.has_winning_line_through(Mark::O, Position::new(5, 4)));
}

#[test]
fn test_center() {
    let board = Board::new(10, 10).expect("Construction failed");
    assert_eq!(board.center(), Position::new(5, 5));

    let board = Board::new(5, 4).expect("Construction failed");
    assert_eq!(board.center(), Position::new(2, 2));
}

#[test]
fn test_render_has_header_and_gutter() {
    let mut board = Board::new(5, 4).expect("Construction failed");
    board
        .place(Mark::X, Position::new(2, 1))
        .expect("Place failed");
    let rendered = board.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "   a b c d ");
    assert_eq!(lines[3], " 3 . x . . ");
    assert!(lines[4].starts_with(" 4 "));
}

#[test]
fn test_symbol_rows_round_trip() {
    let mut board = Board::new(6, 4).expect("Construction failed");
    board
        .place(Mark::X, Position::new(0, 0))
        .expect("Place failed");
    board
        .place(Mark::O, Position::new(5, 3))
        .expect("Place failed");

    let rows = board.to_symbol_rows();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], "x...");
    assert_eq!(rows[5], "...o");

    let mut other = Board::new(6, 4).expect("Construction failed");
    other.load_symbol_rows(&rows).expect("Load failed");
    assert_eq!(other, board);
}

#[test]
fn test_load_symbol_rows_wrong_row_count_fails() {
    let mut board = Board::new(5, 4).expect("Construction failed");
    let rows = vec!["....".to_string(); 4];
    let result = board.load_symbol_rows(&rows);
    assert_eq!(
        result,
        Err(BoardError::DimensionMismatch {
            axis: "row",
            expected: 5,
            found: 4
        })
    );
}

#[test]
fn test_load_symbol_rows_wrong_width_leaves_board_untouched() {
    let mut board = Board::new(5, 4).expect("Construction failed");
    board
        .place(Mark::X, Position::new(0, 0))
        .expect("Place failed");
    let before = board.clone();

    // First rows are fine, a later one is short: nothing may change.
    let rows = vec![
        "oooo".to_string(),
        "oooo".to_string(),
        "oooo".to_string(),
        "oo".to_string(),
        "oooo".to_string(),
    ];
    let result = board.load_symbol_rows(&rows);
    assert_eq!(
        result,
        Err(BoardError::DimensionMismatch {
            axis: "column",
            expected: 4,
            found: 2
        })
    );
    assert_eq!(board, before);
}

#[test]
fn test_mark_symbols() {
    assert_eq!(Mark::Empty.symbol(), '.');
    assert_eq!(Mark::X.symbol(), 'x');
    assert_eq!(Mark::O.symbol(), 'o');
}

#[test]
fn test_mark_from_symbol_case_insensitive_and_lossy() {
    assert_eq!(Mark::from_symbol('x'), Mark::X);
    assert_eq!(Mark::from_symbol('X'), Mark::X);
    assert_eq!(Mark::from_symbol('o'), Mark::O);
    assert_eq!(Mark::from_symbol('O'), Mark::O);
    assert_eq!(Mark::from_symbol('.'), Mark::Empty);
    assert_eq!(Mark::from_symbol('?'), Mark::Empty);
    assert_eq!(Mark::from_symbol('7'), Mark::Empty);
}

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_position_display_is_coordinate_notation() {
    assert_eq!(Position::new(2, 1).to_string(), "b3");
    assert_eq!(Position::new(0, 0).to_string(), "a1");
}
