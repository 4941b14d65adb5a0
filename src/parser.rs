//! Reading and writing puzzle setup files.
//!
//! A setup file is the board art itself with an `O` marking the center of
//! each piece:
//! - line 0: `Goal: X, Y` (target cell for the khun's top-left corner)
//! - line 1: blank
//! - lines 2..=20: art rows; everything except the `O` markers is decoration
//!
//! Marker positions encode piece geometry. An `O` at line `i`, column `j`
//! decodes to height 1 when `i % 4 == 0` (else 2) and width 1 when
//! `(j + 3) % 8 == 0` (else 2); the remaining arithmetic is the exact inverse
//! of where the renderer puts its center dot, so `write_setup` and
//! `parse_setup` round-trip any valid board.

use std::error::Error;
use std::fmt;

use crate::board::{Board, SetupError};
use crate::piece::{Coord, Piece};
use crate::render::render_plain;

/// A setup file the parser cannot turn into a playable board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    /// The file is empty.
    MissingGoal,
    /// The first line is not `Goal: X, Y`.
    InvalidGoal { line: String },
    /// The decoded pieces do not form a playable board.
    InvalidSetup(SetupError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingGoal => write!(f, "setup file is missing the goal header line"),
            ParseError::InvalidGoal { line } => {
                write!(f, "expected `Goal: X, Y` as the first line, got {line:?}")
            }
            ParseError::InvalidSetup(err) => write!(f, "invalid setup: {err}"),
        }
    }
}

impl Error for ParseError {}

/// Parses a setup file into a validated board.
pub fn parse_setup(text: &str) -> Result<Board, ParseError> {
    let goal_line = text.lines().next().ok_or(ParseError::MissingGoal)?;
    let goal = parse_goal(goal_line)?;

    let mut pieces = Vec::new();
    for (row, line) in text.lines().enumerate().skip(2).take(19) {
        for (column, ch) in line.chars().enumerate() {
            if ch == 'O' {
                pieces.push(decode_marker(row as i32, column as i32));
            }
        }
    }

    let board = Board::new(goal, pieces);
    board.validate().map_err(ParseError::InvalidSetup)?;
    Ok(board)
}

/// Renders a board back into the setup file format.
///
/// The output is the plain art with `O` markers in place of the center dots,
/// which `parse_setup` accepts unchanged.
pub fn write_setup(board: &Board) -> String {
    let (x, y) = board.goal();
    let art = render_plain(board).replace('●', "O");
    format!("Goal: {x}, {y}\n\n{art}")
}

fn parse_goal(line: &str) -> Result<Coord, ParseError> {
    let invalid = || ParseError::InvalidGoal {
        line: line.to_string(),
    };
    let rest = line.strip_prefix("Goal: ").ok_or_else(invalid)?;
    let (x, y) = rest.split_once(", ").ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

/// Decodes one `O` marker at file line `row`, column `column` into a piece.
///
/// Floor division keeps hostile marker positions decoding to off-board
/// pieces (negative coordinates) that validation then rejects, instead of
/// silently snapping to cell 0.
fn decode_marker(row: i32, column: i32) -> Piece {
    let (height, y_raw) = if row % 4 == 0 {
        (1, row - 1)
    } else {
        (2, row - 3)
    };
    let (width, x_raw) = if (column + 3) % 8 == 0 {
        (1, column)
    } else {
        (2, column - 4)
    };
    Piece::new(
        (x_raw - 3).div_euclid(8),
        (y_raw - 3).div_euclid(4),
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Shape;

    const CLASSIC: &str = include_str!("../khun_phaen.txt");

    #[test]
    fn test_parse_the_shipped_classic_setup() {
        let board = parse_setup(CLASSIC).unwrap();
        assert_eq!(board.goal(), (1, 3));
        assert_eq!(board.pieces().len(), 10);
        assert_eq!(board.khun().pos(), (1, 0));

        let count = |shape| board.pieces().iter().filter(|p| p.shape() == shape).count();
        assert_eq!(count(Shape::Khun), 1);
        assert_eq!(count(Shape::VerticalBar), 4);
        assert_eq!(count(Shape::HorizontalBar), 1);
        assert_eq!(count(Shape::Small), 4);
    }

    #[test]
    fn test_write_setup_round_trips_the_classic_file() {
        let board = parse_setup(CLASSIC).unwrap();
        assert_eq!(write_setup(&board), CLASSIC);
    }

    #[test]
    fn test_round_trip_of_a_handmade_board() {
        let board = Board::new(
            (2, 3),
            vec![
                Piece::new(0, 0, 2, 2),
                Piece::new(2, 0, 2, 1),
                Piece::new(0, 2, 1, 2),
                Piece::new(3, 1, 1, 1),
            ],
        );
        let reparsed = parse_setup(&write_setup(&board)).unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn test_empty_input_is_missing_the_goal() {
        assert_eq!(parse_setup(""), Err(ParseError::MissingGoal));
    }

    #[test]
    fn test_malformed_goal_line_is_rejected() {
        let err = parse_setup("Target: 1, 3\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidGoal { .. }));

        let err = parse_setup("Goal: one, 3\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidGoal { .. }));
    }

    #[test]
    fn test_a_minimal_marker_file_parses() {
        // a khun center sits at line 6, column 17 for the piece at (1, 0)
        let text = "Goal: 1, 3\n\n\n\n\n\n                 O\n";
        let board = parse_setup(text).unwrap();
        assert_eq!(board.pieces().len(), 1);
        assert_eq!(board.khun().pos(), (1, 0));
    }

    #[test]
    fn test_overlapping_markers_are_rejected() {
        // khun centers at (1, 0) and (2, 0) share the column x = 2
        let text = "Goal: 0, 3\n\n\n\n\n\n                 O       O\n";
        let err = parse_setup(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidSetup(SetupError::Overlap { .. })
        ));
    }

    #[test]
    fn test_markers_off_the_board_are_rejected() {
        // decodes to a 2x2 at x = 3, which would hang over the right edge
        let text = "Goal: 0, 3\n\n\n\n\n\n                                 O\n";
        let err = parse_setup(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidSetup(SetupError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_a_board_without_a_khun_is_rejected() {
        // a single pawn marker at line 4, column 5 for the piece at (0, 0)
        let text = "Goal: 0, 3\n\n\n\n     O\n";
        let err = parse_setup(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSetup(SetupError::KhunCount { count: 0 })
        );
    }
}
