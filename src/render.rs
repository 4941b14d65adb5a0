//! Terminal rendering of boards and solution replay.
//!
//! A board draws as a 21-row, 35-column block drawing: a `▀`/`▄` border,
//! one outlined box per piece and a `●` on each piece's center. A piece at
//! cell (x, y) has its art origin at row `1 + 4y`, column `2 + 8x`; its
//! outline spans `4*height - 1` rows and `8*width - 1` columns. The colored
//! variant styles every piece glyph with its class color.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::style::{style, Color as TermColor, Stylize};
use crossterm::{cursor, execute, terminal};

use crate::board::Board;
use crate::piece::{Color, Piece};

/// Art rows, including both border rows.
const ART_ROWS: usize = 21;

/// Art columns, including both border columns.
const ART_COLS: usize = 35;

/// Lines one replay frame occupies: step header, separator, art.
const FRAME_LINES: u16 = 2 + ART_ROWS as u16;

/// One canvas cell: a glyph plus the piece color painted over it.
#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Option<Color>,
}

type Canvas = [[Cell; ART_COLS]; ART_ROWS];

/// The empty playing field: border glyphs only, no color.
fn blank_canvas() -> Canvas {
    let blank = Cell {
        glyph: ' ',
        color: None,
    };
    let mut canvas = [[blank; ART_COLS]; ART_ROWS];
    for row in &mut canvas {
        row[0].glyph = '█';
        row[ART_COLS - 1].glyph = '█';
    }
    for column in 1..ART_COLS - 1 {
        canvas[0][column].glyph = '▀';
        canvas[ART_ROWS - 1][column].glyph = '▄';
    }
    canvas
}

/// Draws one piece's outline and center dot. Expects an on-board piece.
fn draw_piece(canvas: &mut Canvas, piece: &Piece) {
    let row = (1 + 4 * piece.y()) as usize;
    let column = (2 + 8 * piece.x()) as usize;
    let color = Some(piece.color());

    let side_rows = (4 * piece.height() - 1) as usize;
    let right = (8 * piece.width() - 2) as usize;

    for i in 0..side_rows {
        canvas[row + i][column] = Cell { glyph: '█', color };
        canvas[row + i][column + right] = Cell { glyph: '█', color };
    }
    for j in 1..right {
        canvas[row][column + j] = Cell { glyph: '▀', color };
        canvas[row + side_rows - 1][column + j] = Cell { glyph: '▄', color };
    }

    canvas[row + (2 * piece.height() - 1) as usize][column + (4 * piece.width() - 1) as usize] =
        Cell { glyph: '●', color };
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Yellow => TermColor::Yellow,
        Color::Green => TermColor::Green,
        Color::Red => TermColor::Red,
    }
}

fn paint(board: &Board, colored: bool) -> String {
    let mut canvas = blank_canvas();
    for piece in board.pieces() {
        draw_piece(&mut canvas, piece);
    }

    let mut out = String::new();
    for row in &canvas {
        for cell in row {
            match cell.color {
                Some(color) if colored => {
                    out.push_str(&style(cell.glyph).with(term_color(color)).to_string());
                }
                _ => out.push(cell.glyph),
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the board as colored block art for the terminal.
pub fn render(board: &Board) -> String {
    paint(board, true)
}

/// Renders the board without escape codes, for setup files and snapshots.
pub fn render_plain(board: &Board) -> String {
    paint(board, false)
}

/// Plays a solution path in place, overdrawing one frame with the next.
pub fn replay(path: &[Board], delay: Duration) -> io::Result<()> {
    let mut stdout = io::stdout();
    for (step, board) in path.iter().enumerate() {
        if step > 0 {
            execute!(
                stdout,
                cursor::MoveUp(FRAME_LINES),
                terminal::Clear(terminal::ClearType::FromCursorDown)
            )?;
        }
        writeln!(stdout, "Step {:>3}/{}", step + 1, path.len())?;
        writeln!(stdout)?;
        write!(stdout, "{}", render(board))?;
        stdout.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}
