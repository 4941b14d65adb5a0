//! Piece definitions and coordinate types.
//!
//! Each piece is an axis-aligned rectangle identified by its top-left cell
//! and its extent. Pieces are immutable values; sliding one produces a new
//! `Piece`.

use std::cmp::Ordering;
use std::fmt;

/// A board cell position, x growing to the right and y growing downward.
pub type Coord = (i32, i32);

/// A set of cells as a bitmask over the translation-check grid.
///
/// The check grid is one cell wider and taller than the board (x in 0..=4,
/// y in 0..=5) so that a shifted piece can be represented before the move
/// generator decides whether it stays on the board. Bit index is `y * 5 + x`.
pub type CellSet = u32;

/// Inclusive upper bounds of the translation-check grid.
const X_MAX: i32 = 4;
const Y_MAX: i32 = 5;

/// Columns in the translation-check grid.
const CHECK_COLS: i32 = X_MAX + 1;

/// Returns the bit for a single cell on the translation-check grid.
///
/// Callers ensure the cell lies on the grid; validation runs before any
/// mask is formed from file input.
#[inline(always)]
pub const fn cell_bit(x: i32, y: i32) -> CellSet {
    1 << (y * CHECK_COLS + x)
}

/// The four sliding directions, tried in a fixed order by the move generator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The (dx, dy) unit offset for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Shape class of a piece, derived from its extent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shape {
    /// 1x1 pawn.
    Small,
    /// 2x1 horizontal bar.
    HorizontalBar,
    /// 1x2 vertical bar.
    VerticalBar,
    /// The single 2x2 goal piece.
    Khun,
}

/// Display color of a piece class. Move legality never consults this.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Yellow,
    Green,
    Red,
}

/// A puzzle piece: top-left cell plus width and height in cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Piece {
    /// Creates a piece. Extents outside {1, 2} are programmer error.
    ///
    /// Coordinates are deliberately not checked here: the setup parser may
    /// build an off-board piece from a malformed file, and board validation
    /// reports that as a typed error instead of a panic.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(width == 1 || width == 2, "piece width must be 1 or 2");
        assert!(height == 1 || height == 2, "piece height must be 1 or 2");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The piece's top-left cell.
    #[inline]
    pub fn pos(&self) -> Coord {
        (self.x, self.y)
    }

    /// Bitmask of the cells this piece covers.
    #[inline]
    pub fn cells(&self) -> CellSet {
        let mut cells = 0;
        for dx in 0..self.width {
            for dy in 0..self.height {
                cells |= cell_bit(self.x + dx, self.y + dy);
            }
        }
        cells
    }

    /// Cells covered after translating by (dx, dy), or `None` if any cell
    /// would leave the translation-check grid.
    ///
    /// The bounds here are loose on purpose: x = 4 and y = 5 pass even though
    /// they are off the board, and the move generator's free-cell subset test
    /// culls them. A single out-of-bounds cell invalidates the whole move;
    /// there is no partial application.
    pub fn try_shift(&self, dx: i32, dy: i32) -> Option<CellSet> {
        let moved_x = self.x + dx;
        let moved_y = self.y + dy;
        let mut cells = 0;
        for i in 0..self.width {
            for j in 0..self.height {
                let cx = moved_x + i;
                let cy = moved_y + j;
                if !(0..=X_MAX).contains(&cx) || !(0..=Y_MAX).contains(&cy) {
                    return None;
                }
                cells |= cell_bit(cx, cy);
            }
        }
        Some(cells)
    }

    /// The piece translated by (dx, dy).
    #[inline]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Shape class derived from the extent.
    pub fn shape(&self) -> Shape {
        match (self.width, self.height) {
            (1, 1) => Shape::Small,
            (2, 1) => Shape::HorizontalBar,
            (1, 2) => Shape::VerticalBar,
            _ => Shape::Khun,
        }
    }

    /// Display color for this piece's shape class.
    pub fn color(&self) -> Color {
        match self.shape() {
            Shape::Small => Color::Yellow,
            Shape::HorizontalBar | Shape::VerticalBar => Color::Green,
            Shape::Khun => Color::Red,
        }
    }

    /// Whether this is the 2x2 goal piece.
    #[inline]
    pub fn is_khun(&self) -> bool {
        self.width == 2 && self.height == 2
    }
}

/// Canonical piece order: the khun first, then ascending x, then y.
///
/// On a valid board no two pieces share a top-left cell, so the extent
/// tiebreaks only exist to keep the order total.
impl Ord for Piece {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_khun()
            .cmp(&self.is_khun())
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
            .then(self.width.cmp(&other.width))
            .then(self.height.cmp(&other.height))
    }
}

impl PartialOrd for Piece {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}), {}x{}", self.x, self.y, self.width, self.height)
    }
}
