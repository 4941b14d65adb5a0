//! Board configurations.
//!
//! A `Board` is a value: the goal cell plus the piece list held in canonical
//! order (khun first, then ascending x, then y). Keeping the list sorted makes
//! the dedup fingerprint independent of how a configuration was assembled.

use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::piece::{cell_bit, CellSet, Coord, Piece};

/// Board width in cells (x in 0..=3).
pub const FIELD_COLS: i32 = 4;

/// Board height in cells (y in 0..=4).
pub const FIELD_ROWS: i32 = 5;

/// Bitmask of the 20 on-board cells within the translation-check grid.
pub const ALL_CELLS: CellSet = board_cells();

const fn board_cells() -> CellSet {
    let mut cells = 0;
    let mut x = 0;
    while x < FIELD_COLS {
        let mut y = 0;
        while y < FIELD_ROWS {
            cells |= cell_bit(x, y);
            y += 1;
        }
        x += 1;
    }
    cells
}

/// A board setup that cannot be played.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SetupError {
    /// A piece sticks out of the 4x5 board.
    OutOfBounds { piece: Piece },
    /// Two pieces cover a common cell.
    Overlap { first: Piece, second: Piece },
    /// The board must hold exactly one 2x2 piece.
    KhunCount { count: usize },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::OutOfBounds { piece } => {
                write!(f, "piece {piece} does not fit on the 4x5 board")
            }
            SetupError::Overlap { first, second } => {
                write!(f, "pieces {first} and {second} overlap")
            }
            SetupError::KhunCount { count } => {
                write!(f, "expected exactly one 2x2 piece, found {count}")
            }
        }
    }
}

impl Error for SetupError {}

/// A puzzle configuration: the goal cell and the pieces on the board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pieces: Vec<Piece>,
    goal: Coord,
}

impl Board {
    /// Creates a configuration, sorting the pieces into canonical order.
    ///
    /// No validation happens here; `validate` reports setup problems as
    /// typed errors so file input never panics.
    pub fn new(goal: Coord, mut pieces: Vec<Piece>) -> Self {
        pieces.sort_unstable();
        Self { pieces, goal }
    }

    /// The cell the khun's top-left corner must reach.
    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// The pieces in canonical order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The goal piece. Canonical order keeps it at index 0 on a valid board.
    #[inline]
    pub fn khun(&self) -> &Piece {
        &self.pieces[0]
    }

    /// Checks that the setup is playable: every piece on the board, no two
    /// pieces overlapping, exactly one khun.
    ///
    /// Bounds run first so that no bitmask is formed from off-grid cells.
    pub fn validate(&self) -> Result<(), SetupError> {
        for piece in &self.pieces {
            let on_board = piece.x() >= 0
                && piece.y() >= 0
                && piece.x() + piece.width() <= FIELD_COLS
                && piece.y() + piece.height() <= FIELD_ROWS;
            if !on_board {
                return Err(SetupError::OutOfBounds { piece: *piece });
            }
        }
        for (i, first) in self.pieces.iter().enumerate() {
            for second in &self.pieces[i + 1..] {
                if first.cells() & second.cells() != 0 {
                    return Err(SetupError::Overlap {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        let count = self.pieces.iter().filter(|piece| piece.is_khun()).count();
        if count != 1 {
            return Err(SetupError::KhunCount { count });
        }
        Ok(())
    }

    /// Bitmask of every cell covered by a piece.
    pub fn covered_cells(&self) -> CellSet {
        self.pieces
            .iter()
            .fold(0, |covered, piece| covered | piece.cells())
    }

    /// Bitmask of the on-board cells no piece covers.
    #[inline]
    pub fn free_cells(&self) -> CellSet {
        ALL_CELLS & !self.covered_cells()
    }

    /// Whether the khun's top-left corner sits on the goal cell.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.khun().pos() == self.goal
    }

    /// Canonical hash of the piece sequence, the deduplication key.
    ///
    /// Equal piece sets fingerprint identically regardless of insertion
    /// order. The goal cell is fixed for the life of a search and is not
    /// hashed.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.pieces.hash(&mut hasher);
        hasher.finish()
    }

    /// A new configuration with the piece at `index` replaced, re-sorted
    /// into canonical order.
    pub fn with_replaced_piece(&self, index: usize, replacement: Piece) -> Board {
        let mut pieces = self.pieces.clone();
        pieces[index] = replacement;
        Board::new(self.goal, pieces)
    }
}
