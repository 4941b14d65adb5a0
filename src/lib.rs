//! Khun Phaen Puzzle Solver Library
//!
//! Provides board modeling, setup-file parsing, breadth-first solving and
//! terminal replay for the Khun Phaen sliding-block puzzle.

pub mod board;
pub mod fringe;
pub mod parser;
pub mod piece;
pub mod render;
pub mod solver;
