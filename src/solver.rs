//! Breadth-first Khun Phaen solver.
//!
//! Key properties:
//! - FIFO expansion: the first configuration popped with the khun on the goal
//!   ends a shortest solution
//! - FxHashSet of board fingerprints for state deduplication
//! - Bitmask subset test for move legality instead of per-cell scans
//! - Parent chain on `Rc` nodes; the path unwinds iteratively

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::fringe::{Fringe, FringeMode, FringeOverflow, FringeStats, MAX_FRINGE_SIZE};
use crate::piece::Direction;

/// A search-tree node: a configuration plus how the search reached it.
///
/// Boards stay plain values; search bookkeeping lives here. A node is kept
/// alive by the fringe and by the parent chains of nodes still queued, and
/// drops as soon as neither references it.
struct Node {
    board: Board,
    parent: Option<Rc<Node>>,
    depth: u32,
}

/// Outcome of a search that ran to completion.
#[derive(Debug)]
pub struct SolveReport {
    /// Configurations from the start to the solved state inclusive, or
    /// `None` when the reachable space holds no solution.
    pub path: Option<Vec<Board>>,
    /// Frontier statistics at the moment the search ended.
    pub stats: FringeStats,
}

/// Every configuration reachable from `board` by sliding one piece one cell.
///
/// A move is legal when the shifted piece stays on the translation-check grid
/// and every moved cell lands on a free cell or a cell the piece already
/// covers. Pure: repeated calls yield the same successors in the same order.
pub fn legal_moves(board: &Board) -> Vec<Board> {
    let free = board.free_cells();
    let mut successors = Vec::new();

    for (index, piece) in board.pieces().iter().enumerate() {
        // a piece may slide through cells it currently covers
        let valid_targets = free | piece.cells();
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let Some(moved_cells) = piece.try_shift(dx, dy) else {
                continue;
            };
            if moved_cells & !valid_targets != 0 {
                continue;
            }
            successors.push(board.with_replaced_piece(index, piece.shifted(dx, dy)));
        }
    }

    successors
}

/// Pushes every unseen successor of `node`, recording fingerprints as it goes.
fn expand(
    node: &Rc<Node>,
    fringe: &mut Fringe<Rc<Node>>,
    seen: &mut FxHashSet<u64>,
) -> Result<(), FringeOverflow> {
    for successor in legal_moves(&node.board) {
        let fingerprint = successor.fingerprint();
        if seen.contains(&fingerprint) {
            continue;
        }
        fringe.push(Rc::new(Node {
            board: successor,
            parent: Some(Rc::clone(node)),
            depth: node.depth + 1,
        }))?;
        seen.insert(fingerprint);
    }
    Ok(())
}

/// Collects the boards along the parent chain in start-to-goal order.
fn unwind(goal: &Rc<Node>) -> Vec<Board> {
    let mut path = Vec::with_capacity(goal.depth as usize + 1);
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.board.clone());
        current = node.parent.as_ref();
    }
    path.reverse();
    path
}

/// Searches breadth-first for a shortest solution from `start`.
///
/// The root (depth 0) is expanded before the loop; the goal test runs on
/// popped nodes. Both completed outcomes carry the final fringe statistics.
/// A frontier growing past `max_fringe` (default [`MAX_FRINGE_SIZE`]) aborts
/// the search with the fringe's typed overflow error.
pub fn solve(start: &Board, max_fringe: Option<usize>) -> Result<SolveReport, FringeOverflow> {
    let capacity = max_fringe.unwrap_or(MAX_FRINGE_SIZE);
    let mut fringe = Fringe::with_capacity(FringeMode::Fifo, capacity);
    let mut seen = FxHashSet::default();

    let root = Rc::new(Node {
        board: start.clone(),
        parent: None,
        depth: 0,
    });
    seen.insert(root.board.fingerprint());
    expand(&root, &mut fringe, &mut seen)?;

    while let Some(node) = fringe.pop() {
        if node.board.is_solved() {
            return Ok(SolveReport {
                path: Some(unwind(&node)),
                stats: fringe.stats(),
            });
        }
        expand(&node, &mut fringe, &mut seen)?;
    }

    Ok(SolveReport {
        path: None,
        stats: fringe.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    /// The khun one step above its goal, the bottom row fully free.
    fn one_move_board() -> Board {
        Board::new(
            (1, 3),
            vec![
                Piece::new(1, 2, 2, 2),
                Piece::new(0, 0, 1, 2),
                Piece::new(3, 0, 1, 2),
                Piece::new(1, 0, 2, 1),
                Piece::new(1, 1, 2, 1),
                Piece::new(0, 2, 1, 1),
                Piece::new(3, 2, 1, 1),
                Piece::new(0, 3, 1, 1),
                Piece::new(3, 3, 1, 1),
            ],
        )
    }

    /// Every cell covered; nothing can move and the khun is off goal.
    fn boxed_board() -> Board {
        Board::new(
            (1, 3),
            vec![
                Piece::new(1, 0, 2, 2),
                Piece::new(0, 0, 1, 2),
                Piece::new(3, 0, 1, 2),
                Piece::new(1, 2, 2, 1),
                Piece::new(0, 2, 1, 1),
                Piece::new(3, 2, 1, 1),
                Piece::new(0, 3, 1, 1),
                Piece::new(1, 3, 1, 1),
                Piece::new(2, 3, 1, 1),
                Piece::new(3, 3, 1, 1),
                Piece::new(0, 4, 1, 1),
                Piece::new(1, 4, 1, 1),
                Piece::new(2, 4, 1, 1),
                Piece::new(3, 4, 1, 1),
            ],
        )
    }

    /// The khun alone in open space. Its top-left can never reach x = 3,
    /// so a goal there makes the search exhaust all 12 reachable placements.
    fn lone_khun_board() -> Board {
        Board::new((3, 3), vec![Piece::new(1, 1, 2, 2)])
    }

    #[test]
    fn test_legal_moves_of_the_one_move_board() {
        let successors = legal_moves(&one_move_board());
        // khun down, plus the two bottom pawns down
        assert_eq!(successors.len(), 3);
        assert!(successors[0].is_solved(), "the khun's move is generated first");
    }

    #[test]
    fn test_legal_moves_is_pure() {
        let board = one_move_board();
        assert_eq!(legal_moves(&board), legal_moves(&board));
    }

    #[test]
    fn test_legal_moves_produce_valid_boards() {
        for successor in legal_moves(&one_move_board()) {
            assert_eq!(successor.validate(), Ok(()));
        }
        for successor in legal_moves(&lone_khun_board()) {
            assert_eq!(successor.validate(), Ok(()));
        }
    }

    #[test]
    fn test_one_move_solution_has_path_length_two() {
        let report = solve(&one_move_board(), None).unwrap();
        let path = report.path.expect("one move from the goal must solve");
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], one_move_board());
        assert!(path[1].is_solved());
        assert_eq!(path[1].khun().pos(), (1, 3));
    }

    #[test]
    fn test_one_move_solution_stats() {
        let report = solve(&one_move_board(), None).unwrap();
        assert_eq!(report.stats.insertions, 3, "the root has three successors");
        assert_eq!(report.stats.deletions, 1, "the first pop is already solved");
        assert_eq!(report.stats.max_size, 3);
        assert_eq!(report.stats.size, 2);
    }

    #[test]
    fn test_boxed_in_start_exhausts_immediately() {
        let board = boxed_board();
        assert_eq!(board.validate(), Ok(()), "the fixture must be playable");
        let report = solve(&board, None).unwrap();
        assert!(report.path.is_none());
        assert_eq!(report.stats.insertions, 0);
        assert_eq!(report.stats.deletions, 0);
        assert_eq!(report.stats.max_size, 0);
    }

    #[test]
    fn test_exhaustion_visits_each_reachable_state_once() {
        let report = solve(&lone_khun_board(), None).unwrap();
        assert!(report.path.is_none());
        assert_eq!(report.stats.insertions, 11, "11 placements beyond the root");
        assert_eq!(report.stats.deletions, 11, "the fringe drains completely");
        assert_eq!(report.stats.size, 0);
    }

    #[test]
    fn test_dedup_on_a_two_piece_space() {
        // the khun plus one pawn reach 192 distinct configurations; with
        // dedup every one of them is pushed exactly once
        let board = Board::new((3, 3), vec![Piece::new(0, 0, 2, 2), Piece::new(3, 4, 1, 1)]);
        let report = solve(&board, None).unwrap();
        assert!(report.path.is_none());
        assert_eq!(report.stats.insertions, 191);
        assert_eq!(report.stats.deletions, 191);
    }

    #[test]
    fn test_bfs_finds_a_minimal_path() {
        // the lone khun walks from (0, 0) to (0, 3): three moves, no shorter
        let board = Board::new((0, 3), vec![Piece::new(0, 0, 2, 2)]);
        let report = solve(&board, None).unwrap();
        let path = report.path.expect("open space must solve");
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_path_steps_are_single_legal_moves() {
        let board = Board::new((2, 3), vec![Piece::new(0, 0, 2, 2)]);
        let path = solve(&board, None).unwrap().path.unwrap();
        assert_eq!(path.len(), 6, "manhattan distance 5 in open space");
        for pair in path.windows(2) {
            assert!(
                legal_moves(&pair[0]).contains(&pair[1]),
                "each step must be one legal move of its predecessor"
            );
        }
    }

    #[test]
    fn test_overflow_surfaces_capacity_and_stats() {
        // the lone khun's root has four successors; a bound of three fails
        // during the root expansion
        let overflow = solve(&lone_khun_board(), Some(3)).unwrap_err();
        assert_eq!(overflow.capacity, 3);
        assert_eq!(overflow.stats.insertions, 3, "insertions stop at the bound");
        assert_eq!(overflow.stats.deletions, 0);
        assert_eq!(overflow.stats.size, 3);
    }
}
