//! Rotation resolver tests - round trips, index wrapping, and kick search

use std::cell::RefCell;

use falling_piece::core::{Board, Piece, TetrominoShape};
use falling_piece::types::PieceKind;

/// Board with no walls and no occupancy.
struct OpenBoard;

impl Board for OpenBoard {
    fn clear(&mut self, _piece: &Piece) {}
    fn set(&mut self, _piece: &Piece) {}
    fn is_valid_position(&self, _piece: &Piece, _position: (i8, i8)) -> bool {
        true
    }
}

/// Board that accepts exactly one anchor position.
struct PinnedBoard {
    allowed: (i8, i8),
}

impl Board for PinnedBoard {
    fn clear(&mut self, _piece: &Piece) {}
    fn set(&mut self, _piece: &Piece) {}
    fn is_valid_position(&self, _piece: &Piece, position: (i8, i8)) -> bool {
        position == self.allowed
    }
}

/// Board that rejects everything and records each anchor it was asked about.
struct RecordingBoard {
    probed: RefCell<Vec<(i8, i8)>>,
}

impl RecordingBoard {
    fn new() -> Self {
        Self {
            probed: RefCell::new(Vec::new()),
        }
    }
}

impl Board for RecordingBoard {
    fn clear(&mut self, _piece: &Piece) {}
    fn set(&mut self, _piece: &Piece) {}
    fn is_valid_position(&self, _piece: &Piece, position: (i8, i8)) -> bool {
        self.probed.borrow_mut().push(position);
        false
    }
}

fn piece_of(kind: PieceKind) -> Piece {
    Piece::new(TetrominoShape::of(kind), (4, 10), 0.0).expect("valid shape")
}

// ============== Round Trip Tests ==============

#[test]
fn test_rotate_and_rotate_back_restores_piece_exactly() {
    let mut board = OpenBoard;

    for kind in PieceKind::ALL {
        for start in 0..4 {
            let mut piece = piece_of(kind);
            for _ in 0..start {
                assert!(piece.rotate_cw(&mut board));
            }

            let cells = piece.cells().to_vec();
            let position = piece.position();
            let index = piece.rotation_index();

            assert!(piece.rotate_cw(&mut board));
            assert!(piece.rotate_ccw(&mut board));
            assert_eq!(piece.cells(), cells.as_slice(), "{:?} cw/ccw from {}", kind, start);
            assert_eq!(piece.position(), position);
            assert_eq!(piece.rotation_index(), index);

            assert!(piece.rotate_ccw(&mut board));
            assert!(piece.rotate_cw(&mut board));
            assert_eq!(piece.cells(), cells.as_slice(), "{:?} ccw/cw from {}", kind, start);
            assert_eq!(piece.position(), position);
            assert_eq!(piece.rotation_index(), index);
        }
    }
}

#[test]
fn test_four_cw_rotations_are_identity_for_centered_pivot() {
    let mut board = OpenBoard;

    for kind in [PieceKind::I, PieceKind::O] {
        let mut piece = piece_of(kind);
        let cells = piece.cells().to_vec();

        for _ in 0..4 {
            assert!(piece.rotate_cw(&mut board));
        }

        assert_eq!(piece.cells(), cells.as_slice(), "{:?} ceil path drifted", kind);
        assert_eq!(piece.position(), (4, 10));
        assert_eq!(piece.rotation_index(), 0);
    }
}

#[test]
fn test_four_cw_rotations_are_identity_for_cell_center_pivot() {
    let mut board = OpenBoard;

    for kind in [
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ] {
        let mut piece = piece_of(kind);
        let cells = piece.cells().to_vec();

        for _ in 0..4 {
            assert!(piece.rotate_cw(&mut board));
        }

        assert_eq!(piece.cells(), cells.as_slice(), "{:?} nearest path drifted", kind);
        assert_eq!(piece.position(), (4, 10));
        assert_eq!(piece.rotation_index(), 0);
    }
}

// ============== Rotation Index Tests ==============

#[test]
fn test_rotation_index_wraps_ccw_from_zero() {
    let mut board = OpenBoard;
    let mut piece = piece_of(PieceKind::T);

    assert!(piece.rotate_ccw(&mut board));
    assert_eq!(piece.rotation_index(), 3);

    for expected in [2, 1, 0, 3] {
        assert!(piece.rotate_ccw(&mut board));
        assert_eq!(piece.rotation_index(), expected);
    }
}

#[test]
fn test_rotation_index_stays_in_range_under_mixed_turns() {
    let mut board = OpenBoard;
    let mut piece = piece_of(PieceKind::J);

    for turn in 0..16 {
        if turn % 3 == 0 {
            piece.rotate_ccw(&mut board);
        } else {
            piece.rotate_cw(&mut board);
        }
        assert!(piece.rotation_index() < 4);
    }
}

// ============== Wall Kick Tests ==============

#[test]
fn test_kick_search_commits_first_valid_candidate() {
    // T rotating cw out of spawn uses the 0->1 kick set:
    // (0,0), (-1,0), (-1,1), (0,-2), (-1,-2). Only the 3rd may fit here.
    let mut board = PinnedBoard { allowed: (3, 11) };
    let mut piece = piece_of(PieceKind::T);

    assert!(piece.rotate_cw(&mut board));
    assert_eq!(piece.position(), (3, 11));
    assert_eq!(piece.rotation_index(), 1);
}

#[test]
fn test_kick_search_probes_candidates_in_table_order() {
    let mut board = RecordingBoard::new();
    let mut piece = piece_of(PieceKind::T);

    assert!(!piece.rotate_cw(&mut board));

    // Anchor plus each 0->1 candidate, in table order, nothing else.
    let probed = board.probed.borrow();
    assert_eq!(
        probed.as_slice(),
        &[(4, 10), (3, 10), (3, 11), (4, 8), (3, 8)]
    );
}

#[test]
fn test_rejected_rotation_is_a_committed_noop() {
    for kind in [PieceKind::T, PieceKind::I] {
        let mut board = RecordingBoard::new();
        let mut piece = piece_of(kind);

        let cells = piece.cells().to_vec();
        let position = piece.position();
        let index = piece.rotation_index();

        assert!(!piece.rotate_cw(&mut board));
        assert_eq!(piece.cells(), cells.as_slice(), "{:?} cells changed", kind);
        assert_eq!(piece.position(), position);
        assert_eq!(piece.rotation_index(), index);

        assert!(!piece.rotate_ccw(&mut board));
        assert_eq!(piece.cells(), cells.as_slice(), "{:?} cells changed", kind);
        assert_eq!(piece.position(), position);
        assert_eq!(piece.rotation_index(), index);
    }
}

#[test]
fn test_o_piece_rotation_keeps_square_in_place() {
    let mut board = OpenBoard;
    let mut piece = piece_of(PieceKind::O);
    let original = piece.cells().to_vec();

    assert!(piece.rotate_cw(&mut board));
    assert_eq!(piece.position(), (4, 10));

    let mut rotated = piece.cells().to_vec();
    let mut expected = original.clone();
    rotated.sort_unstable();
    expected.sort_unstable();
    // Same square, cells cycled within it.
    assert_eq!(rotated, expected);

    for _ in 0..3 {
        assert!(piece.rotate_cw(&mut board));
    }
    assert_eq!(piece.cells(), original.as_slice());
}
