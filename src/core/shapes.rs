//! Shapes module - tetromino cell sets and wall kick tables
//!
//! Base cells are offsets from the rotation origin in the spawn orientation;
//! rotated states are derived by transform (see `rotation`), not looked up.
//! Kick data follows SRS. Reference: https://tetris.wiki/SRS

use std::fmt;

use crate::types::PieceKind;

/// Number of cells in every tetromino
pub const CELLS_PER_PIECE: usize = 4;

/// Number of distinct rotation states
pub const ROTATION_STATES: u8 = 4;

/// Kick sets per shape: one per rotation state and turn direction
pub const KICK_SETS: usize = ROTATION_STATES as usize * 2;

/// Candidate (dx, dy) translations tried after a rotation, zero offset first
pub type KickSet = [(i8, i8); 5];

/// Immutable per-kind shape data, shared by every piece of that kind.
#[derive(Debug)]
pub struct TetrominoShape {
    pub kind: PieceKind,
    /// Exactly 4 cell offsets from the rotation origin, spawn orientation.
    pub base_cells: &'static [(i8, i8)],
    /// 8 kick sets, selected by the post-rotation state and turn direction.
    pub wall_kicks: &'static [KickSet],
    /// I and O rotate about a grid intersection rather than a cell center.
    pub centered_pivot: bool,
}

impl TetrominoShape {
    /// Get the shape data for a piece kind
    pub fn of(kind: PieceKind) -> &'static TetrominoShape {
        match kind {
            PieceKind::I => &I_SHAPE,
            PieceKind::O => &O_SHAPE,
            PieceKind::T => &T_SHAPE,
            PieceKind::S => &S_SHAPE,
            PieceKind::Z => &Z_SHAPE,
            PieceKind::J => &J_SHAPE,
            PieceKind::L => &L_SHAPE,
        }
    }

    /// Check the table sizes a piece relies on at rotation time.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.base_cells.len() != CELLS_PER_PIECE {
            return Err(ShapeError::CellCount(self.base_cells.len()));
        }
        if self.wall_kicks.len() != KICK_SETS {
            return Err(ShapeError::KickSets(self.wall_kicks.len()));
        }
        Ok(())
    }
}

/// Configuration error reported when a piece is initialized with a shape
/// whose tables cannot support rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// Wrong number of base cells (carries the actual count).
    CellCount(usize),
    /// Wall kick table does not cover every rotation transition.
    KickSets(usize),
}

impl ShapeError {
    pub fn message(self) -> &'static str {
        match self {
            ShapeError::CellCount(_) => "shape must define exactly 4 cells",
            ShapeError::KickSets(_) => "wall kick table must cover every rotation transition",
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::CellCount(got) => write!(f, "{} (got {})", self.message(), got),
            ShapeError::KickSets(got) => write!(f, "{} (got {})", self.message(), got),
        }
    }
}

impl std::error::Error for ShapeError {}

static I_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::I,
    base_cells: &[(-1, 1), (0, 1), (1, 1), (2, 1)],
    wall_kicks: &I_KICKS,
    centered_pivot: true,
};

static O_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::O,
    base_cells: &[(0, 1), (1, 1), (0, 0), (1, 0)],
    wall_kicks: &O_KICKS,
    centered_pivot: true,
};

static T_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::T,
    base_cells: &[(0, 1), (-1, 0), (0, 0), (1, 0)],
    wall_kicks: &JLSTZ_KICKS,
    centered_pivot: false,
};

static S_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::S,
    base_cells: &[(0, 1), (1, 1), (-1, 0), (0, 0)],
    wall_kicks: &JLSTZ_KICKS,
    centered_pivot: false,
};

static Z_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::Z,
    base_cells: &[(-1, 1), (0, 1), (0, 0), (1, 0)],
    wall_kicks: &JLSTZ_KICKS,
    centered_pivot: false,
};

static J_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::J,
    base_cells: &[(-1, 1), (-1, 0), (0, 0), (1, 0)],
    wall_kicks: &JLSTZ_KICKS,
    centered_pivot: false,
};

static L_SHAPE: TetrominoShape = TetrominoShape {
    kind: PieceKind::L,
    base_cells: &[(1, 1), (-1, 0), (0, 0), (1, 0)],
    wall_kicks: &JLSTZ_KICKS,
    centered_pivot: false,
};

// Kick sets are indexed by the POST-rotation state and turn direction:
// row = wrap(rotation_index * 2 - (ccw ? 1 : 0), 0, 8). Each row is annotated
// with the transition it resolves.

/// JLSTZ kick table (shared by J, L, S, T, Z)
static JLSTZ_KICKS: [KickSet; KICK_SETS] = [
    // 3->0 cw
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->1 ccw
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->1 cw
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->2 ccw
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->2 cw
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 0->3 ccw
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->3 cw
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 ccw
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
];

/// I piece kick table (different from JLSTZ)
static I_KICKS: [KickSet; KICK_SETS] = [
    // 3->0 cw
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->1 ccw
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->1 cw
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->2 ccw
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->2 cw
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 0->3 ccw
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->3 cw
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->0 ccw
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
];

/// O piece never needs to kick (its rotation maps the cell set onto itself)
static O_KICKS: [KickSet; KICK_SETS] = [[(0, 0); 5]; KICK_SETS];
