//! Piece module - the active falling piece's state machine
//!
//! A [`Piece`] owns its cell offsets, board anchor, rotation index, and the
//! timers that drive gravity, held-direction auto-repeat, and fast drop.
//! Every operation follows the same shape: clear the footprint from the
//! board, mutate against a validation query, stamp the footprint back.
//!
//! Timers hold absolute next-fire timestamps against an injected clock
//! (seconds), so cadence does not drift with frame-length jitter. Fast drop
//! is a flag on the shared fall timer rather than a separate repeating task,
//! which makes a second concurrent fast-drop loop unrepresentable.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::rotation;
use crate::core::shapes::{ShapeError, TetrominoShape, CELLS_PER_PIECE};
use crate::types::{PieceKind, TimingConfig, DOWN, LEFT, RIGHT};

/// Active falling piece
#[derive(Debug, Clone)]
pub struct Piece {
    pub(crate) shape: &'static TetrominoShape,
    /// Current rotated cell offsets, mutated in place by rotation.
    pub(crate) cells: ArrayVec<(i8, i8), CELLS_PER_PIECE>,
    /// Board anchor; absolute cells = position + cells[i].
    pub(crate) position: (i8, i8),
    /// Which of the four orientations is active, always in 0..4.
    pub(crate) rotation_index: u8,
    timing: TimingConfig,
    next_fall_time: f64,
    next_move_time: f64,
    is_fast_dropping: bool,
    is_moving_left: bool,
    is_moving_right: bool,
}

impl Piece {
    /// Create a piece at `position` with default timing.
    pub fn new(
        shape: &'static TetrominoShape,
        position: (i8, i8),
        now: f64,
    ) -> Result<Self, ShapeError> {
        Self::with_timing(shape, position, TimingConfig::default(), now)
    }

    /// Create a piece at `position` with the given timing intervals.
    pub fn with_timing(
        shape: &'static TetrominoShape,
        position: (i8, i8),
        timing: TimingConfig,
        now: f64,
    ) -> Result<Self, ShapeError> {
        let mut piece = Self {
            shape,
            cells: ArrayVec::new(),
            position,
            rotation_index: 0,
            timing,
            next_fall_time: 0.0,
            next_move_time: 0.0,
            is_fast_dropping: false,
            is_moving_left: false,
            is_moving_right: false,
        };
        piece.initialize(position, shape, now)?;
        Ok(piece)
    }

    /// Re-arm this piece with a new shape and position, reusing the cell
    /// buffer. Fails fast if the shape's tables cannot support rotation.
    pub fn initialize(
        &mut self,
        position: (i8, i8),
        shape: &'static TetrominoShape,
        now: f64,
    ) -> Result<(), ShapeError> {
        shape.validate()?;
        self.shape = shape;
        self.position = position;
        self.rotation_index = 0;
        self.cells.clear();
        self.cells.extend(shape.base_cells.iter().copied());
        self.is_fast_dropping = false;
        self.is_moving_left = false;
        self.is_moving_right = false;
        self.next_fall_time = now + self.timing.fall_interval;
        self.next_move_time = now;
        Ok(())
    }

    /// Advance timers one frame: gravity first, then any held direction.
    ///
    /// Move failures are silent; a failed gravity step while fast-dropping
    /// ends the fast drop and resumes the normal fall interval. Returns true
    /// if the piece moved this tick.
    pub fn tick<B: Board>(&mut self, board: &mut B, now: f64) -> bool {
        board.clear(self);
        let mut moved = false;

        if now >= self.next_fall_time {
            let dropped = self.try_move(board, DOWN);
            moved |= dropped;
            if self.is_fast_dropping && !dropped {
                // Landed: the fast-drop cycle ends here.
                self.is_fast_dropping = false;
            }
            let interval = if self.is_fast_dropping {
                self.timing.fast_fall_interval
            } else {
                self.timing.fall_interval
            };
            self.next_fall_time = now + interval;
        }

        if now >= self.next_move_time {
            if self.is_moving_left {
                moved |= self.try_move(board, LEFT);
                self.next_move_time = now + self.timing.move_delay;
            } else if self.is_moving_right {
                moved |= self.try_move(board, RIGHT);
                self.next_move_time = now + self.timing.move_delay;
            }
        }

        board.set(self);
        moved
    }

    /// Start holding left: one immediate step, then auto-repeat on tick.
    /// Cancels a held right (the directions are mutually exclusive).
    pub fn move_left<B: Board>(&mut self, board: &mut B, now: f64) -> bool {
        board.clear(self);
        self.is_moving_left = true;
        self.is_moving_right = false;
        let moved = self.try_move(board, LEFT);
        self.next_move_time = now + self.timing.move_delay;
        board.set(self);
        moved
    }

    /// Start holding right: one immediate step, then auto-repeat on tick.
    /// Cancels a held left.
    pub fn move_right<B: Board>(&mut self, board: &mut B, now: f64) -> bool {
        board.clear(self);
        self.is_moving_right = true;
        self.is_moving_left = false;
        let moved = self.try_move(board, RIGHT);
        self.next_move_time = now + self.timing.move_delay;
        board.set(self);
        moved
    }

    /// Release both held directions; position is untouched.
    pub fn stop_moving(&mut self) {
        self.is_moving_left = false;
        self.is_moving_right = false;
    }

    /// Begin fast-dropping: one immediate downward step, then repeats at the
    /// fast interval through the normal tick path until the piece lands or
    /// [`Piece::stop_fast_drop`] is called.
    ///
    /// Restarting while already active just reschedules the shared fall
    /// timer; there is never more than one fast-drop cycle per piece.
    pub fn start_fast_drop<B: Board>(&mut self, board: &mut B, now: f64) {
        self.is_fast_dropping = true;
        board.clear(self);
        let dropped = self.try_move(board, DOWN);
        board.set(self);
        if dropped {
            self.next_fall_time = now + self.timing.fast_fall_interval;
        } else {
            self.is_fast_dropping = false;
            self.next_fall_time = now + self.timing.fall_interval;
        }
    }

    /// End fast-dropping and resume the normal fall interval.
    pub fn stop_fast_drop(&mut self, now: f64) {
        self.is_fast_dropping = false;
        self.next_fall_time = now + self.timing.fall_interval;
    }

    /// Rotate a quarter turn clockwise, kicking off walls if needed.
    pub fn rotate_cw<B: Board>(&mut self, board: &mut B) -> bool {
        self.rotate(board, true)
    }

    /// Rotate a quarter turn counter-clockwise, kicking off walls if needed.
    pub fn rotate_ccw<B: Board>(&mut self, board: &mut B) -> bool {
        self.rotate(board, false)
    }

    fn rotate<B: Board>(&mut self, board: &mut B, clockwise: bool) -> bool {
        board.clear(self);
        // Stamping after a rejected rotation is fine: the resolver reverts
        // all piece state, so the same footprint goes back down.
        let rotated = rotation::try_rotate(self, board, clockwise);
        board.set(self);
        rotated
    }

    /// Attempt to translate the piece, committing only if the board approves.
    pub fn try_move<B: Board>(&mut self, board: &B, translation: (i8, i8)) -> bool {
        let candidate = (
            self.position.0 + translation.0,
            self.position.1 + translation.1,
        );
        let valid = board.is_valid_position(self, candidate);
        if valid {
            self.position = candidate;
        }
        valid
    }

    /// Drop straight down as far as the board allows; returns the distance.
    /// Locking the piece in place stays with the caller.
    pub fn hard_drop<B: Board>(&mut self, board: &mut B) -> u8 {
        board.clear(self);
        let mut distance = 0u8;
        while self.try_move(board, DOWN) {
            distance += 1;
        }
        board.set(self);
        distance
    }

    /// Whether the piece is resting on something (a downward move would
    /// fail). This is the landing signal the owner polls to decide a lock.
    pub fn is_grounded<B: Board>(&self, board: &mut B) -> bool {
        board.clear(self);
        let below = (self.position.0 + DOWN.0, self.position.1 + DOWN.1);
        let grounded = !board.is_valid_position(self, below);
        board.set(self);
        grounded
    }

    /// Absolute board cells the piece would occupy anchored at `position`.
    pub fn cells_at(&self, position: (i8, i8)) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| (position.0 + dx, position.1 + dy))
    }

    /// Absolute board cells currently occupied by the piece.
    pub fn footprint(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells_at(self.position)
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind
    }

    pub fn shape(&self) -> &'static TetrominoShape {
        self.shape
    }

    pub fn position(&self) -> (i8, i8) {
        self.position
    }

    pub fn cells(&self) -> &[(i8, i8)] {
        &self.cells
    }

    pub fn rotation_index(&self) -> u8 {
        self.rotation_index
    }

    pub fn timing(&self) -> TimingConfig {
        self.timing
    }

    pub fn next_fall_time(&self) -> f64 {
        self.next_fall_time
    }

    pub fn next_move_time(&self) -> f64 {
        self.next_move_time
    }

    pub fn is_fast_dropping(&self) -> bool {
        self.is_fast_dropping
    }

    pub fn is_moving_left(&self) -> bool {
        self.is_moving_left
    }

    pub fn is_moving_right(&self) -> bool {
        self.is_moving_right
    }
}
