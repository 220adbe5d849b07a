//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Piece timing defaults (seconds)
pub const FALL_INTERVAL_SECS: f64 = 1.0;
pub const FAST_FALL_INTERVAL_SECS: f64 = 0.1;
pub const MOVE_DELAY_SECS: f64 = 0.1;

/// Unit translations on the grid (y grows upward, so gravity is `DOWN`)
pub const DOWN: (i8, i8) = (0, -1);
pub const LEFT: (i8, i8) = (-1, 0);
pub const RIGHT: (i8, i8) = (1, 0);

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Intervals driving a piece's fall and auto-repeat timers, in seconds.
///
/// Compared against an injected clock; all position state stays integer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Delay between gravity steps.
    pub fall_interval: f64,
    /// Delay between gravity steps while fast-dropping.
    pub fast_fall_interval: f64,
    /// Delay between auto-repeated horizontal steps while a direction is held.
    pub move_delay: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fall_interval: FALL_INTERVAL_SECS,
            fast_fall_interval: FAST_FALL_INTERVAL_SECS,
            move_delay: MOVE_DELAY_SECS,
        }
    }
}
