//! Core module - pure piece-control logic with no I/O dependencies
//!
//! Contains the board abstraction, the tetromino shape tables, the rotation
//! resolver, and the piece state machine. Nothing here touches a real clock,
//! a terminal, or the filesystem.

pub mod board;
pub mod piece;
pub mod rotation;
pub mod shapes;

// Re-export commonly used types
pub use board::{Board, Grid};
pub use piece::Piece;
pub use shapes::{ShapeError, TetrominoShape};
