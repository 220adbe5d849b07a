//! Falling-piece controller for Tetris-style games.
//!
//! This crate owns the active tetromino of a falling-block game: per-frame
//! gravity against an injected clock, held horizontal movement with
//! auto-repeat, fast drop, and 90-degree rotation with wall-kick resolution.
//! All board access goes through the narrow [`core::Board`] trait, so the
//! controller runs against any grid (including a fake one in tests).
//!
//! Rendering, input devices, line clears, and scoring live outside this crate.

pub mod core;
pub mod types;

pub use crate::core::{Board, Grid, Piece, ShapeError, TetrominoShape};
