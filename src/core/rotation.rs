//! Rotation module - 90-degree transform and wall kick resolution
//!
//! Rotating a piece means updating its rotation index, transforming its cell
//! set in place, and then hunting through the shape's kick table for the
//! first translation that makes the rotated cells fit. A rotation that fits
//! nowhere is undone by applying the inverse transform, leaving the piece
//! bit-identical to before the call.

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::core::shapes::{KICK_SETS, ROTATION_STATES};

/// 90-degree rotation matrix [cos, sin, -sin, cos], scaled by direction
const ROTATION_MATRIX: [f32; 4] = [0.0, 1.0, -1.0, 0.0];

/// Rotate `piece` one quarter turn, resolving collisions via wall kicks.
///
/// Returns false and leaves the piece untouched if no kick candidate fits.
/// The caller is responsible for the footprint clear/stamp around this.
pub(crate) fn try_rotate<B: Board>(piece: &mut Piece, board: &B, clockwise: bool) -> bool {
    let original_index = piece.rotation_index;
    let direction: i8 = if clockwise { 1 } else { -1 };

    piece.rotation_index = wrap(
        piece.rotation_index as i8 + direction,
        0,
        ROTATION_STATES as i8,
    ) as u8;
    apply_rotation_matrix(&mut piece.cells, piece.shape.centered_pivot, direction);

    if test_wall_kicks(piece, board, direction) {
        return true;
    }

    // No candidate fit: revert by rotating back, not by restoring a copy.
    piece.rotation_index = original_index;
    apply_rotation_matrix(&mut piece.cells, piece.shape.centered_pivot, -direction);
    false
}

/// Try each kick candidate in table order; the first that fits wins.
fn test_wall_kicks<B: Board>(piece: &mut Piece, board: &B, direction: i8) -> bool {
    let shape = piece.shape;
    let set = kick_set_index(piece.rotation_index, direction);
    for &translation in shape.wall_kicks[set].iter() {
        if piece.try_move(board, translation) {
            return true;
        }
    }
    false
}

/// Select the kick set for the POST-rotation state and turn direction.
fn kick_set_index(rotation_index: u8, direction: i8) -> usize {
    let mut index = rotation_index as i8 * 2;
    if direction < 0 {
        index -= 1;
    }
    wrap(index, 0, KICK_SETS as i8) as usize
}

/// Rotate every cell a quarter turn about the shape's pivot, in place.
///
/// Shapes with an odd bounding box pivot on a cell center: the transform is
/// exact there and rounds to nearest. I and O have an even bounding box, so
/// the pivot sits on a grid intersection: shift by half a cell first and
/// round toward +inf.
pub(crate) fn apply_rotation_matrix(cells: &mut [(i8, i8)], centered_pivot: bool, direction: i8) {
    let dir = f32::from(direction);
    for cell in cells.iter_mut() {
        let (mut x, mut y) = (f32::from(cell.0), f32::from(cell.1));
        let rotated_x;
        let rotated_y;
        if centered_pivot {
            x -= 0.5;
            y -= 0.5;
            rotated_x = (x * ROTATION_MATRIX[0] * dir + y * ROTATION_MATRIX[1] * dir).ceil();
            rotated_y = (x * ROTATION_MATRIX[2] * dir + y * ROTATION_MATRIX[3] * dir).ceil();
        } else {
            rotated_x = (x * ROTATION_MATRIX[0] * dir + y * ROTATION_MATRIX[1] * dir).round();
            rotated_y = (x * ROTATION_MATRIX[2] * dir + y * ROTATION_MATRIX[3] * dir).round();
        }
        *cell = (rotated_x as i8, rotated_y as i8);
    }
}

/// Wrap `input` into the half-open range [min, max)
pub(crate) fn wrap(input: i8, min: i8, max: i8) -> i8 {
    min + (input - min).rem_euclid(max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_into_rotation_range() {
        assert_eq!(wrap(0, 0, 4), 0);
        assert_eq!(wrap(3, 0, 4), 3);
        assert_eq!(wrap(4, 0, 4), 0);
        assert_eq!(wrap(-1, 0, 4), 3);
        assert_eq!(wrap(-4, 0, 4), 0);
        assert_eq!(wrap(9, 0, 8), 1);
    }

    #[test]
    fn test_kick_set_index_uses_post_rotation_state() {
        // cw into state 1 (the 0->1 transition)
        assert_eq!(kick_set_index(1, 1), 2);
        // ccw into state 3 (the 0->3 transition)
        assert_eq!(kick_set_index(3, -1), 5);
        // ccw into state 0 (the 1->0 transition) wraps below zero
        assert_eq!(kick_set_index(0, -1), 7);
        // cw into state 0 (the 3->0 transition)
        assert_eq!(kick_set_index(0, 1), 0);
    }

    #[test]
    fn test_matrix_rotates_t_cells_about_cell_center() {
        let mut cells = [(0, 1), (-1, 0), (0, 0), (1, 0)];
        apply_rotation_matrix(&mut cells, false, 1);
        assert_eq!(cells, [(1, 0), (0, 1), (0, 0), (0, -1)]);

        apply_rotation_matrix(&mut cells, false, -1);
        assert_eq!(cells, [(0, 1), (-1, 0), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_matrix_rotates_i_cells_about_grid_intersection() {
        let mut cells = [(-1, 1), (0, 1), (1, 1), (2, 1)];
        apply_rotation_matrix(&mut cells, true, 1);
        assert_eq!(cells, [(1, 2), (1, 1), (1, 0), (1, -1)]);

        apply_rotation_matrix(&mut cells, true, -1);
        assert_eq!(cells, [(-1, 1), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_matrix_maps_o_cells_onto_themselves() {
        let mut cells = [(0, 1), (1, 1), (0, 0), (1, 0)];
        apply_rotation_matrix(&mut cells, true, 1);
        // Same cell set, cycled one position per quarter turn.
        assert_eq!(cells, [(1, 1), (1, 0), (0, 1), (0, 0)]);
    }
}
