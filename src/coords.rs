//! Grid-to-world coordinate mapping.
//!
//! Grid cell `(x, y)` covers the world square `[x, x + 1) × [y, y + 1)` on the
//! XZ plane; grid `y` becomes world `z` and world `y` is height. Every piece of
//! geometry, every spawn ray and every chunk key goes through these helpers, so
//! a tile's anchor is always its center `(x + 0.5, h, y + 0.5)`.

use glam::Vec3;

use crate::constants::{TILE_CENTER_OFFSET, TILE_SIZE};

/// World-space center of a tile at height `h`
pub fn tile_center(x: i32, y: i32, h: f32) -> Vec3 {
    Vec3::new(
        x as f32 * TILE_SIZE + TILE_CENTER_OFFSET,
        h,
        y as f32 * TILE_SIZE + TILE_CENTER_OFFSET,
    )
}

/// Tile containing a world position (height ignored)
pub fn world_to_tile(pos: Vec3) -> (i32, i32) {
    (
        (pos.x / TILE_SIZE).floor() as i32,
        (pos.z / TILE_SIZE).floor() as i32,
    )
}

/// World-space XZ extent of a `width × height` grid, as (min, max) corners at height 0
pub fn grid_extent(width: usize, height: usize) -> (Vec3, Vec3) {
    (
        Vec3::ZERO,
        Vec3::new(width as f32 * TILE_SIZE, 0.0, height as f32 * TILE_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_center_offsets_both_axes() {
        assert_eq!(tile_center(3, 7, 2.0), Vec3::new(3.5, 2.0, 7.5));
    }

    #[test]
    fn test_world_to_tile_inverts_center() {
        for &(x, y) in &[(0, 0), (4, 9), (49, 1)] {
            assert_eq!(world_to_tile(tile_center(x, y, 0.0)), (x, y));
        }
    }

    #[test]
    fn test_grid_extent() {
        let (min, max) = grid_extent(20, 10);
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(20.0, 0.0, 10.0));
    }
}
