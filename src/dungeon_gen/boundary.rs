use glam::Vec3;

use crate::coords::grid_extent;
use crate::geometry::{Aabb, GeometryArena};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    North,
    South,
    East,
    West,
}

/// Invisible collidable wall just outside one edge of the dungeon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryWall {
    pub side: BoundarySide,
    pub center: Vec3,
    pub size: Vec3,
}

impl BoundaryWall {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size)
    }
}

/// The four walls around a `width × height` grid. Each spans its full edge
/// plus `thickness` past both ends so the corners are closed.
pub fn boundary_walls(width: usize, height: usize, wall_height: f32, thickness: f32) -> [BoundaryWall; 4] {
    let (min, max) = grid_extent(width, height);
    let y = wall_height * 0.5;
    let mid_x = (min.x + max.x) * 0.5;
    let mid_z = (min.z + max.z) * 0.5;
    let span_x = (max.x - min.x) + thickness * 2.0;
    let span_z = (max.z - min.z) + thickness * 2.0;

    [
        BoundaryWall {
            side: BoundarySide::North,
            center: Vec3::new(mid_x, y, max.z + thickness * 0.5),
            size: Vec3::new(span_x, wall_height, thickness),
        },
        BoundaryWall {
            side: BoundarySide::South,
            center: Vec3::new(mid_x, y, min.z - thickness * 0.5),
            size: Vec3::new(span_x, wall_height, thickness),
        },
        BoundaryWall {
            side: BoundarySide::East,
            center: Vec3::new(max.x + thickness * 0.5, y, mid_z),
            size: Vec3::new(thickness, wall_height, span_z),
        },
        BoundaryWall {
            side: BoundarySide::West,
            center: Vec3::new(min.x - thickness * 0.5, y, mid_z),
            size: Vec3::new(thickness, wall_height, span_z),
        },
    ]
}

pub fn create_boundaries(
    arena: &mut GeometryArena,
    width: usize,
    height: usize,
    wall_height: f32,
    thickness: f32,
) -> usize {
    puffin::profile_function!();

    let walls = boundary_walls(width, height, wall_height, thickness);
    for wall in walls {
        arena.spawn_boundary(wall);
    }
    walls.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_enclose_grid() {
        let walls = boundary_walls(20, 10, 6.0, 1.0);

        let north = walls[0].bounds();
        assert_eq!(north.min, Vec3::new(-1.0, 0.0, 10.0));
        assert_eq!(north.max, Vec3::new(21.0, 6.0, 11.0));

        let west = walls[3].bounds();
        assert_eq!(west.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(west.max, Vec3::new(0.0, 6.0, 11.0));

        let east = walls[2].bounds();
        assert_eq!(east.min.x, 20.0);
        let south = walls[1].bounds();
        assert_eq!(south.max.z, 0.0);
    }

    #[test]
    fn test_boundaries_are_colliders() {
        let mut arena = GeometryArena::new();
        assert_eq!(create_boundaries(&mut arena, 8, 8, 6.0, 1.0), 4);
        assert_eq!(arena.collider_count(), 4);
        assert_eq!(arena.boundary_walls().len(), 4);
        assert_eq!(arena.piece_count(), 0);
    }
}
