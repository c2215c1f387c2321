//! Wall and corner placement around floor.
//!
//! Every empty cell orthogonally next to floor becomes a wall cell. A cell
//! with exactly two floor neighbours is a corner, anything else a straight
//! wall. The corner test does not check that the two neighbours are
//! perpendicular: a cell between two floor tiles on opposite sides is also a
//! "corner" and gets the default orientation.

use glam::Quat;

use crate::coords::tile_center;
use crate::geometry::{GeometrySink, ShapeTemplates, TilePiece};
use crate::grid::{FloorNeighbors, Grid};
use crate::tile::TileType;

/// Run direction of a straight wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallAxis {
    /// Floor lies to the left or right
    Horizontal,
    Vertical,
}

/// Which pair of neighbours a corner opens toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerOrientation {
    LeftUp,
    UpRight,
    RightDown,
    DownLeft,
}

impl CornerOrientation {
    pub fn from_neighbors(n: FloorNeighbors) -> Option<Self> {
        if n.left && n.up {
            Some(CornerOrientation::LeftUp)
        } else if n.up && n.right {
            Some(CornerOrientation::UpRight)
        } else if n.right && n.down {
            Some(CornerOrientation::RightDown)
        } else if n.down && n.left {
            Some(CornerOrientation::DownLeft)
        } else {
            None
        }
    }

    pub fn yaw_degrees(&self) -> f32 {
        match self {
            CornerOrientation::LeftUp => 0.0,
            CornerOrientation::UpRight => 90.0,
            CornerOrientation::RightDown => 180.0,
            CornerOrientation::DownLeft => 270.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallShape {
    Straight(WallAxis),
    /// `None` when the two floor neighbours are opposite each other
    Corner(Option<CornerOrientation>),
}

impl WallShape {
    pub fn classify(n: FloorNeighbors) -> Self {
        if n.count() == 2 {
            return WallShape::Corner(CornerOrientation::from_neighbors(n));
        }
        if n.left || n.right {
            WallShape::Straight(WallAxis::Horizontal)
        } else {
            WallShape::Straight(WallAxis::Vertical)
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, WallShape::Corner(_))
    }

    /// Rotation about the vertical axis
    pub fn yaw_degrees(&self) -> f32 {
        match self {
            WallShape::Straight(WallAxis::Horizontal) => 90.0,
            WallShape::Straight(WallAxis::Vertical) => 0.0,
            WallShape::Corner(Some(orientation)) => orientation.yaw_degrees(),
            WallShape::Corner(None) => 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees().to_radians())
    }
}

/// A classified wall cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallPlacement {
    pub x: i32,
    pub y: i32,
    pub shape: WallShape,
}

/// Turn an empty cell touching floor into a wall cell and emit its column of
/// segments. The cell is marked Wall even when no shape is configured.
fn try_place_wall(
    grid: &mut Grid,
    x: i32,
    y: i32,
    wall_height: i32,
    templates: &ShapeTemplates,
    sink: &mut impl GeometrySink,
) -> Option<WallPlacement> {
    if !grid.is_empty_at(x, y) {
        return None;
    }
    let neighbors = grid.floor_neighbors(x, y);
    if !neighbors.any() {
        return None;
    }

    let shape = WallShape::classify(neighbors);
    if let Some((kind, template)) = templates.wall_shape(shape.is_corner()) {
        let rotation = shape.rotation();
        for level in 0..wall_height.max(1) {
            sink.emit(
                TilePiece::new(kind, Some(template), tile_center(x, y, level as f32))
                    .with_rotation(rotation),
            );
        }
    }

    grid.set(x, y, TileType::Wall);
    Some(WallPlacement { x, y, shape })
}

/// Scan every floor tile and wall off its empty neighbours
pub fn place_walls(
    grid: &mut Grid,
    wall_height: i32,
    templates: &ShapeTemplates,
    sink: &mut impl GeometrySink,
) -> Vec<WallPlacement> {
    puffin::profile_function!();

    if templates.wall_shape(false).is_none() && templates.wall_shape(true).is_none() {
        log::warn!("No wall or corner template configured; wall geometry skipped");
    }

    let mut placements = Vec::new();
    for (x, y) in grid.positions_of(TileType::Floor) {
        for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if let Some(placement) = try_place_wall(grid, nx, ny, wall_height, templates, sink) {
                placements.push(placement);
            }
        }
    }

    log::debug!(
        "Placed {} wall cells ({} corners)",
        placements.len(),
        placements.iter().filter(|p| p.shape.is_corner()).count()
    );
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::rooms::{carve_room, Rect};
    use crate::geometry::ShapeKind;

    fn neighbors(left: bool, right: bool, up: bool, down: bool) -> FloorNeighbors {
        FloorNeighbors { left, right, up, down }
    }

    #[test]
    fn test_orientation_table() {
        let a = WallShape::classify(neighbors(true, false, true, false));
        let b = WallShape::classify(neighbors(false, true, true, false));
        let c = WallShape::classify(neighbors(false, true, false, true));
        let d = WallShape::classify(neighbors(true, false, false, true));

        assert_eq!(a, WallShape::Corner(Some(CornerOrientation::LeftUp)));
        assert_eq!(b, WallShape::Corner(Some(CornerOrientation::UpRight)));
        assert_eq!(c, WallShape::Corner(Some(CornerOrientation::RightDown)));
        assert_eq!(d, WallShape::Corner(Some(CornerOrientation::DownLeft)));

        let base = a.yaw_degrees();
        assert_eq!(b.yaw_degrees() - base, 90.0);
        assert_eq!(c.yaw_degrees() - base, 180.0);
        assert_eq!(d.yaw_degrees() - base, 270.0);
    }

    #[test]
    fn test_opposite_neighbors_are_default_corner() {
        let shape = WallShape::classify(neighbors(true, true, false, false));
        assert_eq!(shape, WallShape::Corner(None));
        assert_eq!(shape.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_straight_wall_axis() {
        assert_eq!(
            WallShape::classify(neighbors(true, false, false, false)),
            WallShape::Straight(WallAxis::Horizontal)
        );
        assert_eq!(
            WallShape::classify(neighbors(false, false, false, true)),
            WallShape::Straight(WallAxis::Vertical)
        );
        // Three or four floor neighbours are straight too
        assert_eq!(
            WallShape::classify(neighbors(true, true, true, false)),
            WallShape::Straight(WallAxis::Horizontal)
        );
        assert!(!WallShape::classify(neighbors(true, true, true, true)).is_corner());
    }

    #[test]
    fn test_room_is_ringed_by_walls() {
        let mut grid = Grid::new(10, 10);
        carve_room(&mut grid, &Rect::new(3, 3, 3, 3));
        let mut pieces: Vec<TilePiece> = Vec::new();
        let placements = place_walls(&mut grid, 2, &ShapeTemplates::default(), &mut pieces);

        // Four sides of three, no diagonal corners (they touch no floor orthogonally)
        assert_eq!(placements.len(), 12);
        assert_eq!(grid.count(TileType::Wall), 12);
        assert!(!grid.get(2, 2).unwrap().is_wall());
        assert_eq!(pieces.len(), 24);
        assert!(pieces.iter().all(|p| p.kind == ShapeKind::Wall));
    }

    #[test]
    fn test_every_wall_touches_floor() {
        let mut grid = Grid::new(20, 20);
        carve_room(&mut grid, &Rect::new(2, 2, 5, 4));
        carve_room(&mut grid, &Rect::new(9, 8, 4, 6));
        for x in 4..12 {
            grid.set(x, 7, TileType::Floor);
        }
        let mut pieces: Vec<TilePiece> = Vec::new();
        place_walls(&mut grid, 1, &ShapeTemplates::default(), &mut pieces);

        for (x, y) in grid.positions_of(TileType::Wall) {
            assert!(grid.floor_neighbors(x, y).any(), "wall at ({}, {}) touches no floor", x, y);
        }
    }

    #[test]
    fn test_corner_cells_have_two_floor_neighbors() {
        let mut grid = Grid::new(12, 12);
        // L-shaped floor produces an inner corner cell
        carve_room(&mut grid, &Rect::new(2, 2, 6, 2));
        carve_room(&mut grid, &Rect::new(2, 4, 2, 5));
        let mut pieces: Vec<TilePiece> = Vec::new();
        let placements = place_walls(&mut grid, 2, &ShapeTemplates::default(), &mut pieces);

        let corners: Vec<_> = placements.iter().filter(|p| p.shape.is_corner()).collect();
        assert!(!corners.is_empty());
        for corner in corners {
            assert_eq!(grid.floor_neighbors(corner.x, corner.y).count(), 2);
        }
        // (4, 4) sits in the inside of the L: floor below and to the left
        let inner = placements.iter().find(|p| (p.x, p.y) == (4, 4)).unwrap();
        assert_eq!(inner.shape, WallShape::Corner(Some(CornerOrientation::DownLeft)));
        assert!(pieces.iter().any(|p| p.kind == ShapeKind::Corner));
    }

    #[test]
    fn test_segments_stack_to_wall_height() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, TileType::Floor);
        let mut pieces: Vec<TilePiece> = Vec::new();
        place_walls(&mut grid, 4, &ShapeTemplates::default(), &mut pieces);

        let column: Vec<f32> = pieces
            .iter()
            .filter(|p| p.position.x == 3.5 && p.position.z == 2.5)
            .map(|p| p.position.y)
            .collect();
        assert_eq!(column, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_corner_uses_wall_shape() {
        let mut grid = Grid::new(12, 12);
        carve_room(&mut grid, &Rect::new(2, 2, 6, 2));
        carve_room(&mut grid, &Rect::new(2, 4, 2, 5));
        let templates = ShapeTemplates {
            corner: None,
            ..ShapeTemplates::default()
        };
        let mut pieces: Vec<TilePiece> = Vec::new();
        let placements = place_walls(&mut grid, 1, &templates, &mut pieces);

        assert!(placements.iter().any(|p| p.shape.is_corner()));
        assert!(pieces.iter().all(|p| p.kind == ShapeKind::Wall));
        assert_eq!(pieces.len(), placements.len());
    }

    #[test]
    fn test_no_templates_still_classifies() {
        let mut grid = Grid::new(6, 6);
        grid.set(2, 2, TileType::Floor);
        let mut pieces: Vec<TilePiece> = Vec::new();
        let placements = place_walls(&mut grid, 2, &ShapeTemplates::none(), &mut pieces);
        assert_eq!(placements.len(), 4);
        assert_eq!(grid.count(TileType::Wall), 4);
        assert!(pieces.is_empty());
    }

    #[test]
    fn test_edge_floor_skips_out_of_bounds() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, TileType::Floor);
        let mut pieces: Vec<TilePiece> = Vec::new();
        let placements = place_walls(&mut grid, 1, &ShapeTemplates::default(), &mut pieces);
        assert_eq!(placements.len(), 2);
    }
}
