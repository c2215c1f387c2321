use glam::Vec3;

use crate::constants::ROOF_PRIMITIVE_SCALE;
use crate::coords::tile_center;
use crate::geometry::{GeometrySink, ShapeKind, ShapeTemplates, TilePiece};
use crate::grid::Grid;
use crate::tile::TileType;

/// Roof sits on top of the wall stack, never below one segment
pub fn roof_height(wall_height: i32) -> f32 {
    wall_height.max(1) as f32
}

/// Emit one roof piece over every floor tile.
///
/// Uses the roof template, else the floor template, else a thin slab
/// primitive. Roof pieces only collide when `collidable` is set.
pub fn place_roof(
    grid: &Grid,
    wall_height: i32,
    collidable: bool,
    templates: &ShapeTemplates,
    sink: &mut impl GeometrySink,
) -> usize {
    puffin::profile_function!();

    let template = templates.roof_shape();
    if template.is_none() {
        log::warn!("No roof or floor template configured; roof uses slab primitives");
    }

    let h = roof_height(wall_height);
    let mut count = 0;
    for (x, y) in grid.positions_of(TileType::Floor) {
        let mut piece = TilePiece::new(ShapeKind::Roof, template, tile_center(x, y, h))
            .with_collision(collidable);
        if template.is_none() {
            piece = piece.with_scale(Vec3::from_array(ROOF_PRIMITIVE_SCALE));
        }
        sink.emit(piece);
        count += 1;
    }
    count
}
