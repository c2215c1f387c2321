use super::rooms::{Room, RoomType};
use crate::coords::tile_center;
use crate::geometry::{GeometrySink, ShapeKind, ShapeTemplates, TilePiece};
use crate::grid::Grid;
use crate::tile::TileType;

/// Special role of the room covering a tile, if any. Corridors are never highlighted.
fn highlight_at(rooms: &[Room], x: i32, y: i32) -> Option<RoomType> {
    rooms
        .iter()
        .find(|room| room.room_type.is_special() && room.rect.contains(x, y))
        .map(|room| room.room_type)
}

/// Emit one floor piece per floor tile. Nothing is emitted without a floor template.
pub fn emit_floors(
    grid: &Grid,
    rooms: &[Room],
    templates: &ShapeTemplates,
    sink: &mut impl GeometrySink,
) -> usize {
    puffin::profile_function!();

    let Some(template) = templates.floor.as_ref() else {
        log::warn!("No floor template configured; floor geometry skipped");
        return 0;
    };

    let mut emitted = 0;
    for (x, y) in grid.positions_of(TileType::Floor) {
        sink.emit(
            TilePiece::new(ShapeKind::Floor, Some(template), tile_center(x, y, 0.0))
                .with_highlight(highlight_at(rooms, x, y)),
        );
        emitted += 1;
    }
    emitted
}
