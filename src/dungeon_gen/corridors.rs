//! Corridor carving between consecutive rooms.

use super::rooms::{Rect, Room};
use crate::grid::Grid;
use crate::tile::TileType;

/// Carve one corridor tile. Only empty cells change; floor is a no-op and
/// walls are never downgraded. Returns true if the tile was carved.
fn carve_corridor_tile(grid: &mut Grid, x: i32, y: i32) -> bool {
    if !grid.is_empty_at(x, y) {
        return false;
    }
    grid.set(x, y, TileType::Floor)
}

/// Connect two rooms with an L-shaped corridor: horizontal from A's center to
/// B's column, then vertical to B's center. Each step is widened by
/// `(width - 1) / 2` tiles on both sides, perpendicular to travel.
///
/// Returns the number of tiles that changed to floor.
pub fn connect_rooms(grid: &mut Grid, a: &Rect, b: &Rect, width: i32) -> usize {
    let (mut x, mut y) = a.center();
    let (bx, by) = b.center();
    let half = (width - 1).max(0) / 2;
    let mut carved = 0;

    while x != bx {
        carved += usize::from(carve_corridor_tile(grid, x, y));
        for offset in (-half..=half).filter(|&o| o != 0) {
            carved += usize::from(carve_corridor_tile(grid, x, y + offset));
        }
        x += if x < bx { 1 } else { -1 };
    }

    while y != by {
        carved += usize::from(carve_corridor_tile(grid, x, y));
        for offset in (-half..=half).filter(|&o| o != 0) {
            carved += usize::from(carve_corridor_tile(grid, x + offset, y));
        }
        y += if y < by { 1 } else { -1 };
    }

    carved
}

/// Link rooms as a path in placement order: 0-1, 1-2, ...
pub fn connect_in_order(grid: &mut Grid, rooms: &[Room], width: i32) -> usize {
    puffin::profile_function!();

    let carved: usize = rooms
        .windows(2)
        .map(|pair| connect_rooms(grid, &pair[0].rect, &pair[1].rect, width))
        .sum();

    log::debug!(
        "Carved {} corridor tiles across {} links",
        carved,
        rooms.len().saturating_sub(1)
    );
    carved
}
