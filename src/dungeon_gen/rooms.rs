//! Room placement by rejection sampling, special room roles and boss enlargement.

use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use crate::constants::{DUNGEON_ROOM_MARGIN, DUNGEON_ROOM_PADDING};
use crate::grid::Grid;
use crate::tile::TileType;

/// A rectangle representing a room or region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// True unless at least `padding` tiles separate the two rectangles
    pub fn intersects_padded(&self, other: &Rect, padding: i32) -> bool {
        self.x < other.x + other.width + padding
            && self.x + self.width + padding > other.x
            && self.y < other.y + other.height + padding
            && self.y + self.height + padding > other.y
    }
}

/// Role of a room
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RoomType {
    #[default]
    Normal,
    Boss,
    Shop,
    Shrine,
}

impl RoomType {
    pub fn is_special(&self) -> bool {
        !matches!(self, RoomType::Normal)
    }
}

/// A room with its role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub rect: Rect,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            room_type: RoomType::Normal,
        }
    }
}

/// What survives of a room after generation: its footprint, role and
/// resolved center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RoomSummary {
    pub rect: Rect,
    pub room_type: RoomType,
    pub center: Vec3,
}

/// Half-open size range `[min, max)`; a degenerate range always yields `min`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeRange {
    pub min: i32,
    pub max: i32,
}

impl SizeRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> i32 {
        sample_range(rng, self.min, self.max)
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` if the range is empty
pub fn sample_range(rng: &mut impl Rng, lo: i32, hi: i32) -> i32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Mark a rectangle as floor. Cells outside the grid are skipped.
pub fn carve_room(grid: &mut Grid, rect: &Rect) {
    for x in rect.x..rect.x + rect.width {
        for y in rect.y..rect.y + rect.height {
            grid.set(x, y, TileType::Floor);
        }
    }
}

/// Make `count` placement attempts. Each candidate that does not overlap an
/// accepted room (with padding) is carved and kept; rejected candidates are
/// dropped without retry, so fewer than `count` rooms may come back.
pub fn place_rooms(grid: &mut Grid, count: usize, size: SizeRange, rng: &mut impl Rng) -> Vec<Room> {
    puffin::profile_function!();

    let width = grid.width as i32;
    let height = grid.height as i32;
    let mut rooms: Vec<Room> = Vec::with_capacity(count);

    for _ in 0..count {
        let rect = Rect::new(
            sample_range(rng, DUNGEON_ROOM_MARGIN, width - size.max),
            sample_range(rng, DUNGEON_ROOM_MARGIN, height - size.max),
            size.sample(rng),
            size.sample(rng),
        );

        if rooms
            .iter()
            .any(|room| rect.intersects_padded(&room.rect, DUNGEON_ROOM_PADDING))
        {
            continue;
        }

        carve_room(grid, &rect);
        rooms.push(Room::new(rect));
    }

    if rooms.len() < count {
        log::warn!("Placed {} of {} requested rooms", rooms.len(), count);
    }

    rooms
}

/// Index in `0..n` not in `taken`, uniformly. `taken` must hold distinct indices below `n`.
fn pick_distinct(rng: &mut impl Rng, n: usize, taken: &[usize]) -> usize {
    let mut sorted = taken.to_vec();
    sorted.sort_unstable();
    let mut idx = rng.gen_range(0..n - sorted.len());
    for t in sorted {
        if idx >= t {
            idx += 1;
        }
    }
    idx
}

/// Reset every room to Normal, then pick one Boss, a distinct Shop (two or
/// more rooms) and a Shrine distinct from both (three or more rooms).
pub fn assign_special_rooms(rooms: &mut [Room], rng: &mut impl Rng) {
    for room in rooms.iter_mut() {
        room.room_type = RoomType::Normal;
    }

    let n = rooms.len();
    if n == 0 {
        return;
    }

    let boss = pick_distinct(rng, n, &[]);
    rooms[boss].room_type = RoomType::Boss;
    if n < 2 {
        return;
    }

    let shop = pick_distinct(rng, n, &[boss]);
    rooms[shop].room_type = RoomType::Shop;
    if n < 3 {
        return;
    }

    let shrine = pick_distinct(rng, n, &[boss, shop]);
    rooms[shrine].room_type = RoomType::Shrine;
}

/// Grow the boss room to a target size drawn from `[boss.min, boss.max]`
/// (inclusive; an inverted range yields `boss.min`) if it is smaller,
/// recentered on its old center and clamped inside the grid, then re-carve it. The carve may swallow cells next to
/// other rooms, so this must run before corridors and walls.
///
/// Returns the new footprint if the room was enlarged.
pub fn enlarge_boss_room(
    grid: &mut Grid,
    rooms: &mut [Room],
    boss: SizeRange,
    rng: &mut impl Rng,
) -> Option<Rect> {
    let width = grid.width as i32;
    let height = grid.height as i32;
    let room = rooms.iter_mut().find(|r| r.room_type == RoomType::Boss)?;

    let desired_w = sample_range(rng, boss.min, boss.max + 1).clamp(1, width - 2);
    let desired_h = sample_range(rng, boss.min, boss.max + 1).clamp(1, height - 2);

    if room.rect.width >= desired_w && room.rect.height >= desired_h {
        return None;
    }

    let (cx, cy) = room.rect.center();
    room.rect = Rect::new(
        (cx - desired_w / 2).clamp(1, width - desired_w - 1),
        (cy - desired_h / 2).clamp(1, height - desired_h - 1),
        desired_w,
        desired_h,
    );
    carve_room(grid, &room.rect);

    log::debug!("Enlarged boss room to {:?}", room.rect);
    Some(room.rect)
}
