//! Spawn point resolution.
//!
//! Logical spawn positions come from the tile grid; the authoritative height
//! comes from casting a ray straight down through the generated geometry and
//! taking the highest surface that is not roof.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::coords::tile_center;
use crate::dungeon_gen::rooms::Rect;
use crate::grid::Grid;
use crate::tile::TileType;

/// Collision layer bitmask used to filter ray queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    pub const ROOF: LayerMask = LayerMask(1 << 1);
    pub const BOUNDARY: LayerMask = LayerMask(1 << 2);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// What kind of surface a ray hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceTag {
    Ground,
    Roof,
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub surface: SurfaceTag,
}

/// Vertical ray queries against collidable geometry.
///
/// Implementations must return every intersection along the ray, not only the
/// nearest one; ordering is unspecified.
pub trait RayQuery {
    fn cast_all_down(&self, origin: Vec3, max_distance: f32, mask: LayerMask) -> Vec<RayHit>;
}

/// Resolved spawn positions for one generation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpawnPoints {
    pub player: Option<Vec3>,
    pub enemies: Vec<Vec3>,
}

/// Turns approximate positions into points on the real floor
pub struct SpawnResolver<'a, R: RayQuery + ?Sized> {
    query: &'a R,
    wall_height: i32,
    height_offset: f32,
    mask: LayerMask,
}

impl<'a, R: RayQuery + ?Sized> SpawnResolver<'a, R> {
    pub fn new(query: &'a R, wall_height: i32, height_offset: f32, mask: LayerMask) -> Self {
        Self {
            query,
            wall_height,
            height_offset,
            mask,
        }
    }

    /// Highest non-roof surface under `approx`, lifted by the configured
    /// offset. `None` if the ray finds nothing but roof.
    pub fn try_resolve_floor_height(&self, approx: Vec3) -> Option<Vec3> {
        let start_y = (self.wall_height as f32 + SPAWN_RAY_ROOF_CLEARANCE)
            .max(approx.y + SPAWN_RAY_APPROX_LIFT);
        let origin = Vec3::new(approx.x, start_y, approx.z);

        let mut hits = self
            .query
            .cast_all_down(origin, SPAWN_RAY_MAX_DISTANCE, self.mask);
        // Highest first
        hits.sort_by(|a, b| b.point.y.total_cmp(&a.point.y));

        hits.iter()
            .find(|hit| hit.surface != SurfaceTag::Roof)
            .map(|hit| hit.point + Vec3::Y * self.height_offset)
    }

    /// Like `try_resolve_floor_height`, falling back to `approx` unchanged
    pub fn resolve_floor_height(&self, approx: Vec3) -> Vec3 {
        self.try_resolve_floor_height(approx).unwrap_or_else(|| {
            log::warn!("No floor under {:?}; keeping approximate position", approx);
            approx
        })
    }

    fn resolve_tile_quiet(&self, x: i32, y: i32) -> Option<Vec3> {
        self.try_resolve_floor_height(tile_center(x, y, SPAWN_APPROX_HEIGHT))
    }

    /// Resolve the center of a tile
    pub fn resolve_tile(&self, x: i32, y: i32) -> Vec3 {
        self.resolve_floor_height(tile_center(x, y, SPAWN_APPROX_HEIGHT))
    }

    /// Player spawn at the center of the start room, plus one enemy candidate
    /// per floor tile except the one the player stands on.
    pub fn compute_spawn_points(&self, grid: &Grid, start_room: Option<&Rect>) -> SpawnPoints {
        puffin::profile_function!();

        let Some(start_room) = start_room else {
            return SpawnPoints::default();
        };

        let (cx, cy) = start_room.center();
        let player = self.resolve_tile(cx, cy);

        let mut enemies = Vec::new();
        let mut fallbacks = 0;
        for (x, y) in grid.positions_of(TileType::Floor) {
            let pos = self.resolve_tile_quiet(x, y).unwrap_or_else(|| {
                fallbacks += 1;
                tile_center(x, y, SPAWN_APPROX_HEIGHT)
            });
            if (pos.x - player.x).abs() < SPAWN_POSITION_EPSILON
                && (pos.z - player.z).abs() < SPAWN_POSITION_EPSILON
            {
                continue;
            }
            enemies.push(pos);
        }

        if fallbacks > 0 {
            log::warn!(
                "{} enemy spawn candidates found no floor and kept their approximate height",
                fallbacks
            );
        }

        log::debug!(
            "Resolved player spawn at {:?} and {} enemy spawn candidates",
            player,
            enemies.len()
        );

        SpawnPoints {
            player: Some(player),
            enemies,
        }
    }
}
