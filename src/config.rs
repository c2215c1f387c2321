//! Generator configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. Values are clamped into a usable range by `sanitized()` rather
//! than rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dungeon_gen::rooms::SizeRange;
use crate::error::{ConfigError, ConfigResult};
use crate::geometry::{BatchSettings, ShapeTemplates};
use crate::props::PropSettings;
use crate::spawning::LayerMask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Fixed seed for reproducible layouts; `None` seeds from entropy
    pub seed: Option<u64>,
    pub width: i32,
    pub height: i32,
    /// Placement attempts, not a guaranteed room count
    pub room_count: usize,
    pub min_room_size: i32,
    pub max_room_size: i32,
    pub corridor_width: i32,
    pub wall_height: i32,
    pub boss_min_room_size: i32,
    pub boss_max_room_size: i32,

    pub generate_roof: bool,
    pub roof_has_collision: bool,
    pub log_roof_generation: bool,

    pub combine_into_single_mesh: bool,
    pub add_mesh_collider: bool,
    pub chunk_size: i32,

    pub add_boundary_colliders: bool,
    pub boundary_height: f32,
    pub boundary_thickness: f32,

    pub spawn_height_offset: f32,
    pub spawn_ground_mask: LayerMask,

    pub templates: ShapeTemplates,
    pub props: PropSettings,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: DUNGEON_DEFAULT_WIDTH,
            height: DUNGEON_DEFAULT_HEIGHT,
            room_count: DUNGEON_DEFAULT_ROOM_COUNT,
            min_room_size: DUNGEON_MIN_ROOM_SIZE,
            max_room_size: DUNGEON_MAX_ROOM_SIZE,
            corridor_width: DUNGEON_CORRIDOR_WIDTH,
            wall_height: DUNGEON_WALL_HEIGHT,
            boss_min_room_size: DUNGEON_BOSS_MIN_ROOM_SIZE,
            boss_max_room_size: DUNGEON_BOSS_MAX_ROOM_SIZE,
            generate_roof: true,
            roof_has_collision: false,
            log_roof_generation: false,
            combine_into_single_mesh: true,
            add_mesh_collider: true,
            chunk_size: GEOMETRY_CHUNK_SIZE,
            add_boundary_colliders: true,
            boundary_height: BOUNDARY_HEIGHT,
            boundary_thickness: BOUNDARY_THICKNESS,
            spawn_height_offset: SPAWN_HEIGHT_OFFSET,
            spawn_ground_mask: LayerMask::ALL,
            templates: ShapeTemplates::default(),
            props: PropSettings::default(),
        }
    }
}

/// Raise `value` to `min`, warning if it had to move
fn clamp_min<T: PartialOrd + Copy + std::fmt::Debug>(name: &str, value: T, min: T) -> T {
    if value < min {
        log::warn!("Config {} = {:?} is below {:?}; clamped", name, value, min);
        min
    } else {
        value
    }
}

/// Lower `value` to `max`, warning if it had to move
fn clamp_max<T: PartialOrd + Copy + std::fmt::Debug>(name: &str, value: T, max: T) -> T {
    if value > max {
        log::warn!("Config {} = {:?} is above {:?}; clamped", name, value, max);
        max
    } else {
        value
    }
}

impl DungeonConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Copy with every value clamped into a range the generator can use
    pub fn sanitized(&self) -> Self {
        let mut c = self.clone();

        c.width = clamp_min("width", c.width, DUNGEON_MIN_GRID_SIZE);
        c.height = clamp_min("height", c.height, DUNGEON_MIN_GRID_SIZE);
        // Rooms start at the 1-tile margin and must end before the far border
        let room_limit = c.width.min(c.height) - 2;
        c.max_room_size = clamp_max("max_room_size", c.max_room_size, room_limit);
        c.min_room_size = clamp_max("min_room_size", c.min_room_size, c.max_room_size);
        c.min_room_size = clamp_min("min_room_size", c.min_room_size, 1);
        c.max_room_size = clamp_min("max_room_size", c.max_room_size, c.min_room_size);
        c.corridor_width = clamp_min("corridor_width", c.corridor_width, 1);
        c.wall_height = clamp_min("wall_height", c.wall_height, 1);
        c.boss_min_room_size = clamp_min("boss_min_room_size", c.boss_min_room_size, 1);
        c.boss_max_room_size =
            clamp_min("boss_max_room_size", c.boss_max_room_size, c.boss_min_room_size);
        c.chunk_size = clamp_min("chunk_size", c.chunk_size, 0);

        if c.boundary_height <= 0.0 {
            log::warn!("Config boundary_height must be positive; using {}", BOUNDARY_HEIGHT);
            c.boundary_height = BOUNDARY_HEIGHT;
        }
        if c.boundary_thickness <= 0.0 {
            log::warn!("Config boundary_thickness must be positive; using {}", BOUNDARY_THICKNESS);
            c.boundary_thickness = BOUNDARY_THICKNESS;
        }

        c
    }

    pub fn room_size(&self) -> SizeRange {
        SizeRange::new(self.min_room_size, self.max_room_size)
    }

    pub fn boss_room_size(&self) -> SizeRange {
        SizeRange::new(self.boss_min_room_size, self.boss_max_room_size)
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            chunk_size: self.chunk_size,
            add_mesh_collider: self.add_mesh_collider,
            roof_has_collision: self.roof_has_collision,
        }
    }
}
