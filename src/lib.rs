//! Procedural tile dungeon generation: rooms, corridors, walls and roof on a
//! tile grid, turned into batched collidable geometry with resolved spawn
//! points.

pub mod config;
pub mod constants;
pub mod coords;
pub mod dungeon_gen;
pub mod error;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod props;
pub mod spawning;
pub mod tile;

pub use config::DungeonConfig;
pub use dungeon_gen::rooms::{Rect, RoomSummary, RoomType};
pub use dungeon_gen::{DungeonGenerator, GenerationState, GenerationStats};
pub use error::{ConfigError, ConfigResult};
pub use events::DungeonEvent;
pub use geometry::{GeometryArena, GeometrySink, ShapeKind, ShapeTemplate, ShapeTemplates, TilePiece};
pub use grid::Grid;
pub use spawning::{LayerMask, RayHit, RayQuery, SpawnPoints, SurfaceTag};
pub use tile::TileType;
