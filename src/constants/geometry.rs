//! Geometry emission and batching constants.

/// Edge length of one tile in world units
pub const TILE_SIZE: f32 = 1.0;
/// Offset from a tile's corner to its center
pub const TILE_CENTER_OFFSET: f32 = 0.5;
/// Thickness of a floor slab, measured down from its walkable top
pub const FLOOR_THICKNESS: f32 = 0.1;
/// Height of one stacked wall segment
pub const WALL_SEGMENT_HEIGHT: f32 = 1.0;
/// Thickness of a roof slab
pub const ROOF_THICKNESS: f32 = 0.2;
/// Scale of the slab primitive used when no roof or floor template exists
pub const ROOF_PRIMITIVE_SCALE: [f32; 3] = [1.0, 0.2, 1.0];
/// Template bounds below this are treated as degenerate (no rescaling)
pub const TEMPLATE_MIN_EXTENT: f32 = 0.0001;
/// Collider chunk edge in tiles (0 = one chunk for the whole dungeon)
pub const GEOMETRY_CHUNK_SIZE: i32 = 16;
/// Height of the invisible boundary walls
pub const BOUNDARY_HEIGHT: f32 = 6.0;
/// Thickness of the invisible boundary walls
pub const BOUNDARY_THICKNESS: f32 = 1.0;
