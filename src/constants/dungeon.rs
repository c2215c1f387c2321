//! Dungeon layout constants.

/// Default dungeon width in tiles
pub const DUNGEON_DEFAULT_WIDTH: i32 = 50;
/// Default dungeon height in tiles
pub const DUNGEON_DEFAULT_HEIGHT: i32 = 50;
/// Smallest grid edge that still leaves room for a 1-tile border
pub const DUNGEON_MIN_GRID_SIZE: i32 = 3;
/// Number of room placement attempts
pub const DUNGEON_DEFAULT_ROOM_COUNT: usize = 10;
/// Minimum room edge (inclusive)
pub const DUNGEON_MIN_ROOM_SIZE: i32 = 4;
/// Maximum room edge (exclusive when sampling)
pub const DUNGEON_MAX_ROOM_SIZE: i32 = 10;
/// Padding kept between rooms when testing for overlap
pub const DUNGEON_ROOM_PADDING: i32 = 1;
/// First column/row a room may start on
pub const DUNGEON_ROOM_MARGIN: i32 = 1;
/// Corridor width in tiles
pub const DUNGEON_CORRIDOR_WIDTH: i32 = 1;
/// Stacked wall segments per wall cell
pub const DUNGEON_WALL_HEIGHT: i32 = 2;
/// Minimum boss room edge (inclusive)
pub const DUNGEON_BOSS_MIN_ROOM_SIZE: i32 = 10;
/// Maximum boss room edge (inclusive)
pub const DUNGEON_BOSS_MAX_ROOM_SIZE: i32 = 16;
