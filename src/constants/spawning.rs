//! Spawn resolution constants.

/// Lift applied above the resolved floor so actors don't start embedded
pub const SPAWN_HEIGHT_OFFSET: f32 = 1.15;
/// Height used for logical (unresolved) spawn positions
pub const SPAWN_APPROX_HEIGHT: f32 = 1.0;
/// Rays start at least this far above the wall top
pub const SPAWN_RAY_ROOF_CLEARANCE: f32 = 5.0;
/// Rays start at least this far above the approximate position
pub const SPAWN_RAY_APPROX_LIFT: f32 = 10.0;
/// Maximum length of a downward spawn ray
pub const SPAWN_RAY_MAX_DISTANCE: f32 = 200.0;
/// Tolerance when comparing resolved XZ coordinates
pub const SPAWN_POSITION_EPSILON: f32 = 1e-4;
