//! Generation constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! These are the defaults behind `DungeonConfig`.

mod dungeon;
mod geometry;
mod spawning;

pub use dungeon::*;
pub use geometry::*;
pub use spawning::*;
