//! Tile geometry: the pieces emitted by the generator, the sink they are
//! emitted into, and the templates that decide what gets emitted.

pub mod arena;
pub mod batch;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{
    FLOOR_THICKNESS, ROOF_THICKNESS, TEMPLATE_MIN_EXTENT, TILE_CENTER_OFFSET, WALL_SEGMENT_HEIGHT,
};
use crate::dungeon_gen::rooms::RoomType;

pub use arena::{Collider, GeometryArena};
pub use batch::{batch_geometry, BatchReport, BatchSettings, ChunkKey, MergedMesh};

/// Kind of shape a piece is instantiated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Floor,
    Wall,
    Corner,
    Roof,
}

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True if the vertical line through (x, z) passes through this box
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// One emitted tile or wall segment
#[derive(Debug, Clone, PartialEq)]
pub struct TilePiece {
    pub kind: ShapeKind,
    /// Template the piece was instantiated from; `None` for the built-in slab primitive
    pub template: Option<String>,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Special room this floor belongs to, for optional visual highlighting
    pub highlight: Option<RoomType>,
    pub collidable: bool,
}

impl TilePiece {
    pub fn new(kind: ShapeKind, template: Option<&ShapeTemplate>, position: Vec3) -> Self {
        Self {
            kind,
            template: template.map(|t| t.name.clone()),
            position,
            rotation: Quat::IDENTITY,
            scale: template.map_or(Vec3::ONE, ShapeTemplate::tile_scale),
            highlight: None,
            collidable: true,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_highlight(mut self, highlight: Option<RoomType>) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_collision(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    /// Collision box of the piece. Templates are fitted to a 1x1 footprint, so
    /// only the vertical extent depends on the kind.
    pub fn bounds(&self) -> Aabb {
        let (bottom, top) = match self.kind {
            ShapeKind::Floor => (self.position.y - FLOOR_THICKNESS, self.position.y),
            ShapeKind::Wall | ShapeKind::Corner => {
                (self.position.y, self.position.y + WALL_SEGMENT_HEIGHT)
            }
            ShapeKind::Roof => (self.position.y, self.position.y + ROOF_THICKNESS),
        };
        Aabb::new(
            Vec3::new(
                self.position.x - TILE_CENTER_OFFSET,
                bottom,
                self.position.z - TILE_CENTER_OFFSET,
            ),
            Vec3::new(
                self.position.x + TILE_CENTER_OFFSET,
                top,
                self.position.z + TILE_CENTER_OFFSET,
            ),
        )
    }
}

/// Receives every piece the generator produces
pub trait GeometrySink {
    fn emit(&mut self, piece: TilePiece);
}

impl GeometrySink for Vec<TilePiece> {
    fn emit(&mut self, piece: TilePiece) {
        self.push(piece);
    }
}

/// A shape the generator can instantiate, described by its native bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplate {
    pub name: String,
    /// Size of the shape before fitting
    pub bounds: Vec3,
}

impl ShapeTemplate {
    pub fn new(name: impl Into<String>, bounds: Vec3) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// Scale that fits the XZ footprint to exactly one tile; Y keeps the
    /// shape's proportions. Degenerate bounds are left unscaled.
    pub fn tile_scale(&self) -> Vec3 {
        if self.bounds.x <= TEMPLATE_MIN_EXTENT || self.bounds.z <= TEMPLATE_MIN_EXTENT {
            return Vec3::ONE;
        }
        let scale_x = 1.0 / self.bounds.x;
        let scale_z = 1.0 / self.bounds.z;
        Vec3::new(scale_x, scale_x.min(scale_z), scale_z)
    }
}

/// The configured shapes. Any of them may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeTemplates {
    pub floor: Option<ShapeTemplate>,
    pub wall: Option<ShapeTemplate>,
    pub corner: Option<ShapeTemplate>,
    pub roof: Option<ShapeTemplate>,
}

impl Default for ShapeTemplates {
    fn default() -> Self {
        Self {
            floor: Some(ShapeTemplate::new("floor", Vec3::new(1.0, FLOOR_THICKNESS, 1.0))),
            wall: Some(ShapeTemplate::new("wall", Vec3::ONE)),
            corner: Some(ShapeTemplate::new("corner", Vec3::ONE)),
            roof: None,
        }
    }
}

impl ShapeTemplates {
    /// No templates at all: the generator classifies tiles but emits nothing
    pub fn none() -> Self {
        Self {
            floor: None,
            wall: None,
            corner: None,
            roof: None,
        }
    }

    /// Shape for a wall cell. A missing corner falls back to the wall shape.
    pub fn wall_shape(&self, corner: bool) -> Option<(ShapeKind, &ShapeTemplate)> {
        if corner {
            if let Some(template) = &self.corner {
                return Some((ShapeKind::Corner, template));
            }
        }
        self.wall.as_ref().map(|template| (ShapeKind::Wall, template))
    }

    /// Roof reuses the floor shape when it has none of its own
    pub fn roof_shape(&self) -> Option<&ShapeTemplate> {
        self.roof.as_ref().or(self.floor.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_scale_fits_footprint() {
        let template = ShapeTemplate::new("big", Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(template.tile_scale(), Vec3::new(0.5, 0.25, 0.25));
    }

    #[test]
    fn test_degenerate_template_is_not_scaled() {
        let template = ShapeTemplate::new("flat", Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(template.tile_scale(), Vec3::ONE);
    }

    #[test]
    fn test_missing_corner_falls_back_to_wall() {
        let templates = ShapeTemplates {
            corner: None,
            ..ShapeTemplates::default()
        };
        let (kind, template) = templates.wall_shape(true).unwrap();
        assert_eq!(kind, ShapeKind::Wall);
        assert_eq!(template.name, "wall");
    }

    #[test]
    fn test_no_wall_shapes_skips() {
        assert!(ShapeTemplates::none().wall_shape(true).is_none());
        assert!(ShapeTemplates::none().wall_shape(false).is_none());
    }

    #[test]
    fn test_roof_reuses_floor() {
        let templates = ShapeTemplates::default();
        assert_eq!(templates.roof_shape().unwrap().name, "floor");
    }

    #[test]
    fn test_piece_bounds_by_kind() {
        let floor = TilePiece::new(ShapeKind::Floor, None, Vec3::new(2.5, 0.0, 3.5));
        let bounds = floor.bounds();
        assert_eq!(bounds.max, Vec3::new(3.0, 0.0, 4.0));
        assert!((bounds.min.y + FLOOR_THICKNESS).abs() < 1e-6);

        let wall = TilePiece::new(ShapeKind::Wall, None, Vec3::new(0.5, 1.0, 0.5));
        assert_eq!(wall.bounds().min.y, 1.0);
        assert_eq!(wall.bounds().max.y, 2.0);
    }

    #[test]
    fn test_aabb_union_and_contains() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(2.0, -1.0, 0.0), Vec3::new(3.0, 0.5, 1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(u.max, Vec3::new(3.0, 1.0, 1.0));
        assert!(u.contains_xz(2.5, 0.5));
        assert!(!a.contains_xz(1.5, 0.5));
    }
}
