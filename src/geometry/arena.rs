//! Arena of generated geometry handles.
//!
//! Every emitted piece, merged chunk and boundary wall is an entity in a
//! `hecs::World`. Clearing the arena is how a new generation pass discards the
//! previous one.

use glam::Vec3;
use hecs::{Entity, World};

use super::batch::MergedMesh;
use super::{Aabb, GeometrySink, ShapeKind, TilePiece};
use crate::dungeon_gen::boundary::BoundaryWall;
use crate::spawning::{LayerMask, RayHit, RayQuery, SurfaceTag};

/// Collision component. A collider may hold many boxes (merged chunks do).
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub boxes: Vec<Aabb>,
    pub enabled: bool,
    pub layer: LayerMask,
    pub surface: SurfaceTag,
}

impl Collider {
    /// Collider for a single emitted piece
    pub fn for_piece(piece: &TilePiece) -> Self {
        let (layer, surface) = match piece.kind {
            ShapeKind::Roof => (LayerMask::ROOF, SurfaceTag::Roof),
            _ => (LayerMask::GROUND, SurfaceTag::Ground),
        };
        Self {
            boxes: vec![piece.bounds()],
            enabled: piece.collidable,
            layer,
            surface,
        }
    }
}

#[derive(Default)]
pub struct GeometryArena {
    world: World,
}

impl GeometryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Despawn everything. A fresh world keeps entity ids, and so piece
    /// order, in emission order on every pass.
    pub fn clear(&mut self) {
        self.world = World::new();
    }

    pub fn spawn_piece(&mut self, piece: TilePiece) -> Entity {
        let collider = Collider::for_piece(&piece);
        self.world.spawn((piece, collider))
    }

    pub fn spawn_merged(&mut self, mesh: MergedMesh, collider: Option<Collider>) -> Entity {
        match collider {
            Some(collider) => self.world.spawn((mesh, collider)),
            None => self.world.spawn((mesh,)),
        }
    }

    pub fn spawn_boundary(&mut self, wall: BoundaryWall) -> Entity {
        let collider = Collider {
            boxes: vec![wall.bounds()],
            enabled: true,
            layer: LayerMask::BOUNDARY,
            surface: SurfaceTag::Boundary,
        };
        self.world.spawn((wall, collider))
    }

    /// Remove every per-tile piece and hand them back, ordered by entity id
    pub fn take_pieces(&mut self) -> Vec<TilePiece> {
        let mut entities: Vec<Entity> = self
            .world
            .query::<&TilePiece>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        entities.sort_by_key(|e| e.id());

        let mut pieces = Vec::with_capacity(entities.len());
        for entity in entities {
            if let Ok(piece) = self.world.remove_one::<TilePiece>(entity) {
                pieces.push(piece);
            }
            // The entity's collider goes with it
            let _ = self.world.despawn(entity);
        }
        pieces
    }

    /// Clones of the per-tile pieces still in the arena
    pub fn pieces(&self) -> Vec<TilePiece> {
        self.world
            .query::<&TilePiece>()
            .iter()
            .map(|(_, piece)| piece.clone())
            .collect()
    }

    pub fn piece_count(&self) -> usize {
        self.world.query::<&TilePiece>().iter().count()
    }

    pub fn count_kind(&self, kind: ShapeKind) -> usize {
        self.world
            .query::<&TilePiece>()
            .iter()
            .filter(|(_, piece)| piece.kind == kind)
            .count()
    }

    pub fn merged_meshes(&self) -> Vec<MergedMesh> {
        self.world
            .query::<&MergedMesh>()
            .iter()
            .map(|(_, mesh)| mesh.clone())
            .collect()
    }

    pub fn boundary_walls(&self) -> Vec<BoundaryWall> {
        self.world
            .query::<&BoundaryWall>()
            .iter()
            .map(|(_, wall)| *wall)
            .collect()
    }

    /// Number of entities with an enabled collider
    pub fn collider_count(&self) -> usize {
        self.world
            .query::<&Collider>()
            .iter()
            .filter(|(_, collider)| collider.enabled)
            .count()
    }

    pub fn entity_count(&self) -> usize {
        self.world.len() as usize
    }
}

impl GeometrySink for GeometryArena {
    fn emit(&mut self, piece: TilePiece) {
        self.spawn_piece(piece);
    }
}

impl RayQuery for GeometryArena {
    fn cast_all_down(&self, origin: Vec3, max_distance: f32, mask: LayerMask) -> Vec<RayHit> {
        let lowest = origin.y - max_distance;
        let mut hits = Vec::new();

        for (_, collider) in self.world.query::<&Collider>().iter() {
            if !collider.enabled || !collider.layer.intersects(mask) {
                continue;
            }
            for b in &collider.boxes {
                // A ray starting inside a box does not hit it
                if !b.contains_xz(origin.x, origin.z) || b.max.y > origin.y || b.max.y < lowest {
                    continue;
                }
                hits.push(RayHit {
                    point: Vec3::new(origin.x, b.max.y, origin.z),
                    surface: collider.surface,
                });
            }
        }

        hits
    }
}
