//! Geometry batching.
//!
//! Per-tile pieces are grouped into fixed-size spatial chunks and each chunk is
//! merged into a single collidable unit, so the collider count grows with
//! `area / chunk_size²` rather than with the tile count. Roof pieces are
//! merged into one separate unit.

use std::collections::BTreeMap;

use glam::{Mat4, Vec3};

use super::arena::{Collider, GeometryArena};
use super::{Aabb, ShapeKind, TilePiece};
use crate::dungeon_gen::rooms::RoomType;
use crate::spawning::{LayerMask, SurfaceTag};

/// Spatial bucket of non-roof geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Bucket for a world position. A chunk size of 0 puts everything in one chunk.
    pub fn from_world(pos: Vec3, chunk_size: i32) -> Self {
        if chunk_size <= 0 {
            return Self::default();
        }
        let size = chunk_size as f32;
        Self {
            x: (pos.x / size).floor() as i32,
            z: (pos.z / size).floor() as i32,
        }
    }
}

/// One source piece inside a merged mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub kind: ShapeKind,
    pub template: Option<String>,
    pub transform: Mat4,
    pub highlight: Option<RoomType>,
}

impl From<&TilePiece> for MeshPart {
    fn from(piece: &TilePiece) -> Self {
        Self {
            kind: piece.kind,
            template: piece.template.clone(),
            transform: Mat4::from_scale_rotation_translation(
                piece.scale,
                piece.rotation,
                piece.position,
            ),
            highlight: piece.highlight,
        }
    }
}

/// Combined geometry of one chunk, or of the whole roof
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMesh {
    /// `None` for the roof, which is never chunked
    pub chunk: Option<ChunkKey>,
    pub parts: Vec<MeshPart>,
    pub bounds: Aabb,
}

impl MergedMesh {
    fn from_pieces(chunk: Option<ChunkKey>, pieces: &[TilePiece]) -> Option<Self> {
        let first = pieces.first()?.bounds();
        let bounds = pieces.iter().skip(1).fold(first, |acc, p| acc.union(&p.bounds()));
        Some(Self {
            chunk,
            parts: pieces.iter().map(MeshPart::from).collect(),
            bounds,
        })
    }

    pub fn is_roof(&self) -> bool {
        self.chunk.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub chunk_size: i32,
    /// Give merged chunks a collider
    pub add_mesh_collider: bool,
    /// Give the merged roof a collider
    pub roof_has_collision: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub chunks: usize,
    pub merged_pieces: usize,
    pub roof_pieces: usize,
}

/// Merge every per-tile piece in the arena. The per-tile pieces are removed.
pub fn batch_geometry(arena: &mut GeometryArena, settings: BatchSettings) -> BatchReport {
    puffin::profile_function!();

    let pieces = arena.take_pieces();
    if pieces.is_empty() {
        return BatchReport::default();
    }

    let mut chunks: BTreeMap<ChunkKey, Vec<TilePiece>> = BTreeMap::new();
    let mut roof = Vec::new();
    for piece in pieces {
        if piece.kind == ShapeKind::Roof {
            roof.push(piece);
            continue;
        }
        let key = ChunkKey::from_world(piece.position, settings.chunk_size);
        chunks.entry(key).or_default().push(piece);
    }

    let mut report = BatchReport {
        roof_pieces: roof.len(),
        ..BatchReport::default()
    };

    for (key, group) in &chunks {
        let Some(mesh) = MergedMesh::from_pieces(Some(*key), group) else {
            continue;
        };
        let collider = settings.add_mesh_collider.then(|| Collider {
            boxes: group.iter().map(TilePiece::bounds).collect(),
            enabled: true,
            layer: LayerMask::GROUND,
            surface: SurfaceTag::Ground,
        });
        arena.spawn_merged(mesh, collider);
        report.chunks += 1;
        report.merged_pieces += group.len();
    }

    if let Some(mesh) = MergedMesh::from_pieces(None, &roof) {
        let collider = settings.roof_has_collision.then(|| Collider {
            boxes: roof.iter().map(TilePiece::bounds).collect(),
            enabled: true,
            layer: LayerMask::ROOF,
            surface: SurfaceTag::Roof,
        });
        arena.spawn_merged(mesh, collider);
    }

    log::debug!(
        "Merged {} pieces into {} chunks (chunk size {}), {} roof pieces",
        report.merged_pieces,
        report.chunks,
        settings.chunk_size,
        report.roof_pieces
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::tile_center;
    use crate::geometry::GeometrySink;
    use crate::spawning::RayQuery;

    fn settings(chunk_size: i32) -> BatchSettings {
        BatchSettings {
            chunk_size,
            add_mesh_collider: true,
            roof_has_collision: false,
        }
    }

    fn fill_floor(arena: &mut GeometryArena, width: i32, height: i32) {
        for x in 0..width {
            for y in 0..height {
                arena.emit(TilePiece::new(ShapeKind::Floor, None, tile_center(x, y, 0.0)));
            }
        }
    }

    #[test]
    fn test_chunk_key_floors_negative() {
        assert_eq!(ChunkKey::from_world(Vec3::new(-0.5, 0.0, 17.5), 16), ChunkKey::new(-1, 1));
        assert_eq!(ChunkKey::from_world(Vec3::new(100.0, 0.0, 3.0), 0), ChunkKey::new(0, 0));
    }

    #[test]
    fn test_chunks_bound_collider_count() {
        let mut arena = GeometryArena::new();
        fill_floor(&mut arena, 40, 40);
        let report = batch_geometry(&mut arena, settings(16));

        // 40 tiles span chunks 0, 1 and 2 on each axis
        assert_eq!(report.chunks, 9);
        assert_eq!(report.merged_pieces, 1600);
        assert_eq!(arena.piece_count(), 0);
        assert_eq!(arena.collider_count(), 9);
    }

    #[test]
    fn test_zero_chunk_size_is_single_chunk() {
        let mut arena = GeometryArena::new();
        fill_floor(&mut arena, 20, 20);
        let report = batch_geometry(&mut arena, settings(0));
        assert_eq!(report.chunks, 1);
        assert_eq!(arena.merged_meshes()[0].parts.len(), 400);
    }

    #[test]
    fn test_roof_merged_separately_without_collider() {
        let mut arena = GeometryArena::new();
        fill_floor(&mut arena, 4, 4);
        for x in 0..4 {
            for y in 0..4 {
                arena.emit(
                    TilePiece::new(ShapeKind::Roof, None, tile_center(x, y, 2.0)).with_collision(false),
                );
            }
        }
        let report = batch_geometry(&mut arena, settings(16));
        assert_eq!(report.chunks, 1);
        assert_eq!(report.roof_pieces, 16);

        let meshes = arena.merged_meshes();
        assert_eq!(meshes.len(), 2);
        let roof = meshes.iter().find(|m| m.is_roof()).unwrap();
        assert_eq!(roof.parts.len(), 16);
        assert_eq!(arena.collider_count(), 1);
    }

    #[test]
    fn test_collidable_roof_gets_its_own_collider() {
        let mut arena = GeometryArena::new();
        fill_floor(&mut arena, 2, 2);
        for x in 0..2 {
            for y in 0..2 {
                arena.emit(TilePiece::new(ShapeKind::Roof, None, tile_center(x, y, 2.0)));
            }
        }
        let report = batch_geometry(
            &mut arena,
            BatchSettings {
                roof_has_collision: true,
                ..settings(16)
            },
        );
        assert_eq!(report.roof_pieces, 4);
        assert_eq!(arena.collider_count(), 2);

        let mut hits = arena.cast_all_down(Vec3::new(1.5, 10.0, 0.5), 200.0, LayerMask::ALL);
        hits.sort_by(|a, b| b.point.y.total_cmp(&a.point.y));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].surface, SurfaceTag::Roof);
        assert!((hits[0].point.y - 2.2).abs() < 1e-5);
        assert_eq!(hits[1].surface, SurfaceTag::Ground);
    }

    #[test]
    fn test_merged_geometry_still_answers_rays() {
        let mut arena = GeometryArena::new();
        fill_floor(&mut arena, 3, 3);
        batch_geometry(&mut arena, settings(2));
        let hits = arena.cast_all_down(Vec3::new(2.5, 10.0, 1.5), 200.0, LayerMask::ALL);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point.y, 0.0);
    }

    #[test]
    fn test_without_mesh_collider_nothing_collides() {
        let mut arena = GeometryArena::new();
        fill_floor(&mut arena, 3, 3);
        let report = batch_geometry(
            &mut arena,
            BatchSettings {
                add_mesh_collider: false,
                ..settings(16)
            },
        );
        assert_eq!(report.chunks, 1);
        assert_eq!(arena.collider_count(), 0);
    }

    #[test]
    fn test_empty_arena_is_noop() {
        let mut arena = GeometryArena::new();
        assert_eq!(batch_geometry(&mut arena, settings(16)), BatchReport::default());
        assert_eq!(arena.entity_count(), 0);
    }
}
