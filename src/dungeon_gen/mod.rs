//! Procedural dungeon generation.
//!
//! `DungeonGenerator` owns the tile grid, the geometry arena and the
//! generation RNG, and runs the whole pipeline synchronously on `generate()`:
//!
//! rooms → special rooms → boss enlargement → corridors → floors → walls →
//! roof → spawn resolution → batching → boundaries → props → completion.

pub mod boundary;
pub mod corridors;
pub mod floors;
pub mod roof;
pub mod rooms;
pub mod walls;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::DungeonConfig;
use crate::events::{CompletionObservers, DungeonEvent, EventQueue};
use crate::geometry::{batch_geometry, BatchReport, GeometryArena, ShapeKind};
use crate::grid::Grid;
use crate::props::{place_props, PropContainer};
use crate::spawning::{SpawnPoints, SpawnResolver};
use crate::tile::TileType;

use self::rooms::{Room, RoomSummary, RoomType};
use self::walls::WallPlacement;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
    Complete,
}

/// Counts from the most recent pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub generation: u64,
    pub rooms: usize,
    pub floor_tiles: usize,
    pub corridor_tiles: usize,
    pub wall_cells: usize,
    pub corner_cells: usize,
    pub floor_pieces: usize,
    pub wall_pieces: usize,
    pub roof_pieces: usize,
    pub chunks: usize,
    pub boundary_walls: usize,
    pub colliders: usize,
    pub enemy_spawns: usize,
    pub props: usize,
}

pub struct DungeonGenerator {
    config: DungeonConfig,
    rng: ChaCha8Rng,
    state: GenerationState,
    generation: u64,
    grid: Grid,
    arena: GeometryArena,
    rooms: Vec<RoomSummary>,
    walls: Vec<WallPlacement>,
    spawns: SpawnPoints,
    props: PropContainer,
    stats: GenerationStats,
    events: EventQueue,
    observers: CompletionObservers,
}

impl DungeonGenerator {
    /// Create an idle generator. The config is sanitized first.
    pub fn new(config: DungeonConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            grid: Grid::new(config.width as usize, config.height as usize),
            config,
            rng,
            state: GenerationState::Idle,
            generation: 0,
            arena: GeometryArena::new(),
            rooms: Vec::new(),
            walls: Vec::new(),
            spawns: SpawnPoints::default(),
            props: PropContainer::new(),
            stats: GenerationStats::default(),
            events: EventQueue::new(),
            observers: CompletionObservers::new(),
        }
    }

    /// Restart the RNG stream from a fixed seed
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Register a zero-argument callback fired once per completed `generate()`
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.subscribe(observer);
    }

    /// Drain completion events queued since the last call
    pub fn drain_events(&mut self) -> Vec<DungeonEvent> {
        self.events.drain().collect()
    }

    /// Discard the previous pass and build a new dungeon
    pub fn generate(&mut self) -> &GenerationStats {
        puffin::profile_function!();

        self.state = GenerationState::Generating;
        self.clear();

        let config = &self.config;
        let width = config.width as usize;
        let height = config.height as usize;
        self.grid.reset(width, height);

        // Rooms
        let rooms = {
            puffin::profile_scope!("rooms");
            let mut rooms = rooms::place_rooms(
                &mut self.grid,
                config.room_count,
                config.room_size(),
                &mut self.rng,
            );
            rooms::assign_special_rooms(&mut rooms, &mut self.rng);
            rooms::enlarge_boss_room(&mut self.grid, &mut rooms, config.boss_room_size(), &mut self.rng);
            rooms
        };
        let room_floor = self.grid.count(TileType::Floor);

        let corridor_tiles =
            corridors::connect_in_order(&mut self.grid, &rooms, config.corridor_width);
        log::debug!("Carved {} corridor tiles between {} rooms", corridor_tiles, rooms.len());

        // Geometry
        let floor_pieces =
            floors::emit_floors(&self.grid, &rooms, &config.templates, &mut self.arena);
        self.walls = walls::place_walls(
            &mut self.grid,
            config.wall_height,
            &config.templates,
            &mut self.arena,
        );
        let wall_pieces =
            self.arena.count_kind(ShapeKind::Wall) + self.arena.count_kind(ShapeKind::Corner);

        let roof_pieces = if config.generate_roof {
            let count = roof::place_roof(
                &self.grid,
                config.wall_height,
                config.roof_has_collision,
                &config.templates,
                &mut self.arena,
            );
            if config.log_roof_generation {
                log::info!("Generated {} roof tiles at height {}", count, roof::roof_height(config.wall_height));
            } else {
                log::debug!("Generated {} roof tiles", count);
            }
            count
        } else {
            0
        };

        // Spawns are resolved against the per-tile colliders, before they are merged
        self.spawns = {
            let resolver = SpawnResolver::new(
                &self.arena,
                config.wall_height,
                config.spawn_height_offset,
                config.spawn_ground_mask,
            );
            resolver.compute_spawn_points(&self.grid, rooms.first().map(|r| &r.rect))
        };

        let report = if config.combine_into_single_mesh {
            batch_geometry(&mut self.arena, config.batch_settings())
        } else {
            BatchReport::default()
        };

        let boundary_walls = if config.add_boundary_colliders {
            boundary::create_boundaries(
                &mut self.arena,
                width,
                height,
                config.boundary_height,
                config.boundary_thickness,
            )
        } else {
            0
        };

        self.rooms = self.summarize_rooms(&rooms);

        let mut props = PropContainer::new();
        let placed = place_props(&mut props, &self.rooms, self.config.props);
        self.props = props;

        self.generation += 1;
        self.stats = GenerationStats {
            generation: self.generation,
            rooms: self.rooms.len(),
            floor_tiles: self.grid.count(TileType::Floor),
            corridor_tiles: self.grid.count(TileType::Floor) - room_floor,
            wall_cells: self.walls.len(),
            corner_cells: self.walls.iter().filter(|w| w.shape.is_corner()).count(),
            floor_pieces,
            wall_pieces,
            roof_pieces,
            chunks: report.chunks,
            boundary_walls,
            colliders: self.arena.collider_count(),
            enemy_spawns: self.spawns.enemies.len(),
            props: placed,
        };
        self.state = GenerationState::Complete;

        log::info!(
            "Generated dungeon #{}: {}x{}, {} rooms, {} floor tiles, {} walls, {} colliders",
            self.generation,
            width,
            height,
            self.stats.rooms,
            self.stats.floor_tiles,
            self.stats.wall_cells,
            self.stats.colliders
        );

        self.events.push(DungeonEvent::Generated {
            generation: self.generation,
            room_count: self.rooms.len(),
        });
        self.observers.notify();

        &self.stats
    }

    /// Room summaries with centers resolved against the final geometry
    fn summarize_rooms(&self, rooms: &[Room]) -> Vec<RoomSummary> {
        let resolver = SpawnResolver::new(
            &self.arena,
            self.config.wall_height,
            self.config.spawn_height_offset,
            self.config.spawn_ground_mask,
        );
        rooms
            .iter()
            .map(|room| {
                let (cx, cy) = room.rect.center();
                RoomSummary {
                    rect: room.rect,
                    room_type: room.room_type,
                    center: resolver.resolve_tile(cx, cy),
                }
            })
            .collect()
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.rooms.clear();
        self.walls.clear();
        self.spawns = SpawnPoints::default();
        self.props = PropContainer::new();
    }

    // Accessors

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Number of completed passes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn arena(&self) -> &GeometryArena {
        &self.arena
    }

    pub fn rooms(&self) -> &[RoomSummary] {
        &self.rooms
    }

    /// The room of the given role, if one was assigned
    pub fn room_of_type(&self, room_type: RoomType) -> Option<&RoomSummary> {
        self.rooms.iter().find(|r| r.room_type == room_type)
    }

    pub fn walls(&self) -> &[WallPlacement] {
        &self.walls
    }

    pub fn spawn_points(&self) -> &SpawnPoints {
        &self.spawns
    }

    pub fn player_spawn(&self) -> Option<Vec3> {
        self.spawns.player
    }

    pub fn enemy_spawns(&self) -> &[Vec3] {
        &self.spawns.enemies
    }

    pub fn props(&self) -> &PropContainer {
        &self.props
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }
}
