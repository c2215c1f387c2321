use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use dungeon_layout::coords::world_to_tile;
use dungeon_layout::props::Prop;
use dungeon_layout::{DungeonConfig, DungeonGenerator, GenerationStats, RoomSummary, RoomType, SpawnPoints};

#[derive(Parser, Debug)]
#[command(name = "dungeon-layout")]
#[command(about = "Generate a procedural tile dungeon and print its layout")]
struct Args {
    /// JSON config file; missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in tiles
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Grid height in tiles
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Room placement attempts
    #[arg(short, long)]
    rooms: Option<usize>,

    /// Print the generation summary as JSON instead of a map
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    stats: &'a GenerationStats,
    rooms: &'a [RoomSummary],
    spawns: &'a SpawnPoints,
    props: Vec<&'a Prop>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    use simplelog::LevelFilter::{Debug, Info, Off};
    simplelog::TermLogger::init(
        if args.verbose { Debug } else { Info },
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = match &args.config {
        Some(path) => DungeonConfig::load(path)?,
        None => DungeonConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }

    let mut generator = DungeonGenerator::new(config);
    generator.generate();

    if args.json {
        let summary = Summary {
            stats: generator.stats(),
            rooms: generator.rooms(),
            spawns: generator.spawn_points(),
            props: generator.props().iter().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", render_map(&generator));
    print_summary(&generator);
    Ok(())
}

/// Tile map with special room centers and the player spawn marked
fn render_map(generator: &DungeonGenerator) -> String {
    let grid = generator.grid();
    let mut rows: Vec<Vec<char>> = (0..grid.height as i32)
        .map(|y| {
            (0..grid.width as i32)
                .map(|x| grid.get(x, y).map_or(' ', |t| t.glyph()))
                .collect()
        })
        .collect();

    let mut mark = |x: i32, y: i32, glyph: char| {
        if grid.in_bounds(x, y) {
            rows[y as usize][x as usize] = glyph;
        }
    };

    for room in generator.rooms() {
        let glyph = match room.room_type {
            RoomType::Boss => 'B',
            RoomType::Shop => '$',
            RoomType::Shrine => 'S',
            RoomType::Normal => continue,
        };
        let (x, y) = room.rect.center();
        mark(x, y, glyph);
    }
    if let Some(player) = generator.player_spawn() {
        let (x, y) = world_to_tile(player);
        mark(x, y, '@');
    }

    // Highest y first so "up" reads as up
    rows.iter()
        .rev()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_summary(generator: &DungeonGenerator) {
    let stats = generator.stats();
    println!();
    println!(
        "{}x{} seed {:?}",
        generator.grid().width,
        generator.grid().height,
        generator.config().seed
    );
    println!(
        "Rooms: {}  Floor tiles: {} ({} corridor)  Walls: {} ({} corners)",
        stats.rooms, stats.floor_tiles, stats.corridor_tiles, stats.wall_cells, stats.corner_cells
    );
    println!(
        "Pieces: {} floor, {} wall, {} roof  Chunks: {}  Colliders: {}",
        stats.floor_pieces, stats.wall_pieces, stats.roof_pieces, stats.chunks, stats.colliders
    );
    for (i, room) in generator.rooms().iter().enumerate() {
        println!(
            "  room {:2}: {:?} at ({}, {}) {}x{}",
            i, room.room_type, room.rect.x, room.rect.y, room.rect.width, room.rect.height
        );
    }
    match generator.player_spawn() {
        Some(p) => println!("Player spawn: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
        None => println!("Player spawn: none"),
    }
    println!("Enemy spawn candidates: {}  Props: {}", stats.enemy_spawns, stats.props);
}
