use std::error::Error;

use clap::{Args, Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cave_tiles::atlas::{generate_wall_atlas, AtlasLayout, TileAtlas};
use cave_tiles::export::{ascii_preview, export_tiles_json};
use cave_tiles::floor::{generate_floor_tiles, FLOOR_MAP_HEIGHT, FLOOR_MAP_WIDTH};
use cave_tiles::generator::{generate_batch, generate_map, GeneratedMap};
use cave_tiles::output::{batch_path, write_png, OutputTarget};
use cave_tiles::params::CaveParams;
use cave_tiles::render::{render_tiles, OPAQUE_WHITE, TRANSPARENT};
use cave_tiles::seeds::MapSeeds;

#[derive(Parser, Debug)]
#[command(name = "cave_tiles")]
#[command(about = "Generate tile-based cave maps where every open area is connected")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a cave wall map using a wall tile atlas
    Map(MapArgs),
    /// Draw the wall tile atlas used by `map`
    Atlas(AtlasArgs),
    /// Generate a floor map using a floor tile atlas
    Floor(FloorArgs),
}

#[derive(Args, Debug)]
struct MapArgs {
    /// Wall tile atlas PNG (16x9 tiles)
    atlas: String,

    /// Output PNG ("-" for stdout)
    output: String,

    /// Width of the map in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Probability that an initial cell is a wall
    #[arg(long)]
    wall_probability: Option<f32>,

    /// Number of smoothing passes
    #[arg(long)]
    iterations: Option<usize>,

    /// A cell becomes wall when its 3x3 block has more walls than this
    #[arg(long)]
    threshold: Option<u8>,

    /// JSON file with generation parameters (flags override it)
    #[arg(long)]
    config: Option<String>,

    /// Tile size of the atlas in pixels
    #[arg(long, default_value = "8")]
    tile_size: u32,

    /// Also export the tile indices as JSON
    #[arg(long)]
    json: Option<String>,

    /// Print an ASCII preview of the map
    #[arg(long)]
    ascii: bool,

    /// Number of maps to generate; OUTPUT becomes a name pattern when > 1
    #[arg(long, default_value = "1")]
    count: usize,
}

#[derive(Args, Debug)]
struct AtlasArgs {
    /// Output PNG ("-" for stdout)
    output: String,

    /// Tile size in pixels (at least 8)
    #[arg(long, default_value = "8")]
    tile_size: u32,
}

#[derive(Args, Debug)]
struct FloorArgs {
    /// Floor tile atlas PNG (16x16 tiles)
    atlas: String,

    /// Output PNG ("-" for stdout)
    output: String,

    /// Width of the map in tiles
    #[arg(short = 'W', long, default_value_t = FLOOR_MAP_WIDTH)]
    width: usize,

    /// Height of the map in tiles
    #[arg(short = 'H', long, default_value_t = FLOOR_MAP_HEIGHT)]
    height: usize,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tile size of the atlas in pixels
    #[arg(long, default_value = "64")]
    tile_size: u32,
}

impl MapArgs {
    /// Config file (or defaults) with command line overrides applied.
    fn params(&self) -> Result<CaveParams, Box<dyn Error>> {
        let mut params = match &self.config {
            Some(path) => CaveParams::from_json_file(path)?,
            None => CaveParams::default(),
        };
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(p) = self.wall_probability {
            params.wall_probability = p;
        }
        if let Some(iterations) = self.iterations {
            params.smoothing_iterations = iterations;
        }
        if let Some(threshold) = self.threshold {
            params.smoothing_threshold = threshold;
        }
        params.validate()?;
        Ok(params)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Map(args) => run_map(&args),
        Command::Atlas(args) => run_atlas(&args),
        Command::Floor(args) => run_floor(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_map(args: &MapArgs) -> Result<(), Box<dyn Error>> {
    let params = args.params()?;
    let target = OutputTarget::parse(&args.output);
    target.check()?;
    if args.count > 1 && target.is_stdout() {
        return Err("writing several maps needs an output file name, not stdout".into());
    }

    let atlas = TileAtlas::open(&args.atlas, AtlasLayout::WALL.with_tile_size(args.tile_size))?;

    let master = args.seed.unwrap_or_else(rand::random);
    info!("Generating cave map with seed: {}", master);
    info!("Map size: {}x{}", params.width, params.height);

    if args.count <= 1 {
        let map = generate_map(&params, &MapSeeds::from_master(master))?;
        return write_map(&map, &atlas, &target, args.json.as_deref(), args.ascii);
    }

    info!("Generating {} maps...", args.count);
    let maps = generate_batch(&params, master, args.count)?;
    for (index, map) in maps.iter().enumerate() {
        let target = OutputTarget::File(batch_path(&args.output, index));
        let json = args.json.as_deref().map(|path| batch_path(path, index));
        write_map(map, &atlas, &target, json.as_deref(), args.ascii)?;
    }
    Ok(())
}

/// Render one generated map and write every requested output for it.
fn write_map(
    map: &GeneratedMap,
    atlas: &TileAtlas,
    target: &OutputTarget,
    json: Option<&str>,
    ascii: bool,
) -> Result<(), Box<dyn Error>> {
    let img = render_tiles(&map.tiles, atlas, OPAQUE_WHITE)?;

    if ascii {
        let preview = ascii_preview(&map.cells);
        if target.is_stdout() {
            eprint!("{}", preview);
        } else {
            print!("{}", preview);
        }
    }

    // PNG first: a failed image write must not leave a JSON file behind
    write_png(&img, target)?;
    info!(
        "Wrote {} (seed {}, {} open cells, image {}x{})",
        target.display_name(),
        map.seeds.master,
        map.cells.open_count(),
        img.width(),
        img.height(),
    );

    if let Some(path) = json {
        export_tiles_json(&map.tiles, map.seeds.master, path)?;
        info!("Exported tile indices to: {}", path);
    }
    Ok(())
}

fn run_atlas(args: &AtlasArgs) -> Result<(), Box<dyn Error>> {
    let target = OutputTarget::parse(&args.output);
    target.check()?;

    let img = generate_wall_atlas(args.tile_size)?;
    write_png(&img, &target)?;
    info!("Wrote wall atlas to {} ({}x{})", target.display_name(), img.width(), img.height());
    Ok(())
}

fn run_floor(args: &FloorArgs) -> Result<(), Box<dyn Error>> {
    let target = OutputTarget::parse(&args.output);
    target.check()?;

    let atlas = TileAtlas::open(&args.atlas, AtlasLayout::FLOOR.with_tile_size(args.tile_size))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating floor map with seed: {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let tiles = generate_floor_tiles(args.width, args.height, &mut rng);

    let img = render_tiles(&tiles, &atlas, TRANSPARENT)?;
    write_png(&img, &target)?;
    info!("Wrote floor map to {} ({}x{})", target.display_name(), img.width(), img.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_png_write_leaves_no_json() {
        let dir = std::env::temp_dir().join(format!("cave_tiles_main_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let json = dir.join("tiles.json").display().to_string();
        let png = dir.join("missing").join("cave.png").display().to_string();

        let params = CaveParams {
            width: 24,
            height: 16,
            ..Default::default()
        };
        let map = generate_map(&params, &MapSeeds::from_master(8)).unwrap();
        let atlas =
            TileAtlas::from_gray_alpha(generate_wall_atlas(8).unwrap(), AtlasLayout::WALL).unwrap();

        let result = write_map(&map, &atlas, &OutputTarget::File(png), Some(&json), false);

        assert!(result.is_err());
        assert!(!std::path::Path::new(&json).exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
