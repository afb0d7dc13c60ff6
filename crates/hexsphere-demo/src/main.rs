//! Demo binary that builds a geodesic grid and reports which cell a few rays hover.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hexsphere-demo -- --frequency 16` to pick another grid.

use clap::Parser;
use glam::DVec3;
use hexsphere_config::{CliArgs, Config, default_config_dir};
use hexsphere_grid::{CellVertex, GeodesicGrid, MeshProjection, PositionCache, Ray, build_grid};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{error, info};

/// Body the overlay is drawn around, in world units.
const BODY_CENTER: DVec3 = DVec3::new(120.0, -40.0, 300.0);
const BODY_RADIUS: f64 = 200.0;

/// Rays cast by the hover demonstration.
const RAY_COUNT: usize = 8;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexsphere_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let grid = match build_grid(i64::from(config.grid.frequency)) {
        Ok(grid) => grid,
        Err(e) => {
            error!("Cannot build grid: {e}");
            std::process::exit(1);
        }
    };

    let cache = PositionCache::with_capacity(grid.cell_count() as usize);
    grid.warm_cache(&cache);
    let mesh = grid.project_mesh_with_inset(&cache, config.grid.cell_inset);

    describe_grid(&grid, &mesh);
    demonstrate_hover(&grid, &mesh, &cache, config.grid.overlay_scale);
}

fn describe_grid(grid: &GeodesicGrid, mesh: &MeshProjection) {
    let gpu_vertices: Vec<CellVertex> = mesh.to_gpu_vertices();
    let vertex_bytes = bytemuck::cast_slice::<CellVertex, u8>(&gpu_vertices).len();
    let index_bytes = bytemuck::cast_slice::<u32, u8>(&mesh.flat_indices()).len();

    info!(
        frequency = grid.frequency(),
        cells = grid.cell_count(),
        pentagons = grid.pentagons().len(),
        hexagons = grid.hexagons().len(),
        "Grid ready"
    );
    info!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        vertex_bytes,
        index_bytes,
        "Mesh projected"
    );
}

fn demonstrate_hover(
    grid: &GeodesicGrid,
    mesh: &MeshProjection,
    cache: &PositionCache,
    overlay_scale: f64,
) {
    info!("Starting hover demonstration");

    let mut rng = Xoshiro256StarStar::seed_from_u64(7); // Fixed seed for reproducible demo
    let mut hits = 0;

    for i in 0..RAY_COUNT {
        // Eye somewhere on a shell three radii out, looking roughly at the body
        let eye_dir = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .normalize_or(DVec3::Y);
        let eye = BODY_CENTER + eye_dir * BODY_RADIUS * 3.0;
        let jitter = DVec3::new(
            rng.gen_range(-0.3..0.3),
            rng.gen_range(-0.3..0.3),
            rng.gen_range(-0.3..0.3),
        ) * BODY_RADIUS;
        let direction = BODY_CENTER + jitter - eye;

        let ray = Ray::to_local(eye, direction, BODY_CENTER, BODY_RADIUS, overlay_scale);
        match grid.pick(mesh, &ray, cache) {
            Some(cell) => {
                hits += 1;
                let neighbors: Vec<u32> =
                    grid.neighbors(cell).iter().map(|n| n.index()).collect();
                info!(
                    ray = i,
                    cell = %cell,
                    pentagon = cell.is_pentagon(),
                    ?neighbors,
                    "Hovered cell"
                );
            }
            None => info!(ray = i, "Ray missed the overlay"),
        }
    }

    info!("Hovered {hits}/{RAY_COUNT} rays");
    info!("Hover demonstration completed successfully");
}
