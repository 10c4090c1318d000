//! Headless world driver
//!
//! Streams chunks around a focus point that walks along +X, then reports
//! what the renderer would draw.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::{IVec3, Vec3};

use terravox::core::material::LAMP;
use terravox::{LightChannel, Voxel, World, WorldConfig};

/// Stream a voxel world around a moving focus point
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u32>,

    /// Override the update distance, in chunks
    #[arg(long)]
    distance: Option<i32>,

    /// Override the worker thread count
    #[arg(long)]
    workers: Option<usize>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 64)]
    ticks: usize,

    /// Blocks the focus moves along +X per tick
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Starting focus height
    #[arg(long, default_value_t = 120.0)]
    height: f32,
}

fn load_config(args: &Args) -> Result<WorldConfig, terravox::ConfigError> {
    let mut config = match args.config.clone().or_else(WorldConfig::default_path) {
        Some(path) => WorldConfig::load_or_default(&path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(distance) = args.distance {
        config.update_distance = distance;
    }
    if let Some(workers) = args.workers {
        config.worker_count = workers.max(1);
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut world = match World::new(config) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!("Failed to start world workers: {}", e);
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let mut focus = Vec3::new(0.5, args.height, 0.5);
    for _ in 0..args.ticks {
        let stats = world.tick(focus);
        if stats.slab_exhausted {
            tracing::debug!("Chunk slots exhausted at {}", focus);
        }
        world.wait_idle();
        focus.x += args.speed;
    }
    let ticks = world.run_until_settled(focus, 32);

    let loaded = world.get_loaded_chunks();
    let (vertices, indices) = loaded.iter().fold((0, 0), |(v, i), chunk| {
        (v + chunk.mesh.vertex_count(), i + chunk.mesh.index_count())
    });
    tracing::info!(
        "{} chunks cached, {} drawable ({} vertices, {} indices), settled after {} extra ticks in {:.2?}",
        world.chunk_count(),
        loaded.len(),
        vertices,
        indices,
        ticks,
        started.elapsed()
    );

    let below = focus - Vec3::Y * 256.0;
    match world.world_ray_detection(focus, below) {
        Some(hit) => {
            let sky = world.light_at(hit.adjacent(), LightChannel::Sky).unwrap_or(0);
            tracing::info!(
                "Ground below focus at {} ({} blocks down, skylight {} above it)",
                hit.voxel,
                hit.distance,
                sky
            );
            let lamp = hit.adjacent();
            if world.add_voxel(lamp, Voxel::new(LAMP)) {
                let lit = world.light_at(lamp + IVec3::Y, LightChannel::Block).unwrap_or(0);
                tracing::info!("Placed a lamp at {}, blocklight {} above it", lamp, lit);
            } else {
                tracing::warn!("Could not place a lamp at {}", lamp);
            }
        }
        None => tracing::info!("No ground below focus"),
    }
}
