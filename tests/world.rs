use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use glam::{IVec3, Vec3};

use terravox::core::material::{LAMP, STONE};
use terravox::world::light::calculate_light_at;
use terravox::world::noise::{NoiseSource, SimplexNoise};
use terravox::{
    Chunk, ChunkGenerator, ChunkState, LightChannel, Voxel, WATER_LEVEL, World, WorldConfig,
};

fn config(update_distance: i32) -> WorldConfig {
    WorldConfig {
        seed: 42,
        update_distance,
        worker_count: 2,
        ..WorldConfig::default()
    }
}

/// Chunk at the origin, solid below y = 10 and open sky above.
fn flat_chunk() -> Chunk {
    let mut chunk = Chunk::new(IVec3::ZERO);
    for z in 0..16 {
        for y in 0..10 {
            for x in 0..16 {
                chunk.add_voxel(IVec3::new(x, y, z), Voxel::new(STONE));
            }
        }
    }
    chunk.fill_open_sky();
    chunk
}

/// Noise that stalls every sample while its gate is closed, holding
/// generation tasks on the workers.
struct GatedNoise {
    inner: SimplexNoise,
    open: Arc<AtomicBool>,
}

impl GatedNoise {
    fn wait(&self) {
        while !self.open.load(Ordering::Acquire) {
            thread::sleep(Duration::from_millis(1));
        }
    }
}

impl NoiseSource for GatedNoise {
    fn sample2(&self, x: f32, z: f32) -> f32 {
        self.wait();
        self.inner.sample2(x, z)
    }

    fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.wait();
        self.inner.sample3(x, y, z)
    }
}

fn gated_world(config: WorldConfig, open: bool) -> (World, Arc<AtomicBool>) {
    let gate = Arc::new(AtomicBool::new(open));
    let noise = GatedNoise {
        inner: SimplexNoise::new(config.seed),
        open: Arc::clone(&gate),
    };
    let generator = ChunkGenerator::with_noise(noise, config.seed, WATER_LEVEL);
    (World::with_generator(config, generator).unwrap(), gate)
}

#[test]
fn test_flat_chunk_light_and_height() {
    let mut world = World::new(config(1)).unwrap();
    assert!(world.insert_chunk(flat_chunk()));

    let above = IVec3::new(3, 10, 3);
    assert_eq!(calculate_light_at(&world, above, LightChannel::Sky), 15);
    assert_eq!(world.column_height(3, 3), Some(9));

    assert!(world.remove_voxel(IVec3::new(3, 9, 3)));
    assert_eq!(world.column_height(3, 3), Some(8));
    assert_eq!(world.column_height(4, 3), Some(9));
    assert_eq!(world.column_height(3, 2), Some(9));
    assert_eq!(world.light_at(IVec3::new(3, 9, 3), LightChannel::Sky), Some(15));
}

#[test]
fn test_overhang_shades_column() {
    let mut world = World::new(config(1)).unwrap();
    assert!(world.insert_chunk(flat_chunk()));

    assert!(world.add_voxel(IVec3::new(5, 12, 5), Voxel::new(STONE)));
    assert_eq!(world.column_height(5, 5), Some(12));
    assert_eq!(world.light_at(IVec3::new(5, 12, 5), LightChannel::Sky), Some(0));
    // Lit sideways from the open columns next to it
    assert_eq!(world.light_at(IVec3::new(5, 11, 5), LightChannel::Sky), Some(14));
    assert_eq!(world.light_at(IVec3::new(5, 10, 5), LightChannel::Sky), Some(14));
    assert_eq!(world.light_at(IVec3::new(5, 13, 5), LightChannel::Sky), Some(15));

    assert!(world.remove_voxel(IVec3::new(5, 12, 5)));
    assert_eq!(world.column_height(5, 5), Some(9));
    assert_eq!(world.light_at(IVec3::new(5, 10, 5), LightChannel::Sky), Some(15));
}

#[test]
fn test_lamp_lights_and_unlights() {
    let mut world = World::new(config(1)).unwrap();
    assert!(world.insert_chunk(flat_chunk()));

    let lamp = IVec3::new(8, 10, 8);
    assert!(world.add_voxel(lamp, Voxel::new(LAMP)));
    assert_eq!(world.light_at(IVec3::new(8, 12, 8), LightChannel::Block), Some(13));
    assert_eq!(world.light_at(IVec3::new(11, 10, 8), LightChannel::Block), Some(12));

    assert!(world.remove_voxel(lamp));
    assert_eq!(world.light_at(IVec3::new(8, 12, 8), LightChannel::Block), Some(0));
    assert_eq!(world.light_at(lamp, LightChannel::Block), Some(0));
}

#[test]
fn test_edits_outside_cache_fail() {
    let mut world = World::new(config(1)).unwrap();
    assert!(world.insert_chunk(flat_chunk()));

    assert!(!world.add_voxel(IVec3::new(100, 5, 0), Voxel::new(STONE)));
    assert!(!world.remove_voxel(IVec3::new(-1, 5, 0)));
    assert!(!world.add_voxel(IVec3::new(1, 1, 1), Voxel::new(STONE)));
    assert!(!world.remove_voxel(IVec3::new(1, 12, 1)));
    assert_eq!(world.get_voxel(IVec3::new(100, 5, 0)), None);
    assert!(!world.insert_chunk(Chunk::new(IVec3::ZERO)));
}

#[test]
fn test_ray_hits_single_voxel_from_above() {
    let mut world = World::new(config(1)).unwrap();
    let mut chunk = Chunk::new(IVec3::ZERO);
    assert!(chunk.add_voxel(IVec3::new(0, 10, 0), Voxel::new(STONE)));
    assert!(world.insert_chunk(chunk));

    let hit = world
        .world_ray_detection(Vec3::new(0.5, 20.0, 0.5), Vec3::new(0.5, 0.0, 0.5))
        .unwrap();
    assert_eq!(hit.voxel, IVec3::new(0, 10, 0));
    assert_eq!(hit.normal, IVec3::new(0, 1, 0));

    let miss = world.world_ray_detection(Vec3::new(4.5, 20.0, 4.5), Vec3::new(4.5, 0.0, 4.5));
    assert!(miss.is_none());
}

#[test]
fn test_streaming_loads_and_evicts() {
    let mut world = World::new(config(2)).unwrap();
    let focus = Vec3::new(8.0, 120.0, 8.0);
    let center = IVec3::new(0, 7, 0);

    world.run_until_settled(focus, 64);
    assert_eq!(world.chunk_count(), 125);
    assert_eq!(world.column_count(), 25);
    assert_eq!(world.slab_in_use(), 125);
    assert_eq!(world.chunk_state(center), Some(ChunkState::Loaded));
    // Edge chunks lack a full neighborhood and are never decorated
    assert_eq!(
        world.chunk_state(center + IVec3::new(2, 0, 0)),
        Some(ChunkState::Generated)
    );

    let loaded = world.get_loaded_chunks();
    assert!(loaded.iter().any(|chunk| chunk.position == center));
    let mut offsets: Vec<u32> = loaded.iter().map(|chunk| chunk.buffer_offset).collect();
    offsets.sort_unstable();
    offsets.dedup();
    assert_eq!(offsets.len(), loaded.len());

    // One chunk east: the west face of the cube leaves, the east face arrives
    let stats = world.tick(focus + Vec3::new(16.0, 0.0, 0.0));
    assert_eq!(stats.evicted, 25);
    assert_eq!(stats.created, 25);
    assert_eq!(stats.evicted_columns, 5);
    assert!(!stats.slab_exhausted);
    assert_eq!(world.chunk_state(center + IVec3::new(-2, 0, 0)), None);
    world.wait_idle();

    // Far away: everything is replaced
    let far = focus + Vec3::new(16.0 * 20.0, 0.0, 0.0);
    world.run_until_settled(far, 64);
    assert_eq!(world.chunk_count(), 125);
    assert_eq!(world.column_count(), 25);
    assert_eq!(world.chunk_state(center), None);
}

#[test]
fn test_busy_chunks_survive_a_far_jump() {
    let (mut world, gate) = gated_world(config(2), false);
    let focus = Vec3::new(8.0, 120.0, 8.0);
    let center = IVec3::new(0, 7, 0);

    let stats = world.tick(focus);
    assert_eq!(stats.created, 125);
    assert_eq!(world.chunk_state(center), Some(ChunkState::Pending));

    // Nothing can be evicted while generation holds every chunk
    let far = focus + Vec3::new(16.0 * 20.0, 0.0, 0.0);
    let stats = world.tick(far);
    assert_eq!(stats.evicted, 0);
    assert_eq!(stats.created, 0);
    assert_eq!(stats.evicted_columns, 0);
    assert!(stats.slab_exhausted);
    assert_eq!(world.chunk_count(), 125);
    assert_eq!(world.column_count(), 25);
    assert_eq!(world.chunk_state(center), Some(ChunkState::Pending));

    gate.store(true, Ordering::Release);
    world.wait_idle();
    world.run_until_settled(far, 64);
    assert_eq!(world.chunk_count(), 125);
    assert_eq!(world.column_count(), 25);
    assert_eq!(world.chunk_state(center), None);
}

#[test]
fn test_edit_remeshes_loaded_chunk() {
    let config = WorldConfig {
        worker_count: 1,
        ..config(2)
    };
    let (mut world, gate) = gated_world(config, true);
    let focus = Vec3::new(8.0, 120.0, 8.0);
    let center = IVec3::new(0, 7, 0);

    world.run_until_settled(focus, 64);
    assert_eq!(world.chunk_state(center), Some(ChunkState::Loaded));
    let mesh_of = |world: &World| {
        world
            .get_loaded_chunks()
            .into_iter()
            .find(|chunk| chunk.position == center)
            .map(|chunk| chunk.mesh)
    };
    let before = mesh_of(&world).unwrap();

    // Fill an interior air cell, or dig out an interior voxel if there is none
    let origin = center * 16;
    let interior: Vec<IVec3> = (1..15)
        .flat_map(|y| (1..15).flat_map(move |z| (1..15).map(move |x| IVec3::new(x, y, z))))
        .map(|local| origin + local)
        .collect();
    let edited = interior.iter().any(|&pos| {
        world.get_voxel(pos).is_some_and(|v| v.is_air()) && world.add_voxel(pos, Voxel::new(STONE))
    }) || interior.iter().any(|&pos| world.remove_voxel(pos));
    assert!(edited);

    // New chunks occupy the only worker, so the remesh waits behind them
    gate.store(false, Ordering::Release);
    let next = focus + Vec3::new(16.0, 0.0, 0.0);
    let stats = world.tick(next);
    assert_eq!(stats.created, 25);
    assert!(stats.remeshing >= 1);
    assert_eq!(world.chunk_state(center), Some(ChunkState::Remeshing));
    // The previous mesh stays drawable meanwhile
    assert_eq!(mesh_of(&world).as_deref(), Some(before.as_ref()));

    gate.store(true, Ordering::Release);
    world.run_until_settled(next, 64);
    assert_eq!(world.chunk_state(center), Some(ChunkState::Loaded));
    let after = mesh_of(&world).unwrap();
    assert_ne!(*after, *before);
}

#[test]
fn test_same_seed_same_terrain() {
    let focus = Vec3::new(8.0, 120.0, 8.0);
    let mut a = World::new(config(1)).unwrap();
    let mut b = World::new(config(1)).unwrap();
    a.run_until_settled(focus, 16);
    b.run_until_settled(focus, 16);

    for y in 100..140 {
        let pos = IVec3::new(3, y, 11);
        assert_eq!(a.get_voxel(pos), b.get_voxel(pos));
    }
    assert_eq!(a.column_height(3, 11), b.column_height(3, 11));
}
