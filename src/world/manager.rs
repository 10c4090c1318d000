//! Chunk lifecycle around a moving focus point
//!
//! The control thread owns the chunk and column maps and drives every state
//! transition from `tick`. Workers only ever touch the slots handed to them:
//! generation writes a PENDING chunk, meshing reads a chunk and its
//! neighbors. A slot's state is published with release ordering after the
//! worker has dropped its lock, so observing a state implies observing the
//! data written before it.

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use glam::{IVec2, IVec3, Vec3};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;

use crate::constants::{CHUNK_SIZE, MAX_LIGHT};
use crate::core::chunk::Chunk;
use crate::core::column::ChunkColumn;
use crate::core::coords;
use crate::core::voxel::{LightChannel, Voxel};
use crate::render::mesh::ChunkMesh;
use crate::render::mesher::generate_chunk_meshes;
use crate::scheduler::TaskScheduler;
use crate::settings::WorldConfig;
use crate::world::features::{TREE, plan_trees};
use crate::world::generator::ChunkGenerator;
use crate::world::light::{
    VoxelSource, VoxelStore, calculate_light_at, propagate_light, remove_light,
};
use crate::world::neighborhood::{NEIGHBORHOOD_SIZE, Neighborhood, offset_of};
use crate::world::raycast::{RayHit, world_ray_detection};
use crate::world::slab::SlabAllocator;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkState {
    /// Queued or running on a worker; voxel data not yet visible.
    Pending = 0,
    Generated = 1,
    /// Decorated; content is final apart from edits.
    Ready = 2,
    Meshing = 3,
    Meshed = 4,
    Loaded = 5,
    /// Loaded chunk being meshed again; its previous mesh stays drawable.
    Remeshing = 6,
}

impl ChunkState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ChunkState::Pending,
            1 => ChunkState::Generated,
            2 => ChunkState::Ready,
            3 => ChunkState::Meshing,
            4 => ChunkState::Meshed,
            5 => ChunkState::Loaded,
            _ => ChunkState::Remeshing,
        }
    }

    /// Pipeline stage used to gate work on neighbors.
    pub fn progress(self) -> u8 {
        match self {
            ChunkState::Pending => 0,
            ChunkState::Generated => 1,
            ChunkState::Ready | ChunkState::Meshing => 2,
            ChunkState::Meshed | ChunkState::Remeshing => 3,
            ChunkState::Loaded => 4,
        }
    }

    /// A worker holds the slot; it must not be evicted.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            ChunkState::Pending | ChunkState::Meshing | ChunkState::Remeshing
        )
    }

    pub fn is_drawable(self) -> bool {
        matches!(self, ChunkState::Loaded | ChunkState::Remeshing)
    }
}

/// One cached chunk with its lifecycle state and latest mesh.
pub struct ChunkSlot {
    pub position: IVec3,
    pub buffer_offset: u32,
    state: AtomicU8,
    dirty: AtomicBool,
    voxels: RwLock<Chunk>,
    mesh: Mutex<Arc<ChunkMesh>>,
}

impl ChunkSlot {
    fn new(position: IVec3, buffer_offset: u32) -> Self {
        Self::with_chunk(Chunk::new(position), buffer_offset, ChunkState::Pending)
    }

    fn with_chunk(chunk: Chunk, buffer_offset: u32, state: ChunkState) -> Self {
        ChunkSlot {
            position: chunk.chunk_position(),
            buffer_offset,
            state: AtomicU8::new(state as u8),
            dirty: AtomicBool::new(false),
            voxels: RwLock::new(chunk),
            mesh: Mutex::new(Arc::new(ChunkMesh::default())),
        }
    }

    pub fn state(&self) -> ChunkState {
        ChunkState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ChunkState) {
        self.state.store(state as u8, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Chunk> {
        self.voxels.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Chunk> {
        self.voxels.write()
    }

    pub fn mesh(&self) -> Arc<ChunkMesh> {
        Arc::clone(&self.mesh.lock())
    }
}

struct ColumnEntry {
    column: Arc<ChunkColumn>,
    /// Chunk Y coordinates currently cached on this footprint.
    stack: BTreeSet<i32>,
}

impl ColumnEntry {
    fn new(position: IVec2) -> Self {
        ColumnEntry {
            column: Arc::new(ChunkColumn::new(position)),
            stack: BTreeSet::new(),
        }
    }
}

/// Counters for one `tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub created: usize,
    pub evicted: usize,
    pub evicted_columns: usize,
    pub decorated: usize,
    pub meshing: usize,
    pub remeshing: usize,
    pub loaded: usize,
    /// Loading stopped early because every buffer slot was taken.
    pub slab_exhausted: bool,
}

impl TickStats {
    pub fn is_quiet(&self) -> bool {
        self.created == 0
            && self.evicted == 0
            && self.evicted_columns == 0
            && self.decorated == 0
            && self.meshing == 0
            && self.remeshing == 0
            && self.loaded == 0
    }
}

/// Drawable chunk handed to the renderer.
#[derive(Clone)]
pub struct LoadedChunk {
    pub position: IVec3,
    pub buffer_offset: u32,
    pub mesh: Arc<ChunkMesh>,
}

pub struct World {
    config: WorldConfig,
    generator: Arc<ChunkGenerator>,
    scheduler: TaskScheduler,
    chunks: FxHashMap<IVec3, Arc<ChunkSlot>>,
    columns: FxHashMap<IVec2, ColumnEntry>,
    slab: SlabAllocator,
    /// Chunk offsets inside the update cube, nearest first.
    load_order: Vec<IVec3>,
    center: Option<IVec3>,
}

impl World {
    pub fn new(config: WorldConfig) -> io::Result<Self> {
        let generator = ChunkGenerator::new(config.seed, config.water_level);
        Self::with_generator(config, generator)
    }

    pub fn with_generator(config: WorldConfig, generator: ChunkGenerator) -> io::Result<Self> {
        let scheduler = TaskScheduler::new(config.worker_count)?;
        let slab = SlabAllocator::for_update_distance(config.update_distance);
        let load_order = load_order(config.update_distance);
        tracing::info!(
            "World seed {} with update distance {} ({} chunk slots, {} workers)",
            config.seed,
            config.update_distance,
            slab.capacity(),
            scheduler.worker_count()
        );
        Ok(World {
            config,
            generator: Arc::new(generator),
            scheduler,
            chunks: FxHashMap::default(),
            columns: FxHashMap::default(),
            slab,
            load_order,
            center: None,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn slab_in_use(&self) -> usize {
        self.slab.in_use()
    }

    pub fn chunk_state(&self, chunk_pos: IVec3) -> Option<ChunkState> {
        self.chunks.get(&chunk_pos).map(|slot| slot.state())
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Blocks until every queued generation and meshing task has finished.
    pub fn wait_idle(&self) {
        while !self.scheduler.is_idle() {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// One control-thread step: evict, load, then advance chunk states.
    pub fn tick(&mut self, focus: Vec3) -> TickStats {
        let center = coords::chunk_pos(coords::voxel_at(focus));
        if self.center != Some(center) {
            tracing::debug!("Focus entered chunk {}", center);
            self.center = Some(center);
        }

        let mut stats = TickStats::default();
        self.evict(center, &mut stats);
        self.load_missing(center, &mut stats);
        self.advance(center, &mut stats);

        if !stats.is_quiet() {
            tracing::debug!(
                "Tick: +{} -{} chunks, -{} columns, {} decorated, {} meshing, {} remeshing, {} loaded",
                stats.created,
                stats.evicted,
                stats.evicted_columns,
                stats.decorated,
                stats.meshing,
                stats.remeshing,
                stats.loaded
            );
        }
        stats
    }

    /// Ticks until a tick does no work and the workers are idle.
    /// Returns the number of ticks run.
    pub fn run_until_settled(&mut self, focus: Vec3, max_ticks: usize) -> usize {
        for tick in 1..=max_ticks {
            let stats = self.tick(focus);
            self.wait_idle();
            if stats.is_quiet() {
                return tick;
            }
        }
        tracing::warn!("World still busy after {} ticks", max_ticks);
        max_ticks
    }

    fn in_range(&self, chunk_pos: IVec3, center: IVec3) -> bool {
        coords::chebyshev(chunk_pos, center) <= self.config.update_distance
    }

    fn evict(&mut self, center: IVec3, stats: &mut TickStats) {
        let distance = self.config.update_distance;
        let stale: Vec<IVec3> = self
            .chunks
            .iter()
            .filter(|(pos, slot)| !self.in_range(**pos, center) && !slot.state().is_busy())
            .map(|(pos, _)| *pos)
            .collect();

        for pos in stale {
            let Some(slot) = self.chunks.remove(&pos) else {
                continue;
            };
            self.slab.release(slot.buffer_offset);
            if let Some(entry) = self.columns.get_mut(&coords::column_pos(pos)) {
                entry.stack.remove(&pos.y);
                entry.column.release();
            }
            stats.evicted += 1;
        }

        let before = self.columns.len();
        self.columns.retain(|key, entry| {
            let in_range = (key.x - center.x).abs() <= distance && (key.y - center.z).abs() <= distance;
            in_range || entry.column.dependency_count() > 0
        });
        stats.evicted_columns = before - self.columns.len();
    }

    fn load_missing(&mut self, center: IVec3, stats: &mut TickStats) {
        for i in 0..self.load_order.len() {
            let pos = center + self.load_order[i];
            if self.chunks.contains_key(&pos) {
                continue;
            }
            let Some(buffer_offset) = self.slab.allocate() else {
                stats.slab_exhausted = true;
                tracing::trace!("No free chunk slot, deferring loads");
                break;
            };

            let column = self.attach_column(pos);
            let slot = Arc::new(ChunkSlot::new(pos, buffer_offset));
            self.chunks.insert(pos, Arc::clone(&slot));
            self.dispatch_generation(slot, column);
            stats.created += 1;
        }
    }

    fn attach_column(&mut self, chunk_pos: IVec3) -> Arc<ChunkColumn> {
        let key = coords::column_pos(chunk_pos);
        let entry = self
            .columns
            .entry(key)
            .or_insert_with(|| ColumnEntry::new(key));
        entry.column.acquire();
        entry.stack.insert(chunk_pos.y);
        Arc::clone(&entry.column)
    }

    fn dispatch_generation(&self, slot: Arc<ChunkSlot>, column: Arc<ChunkColumn>) {
        let generator = Arc::clone(&self.generator);
        self.scheduler.add_task(move || {
            {
                let mut chunk = slot.write();
                generator.generate_chunk(&mut chunk, &column);
            }
            slot.set_state(ChunkState::Generated);
        });
    }

    fn advance(&mut self, center: IVec3, stats: &mut TickStats) {
        let mut slots: Vec<Arc<ChunkSlot>> = self.chunks.values().cloned().collect();
        slots.sort_by_key(|slot| coords::chebyshev(slot.position, center));

        for slot in slots {
            match slot.state() {
                ChunkState::Generated => {
                    if self.neighbors_reached(slot.position, 1) {
                        self.decorate(&slot);
                        slot.set_state(ChunkState::Ready);
                        stats.decorated += 1;
                    }
                }
                ChunkState::Ready => {
                    if self.neighbors_reached(slot.position, 2) {
                        slot.set_state(ChunkState::Meshing);
                        self.dispatch_mesh(&slot, ChunkState::Meshed);
                        stats.meshing += 1;
                    }
                }
                state @ (ChunkState::Meshed | ChunkState::Loaded) if slot.is_dirty() => {
                    slot.set_state(ChunkState::Remeshing);
                    self.dispatch_mesh(&slot, state);
                    stats.remeshing += 1;
                }
                ChunkState::Meshed => {
                    slot.set_state(ChunkState::Loaded);
                    stats.loaded += 1;
                }
                _ => {}
            }
        }
    }

    fn neighbors_reached(&self, chunk_pos: IVec3, progress: u8) -> bool {
        (0..NEIGHBORHOOD_SIZE)
            .map(offset_of)
            .filter(|offset| *offset != IVec3::ZERO)
            .all(|offset| {
                self.chunks
                    .get(&(chunk_pos + offset))
                    .is_some_and(|slot| slot.state().progress() >= progress)
            })
    }

    /// Plants trees whose anchors lie in this chunk. Blocks may spill into
    /// neighbors, which are generated by the time this runs.
    fn decorate(&self, slot: &ChunkSlot) {
        let Some(entry) = self.columns.get(&coords::column_pos(slot.position)) else {
            return;
        };
        // Prebuilt chunks arrive without column data
        if !entry.column.is_generated() {
            return;
        }
        let anchors = {
            let chunk = slot.read();
            plan_trees(&self.generator, &chunk, &entry.column, self.config.tree_chance)
        };
        for anchor in &anchors {
            for &(offset, material_id) in &TREE.blocks {
                self.add_voxel(*anchor + offset, Voxel::new(material_id));
            }
        }
        if !anchors.is_empty() {
            tracing::trace!("Planted {} trees in chunk {}", anchors.len(), slot.position);
        }
    }

    /// Chunk and its 26 neighbors, skipping any that are missing or pending.
    fn snapshot(&self, chunk_pos: IVec3) -> Vec<Option<Arc<ChunkSlot>>> {
        (0..NEIGHBORHOOD_SIZE)
            .map(|i| {
                self.chunks
                    .get(&(chunk_pos + offset_of(i)))
                    .filter(|slot| slot.state() != ChunkState::Pending)
                    .cloned()
            })
            .collect()
    }

    fn dispatch_mesh(&self, slot: &Arc<ChunkSlot>, done: ChunkState) {
        let neighbors = self.snapshot(slot.position);
        let slot = Arc::clone(slot);
        self.scheduler.add_task(move || {
            // Edits landing after this point flag the chunk again
            slot.dirty.store(false, Ordering::Release);
            let mesh = {
                let hood = Neighborhood::lock(slot.position, &neighbors);
                match hood.center() {
                    Some(chunk) => generate_chunk_meshes(chunk, &hood),
                    None => ChunkMesh::default(),
                }
            };
            *slot.mesh.lock() = Arc::new(mesh);
            slot.set_state(done);
        });
    }

    /// Chunks with a mesh the renderer may draw, with their buffer offsets.
    pub fn get_loaded_chunks(&self) -> Vec<LoadedChunk> {
        self.chunks
            .values()
            .filter(|slot| slot.state().is_drawable())
            .map(|slot| LoadedChunk {
                position: slot.position,
                buffer_offset: slot.buffer_offset,
                mesh: slot.mesh(),
            })
            .collect()
    }

    /// Installs a prebuilt chunk as GENERATED. Fails if the position is taken
    /// or no buffer slot is free.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> bool {
        let pos = chunk.chunk_position();
        if self.chunks.contains_key(&pos) {
            return false;
        }
        let Some(buffer_offset) = self.slab.allocate() else {
            return false;
        };
        self.attach_column(pos);
        let slot = ChunkSlot::with_chunk(chunk, buffer_offset, ChunkState::Generated);
        self.chunks.insert(pos, Arc::new(slot));
        true
    }

    /// Slot owning `pos` whose voxel data is visible to the control thread.
    fn ready_slot(&self, pos: IVec3) -> Option<&Arc<ChunkSlot>> {
        self.chunks
            .get(&coords::chunk_pos(pos))
            .filter(|slot| slot.state() != ChunkState::Pending)
    }

    pub fn get_voxel(&self, pos: IVec3) -> Option<Voxel> {
        self.voxel(pos)
    }

    pub fn position_is_solid(&self, pos: IVec3) -> bool {
        self.voxel(pos).is_some_and(|v| v.is_solid())
    }

    pub fn position_is_transparent(&self, pos: IVec3) -> bool {
        self.voxel(pos).is_some_and(|v| v.is_transparent())
    }

    pub fn light_at(&self, pos: IVec3, channel: LightChannel) -> Option<u8> {
        self.voxel(pos).map(|v| v.light_level(channel))
    }

    /// Highest solid voxel of the world column at (x, z) among cached chunks.
    pub fn column_height(&self, x: i32, z: i32) -> Option<i32> {
        let cell = IVec3::new(x, 0, z);
        let chunk = coords::chunk_pos(cell);
        let local = coords::local_pos(cell);
        let entry = self.columns.get(&coords::column_pos(chunk))?;

        entry.stack.iter().rev().find_map(|&cy| {
            let slot = self.chunks.get(&IVec3::new(chunk.x, cy, chunk.z))?;
            if slot.state() == ChunkState::Pending {
                return None;
            }
            slot.read().height_at(local.x, local.z)
        })
    }

    /// Flags the chunk owning `pos` plus every neighbor whose mesh samples it.
    fn mark_dirty_around(&self, pos: IVec3) {
        let chunk = coords::chunk_pos(pos);
        let local = coords::local_pos(pos);
        if !Chunk::is_edge(local) {
            if let Some(slot) = self.chunks.get(&chunk) {
                slot.mark_dirty();
            }
            return;
        }
        let spread = |v: i32| -> &'static [i32] {
            if v == 0 {
                &[0, -1]
            } else if v == CHUNK_SIZE - 1 {
                &[0, 1]
            } else {
                &[0]
            }
        };
        for &dx in spread(local.x) {
            for &dy in spread(local.y) {
                for &dz in spread(local.z) {
                    if let Some(slot) = self.chunks.get(&(chunk + IVec3::new(dx, dy, dz))) {
                        slot.mark_dirty();
                    }
                }
            }
        }
    }

    /// Places `voxel` into an air cell and repairs lighting around it.
    pub fn add_voxel(&self, pos: IVec3, voxel: Voxel) -> bool {
        let Some(slot) = self.ready_slot(pos) else {
            return false;
        };
        let local = coords::local_pos(pos);
        let previous_top = self.column_height(pos.x, pos.z);

        let previous = {
            let mut chunk = slot.write();
            let Some(previous) = chunk.get_voxel(local) else {
                return false;
            };
            if previous.is_solid() {
                return false;
            }
            let mut placed = voxel;
            placed.light = if voxel.is_opaque() { 0 } else { previous.light };
            if !chunk.add_voxel(local, placed) {
                return false;
            }
            previous
        };
        self.mark_dirty_around(pos);

        if previous_top.is_none_or(|top| pos.y > top) {
            self.reconcile_column(pos.x, pos.z, Some(pos.y));
        }
        if voxel.is_opaque() {
            for channel in LightChannel::ALL {
                let level = previous.light_level(channel);
                if level > 0 {
                    remove_light(self, pos, level, channel);
                }
            }
        }
        let emission = voxel.material().emission;
        if emission > 0 {
            propagate_light(self, pos, emission, LightChannel::Block);
        }
        true
    }

    /// Clears a solid cell to air and refills it with light from its surroundings.
    pub fn remove_voxel(&self, pos: IVec3) -> bool {
        let Some(slot) = self.ready_slot(pos) else {
            return false;
        };
        let local = coords::local_pos(pos);
        let previous_top = self.column_height(pos.x, pos.z);

        let removed = {
            let mut chunk = slot.write();
            let Some(removed) = chunk.get_voxel(local) else {
                return false;
            };
            if !chunk.remove_voxel(local) {
                return false;
            }
            removed
        };
        self.mark_dirty_around(pos);

        let emission = removed.material().emission;
        if emission > 0 {
            remove_light(self, pos, emission.max(removed.block_light()), LightChannel::Block);
        }

        if previous_top == Some(pos.y) {
            let top = self.column_height(pos.x, pos.z);
            self.reconcile_column(pos.x, pos.z, top);
        } else {
            let sky = calculate_light_at(self, pos, LightChannel::Sky);
            propagate_light(self, pos, sky, LightChannel::Sky);
        }
        let block = calculate_light_at(self, pos, LightChannel::Block);
        propagate_light(self, pos, block, LightChannel::Block);
        true
    }

    /// Brings skylight of one world column in line with its top voxel `top`:
    /// every transparent cell above it is open sky, every cell at or below it
    /// loses direct sky access.
    fn reconcile_column(&self, x: i32, z: i32, top: Option<i32>) {
        let chunk = coords::chunk_pos(IVec3::new(x, 0, z));
        let Some(entry) = self.columns.get(&coords::column_pos(chunk)) else {
            return;
        };
        let (Some(&lowest), Some(&highest)) = (entry.stack.first(), entry.stack.last()) else {
            return;
        };

        let mut demoted = Vec::new();
        for y in (lowest * CHUNK_SIZE..(highest + 1) * CHUNK_SIZE).rev() {
            let pos = IVec3::new(x, y, z);
            let Some(voxel) = self.voxel(pos) else {
                continue;
            };
            if !voxel.is_transparent() {
                continue;
            }
            let open_sky = top.is_none_or(|t| y > t);
            if open_sky {
                if voxel.sky_light() != MAX_LIGHT {
                    propagate_light(self, pos, MAX_LIGHT, LightChannel::Sky);
                }
            } else if voxel.sky_light() == MAX_LIGHT {
                self.set_light(pos, LightChannel::Sky, MAX_LIGHT - 1);
                demoted.push(pos);
            }
        }
        for pos in demoted {
            remove_light(self, pos, MAX_LIGHT, LightChannel::Sky);
        }
    }

    /// First solid voxel along the segment `start..end`.
    pub fn world_ray_detection(&self, start: Vec3, end: Vec3) -> Option<RayHit> {
        world_ray_detection(start, end, |pos| self.position_is_solid(pos))
    }

    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}

impl VoxelSource for World {
    fn voxel(&self, pos: IVec3) -> Option<Voxel> {
        self.ready_slot(pos)?.read().get_voxel(coords::local_pos(pos))
    }
}

impl VoxelStore for World {
    fn set_light(&self, pos: IVec3, channel: LightChannel, level: u8) -> bool {
        let Some(slot) = self.ready_slot(pos) else {
            return false;
        };
        if !slot.write().set_light(coords::local_pos(pos), channel, level) {
            return false;
        }
        self.mark_dirty_around(pos);
        true
    }
}

impl Drop for World {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Offsets of the cube with radius `distance`, ordered nearest first.
fn load_order(distance: i32) -> Vec<IVec3> {
    let d = distance.max(0);
    let mut offsets = Vec::with_capacity(((2 * d + 1) as usize).pow(3));
    for y in -d..=d {
        for z in -d..=d {
            for x in -d..=d {
                offsets.push(IVec3::new(x, y, z));
            }
        }
    }
    offsets.sort_by_key(|o| (o.abs().max_element(), o.length_squared()));
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_order_is_nearest_first() {
        let order = load_order(2);
        assert_eq!(order.len(), 125);
        assert_eq!(order[0], IVec3::ZERO);
        let rings: Vec<i32> = order.iter().map(|o| o.abs().max_element()).collect();
        assert!(rings.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_state_progress_and_busy() {
        assert_eq!(ChunkState::Pending.progress(), 0);
        assert_eq!(ChunkState::Meshing.progress(), ChunkState::Ready.progress());
        assert!(ChunkState::Remeshing.progress() >= ChunkState::Ready.progress());
        assert!(ChunkState::Pending.is_busy());
        assert!(!ChunkState::Loaded.is_busy());
        for state in [
            ChunkState::Pending,
            ChunkState::Generated,
            ChunkState::Ready,
            ChunkState::Meshing,
            ChunkState::Meshed,
            ChunkState::Loaded,
            ChunkState::Remeshing,
        ] {
            assert_eq!(ChunkState::from_u8(state as u8), state);
        }
    }

    #[test]
    fn test_dirty_spreads_across_borders() {
        let config = WorldConfig {
            worker_count: 1,
            update_distance: 1,
            ..WorldConfig::default()
        };
        let mut world = World::new(config).unwrap();
        for x in -1..=0 {
            for y in -1..=0 {
                for z in -1..=0 {
                    assert!(world.insert_chunk(Chunk::new(IVec3::new(x, y, z))));
                }
            }
        }
        world.mark_dirty_around(IVec3::ZERO);
        assert!(world.chunks.values().all(|slot| slot.is_dirty()));

        for slot in world.chunks.values() {
            slot.dirty.store(false, Ordering::Release);
        }
        world.mark_dirty_around(IVec3::new(5, 5, 5));
        let dirty = world.chunks.values().filter(|slot| slot.is_dirty()).count();
        assert_eq!(dirty, 1);
    }

    #[test]
    fn test_prebuilt_chunks_are_not_decorated() {
        let config = WorldConfig {
            worker_count: 1,
            update_distance: 1,
            tree_chance: 1.0,
            ..WorldConfig::default()
        };
        let mut world = World::new(config).unwrap();
        for i in 0..NEIGHBORHOOD_SIZE {
            let mut chunk = Chunk::new(offset_of(i));
            if offset_of(i) == IVec3::ZERO {
                for x in 0..CHUNK_SIZE {
                    for z in 0..CHUNK_SIZE {
                        chunk.add_voxel(IVec3::new(x, 4, z), Voxel::new(crate::core::material::GRASS));
                    }
                }
            }
            assert!(world.insert_chunk(chunk));
        }

        let stats = world.tick(Vec3::splat(8.0));
        assert_eq!(stats.created, 0);
        assert_eq!(stats.decorated, 1);
        assert_eq!(world.chunk_state(IVec3::ZERO), Some(ChunkState::Ready));
        assert!(world.columns.values().all(|entry| !entry.column.is_generated()));
        // No tree grows on the grass without column data
        assert_eq!(world.column_height(8, 8), Some(4));
        assert!(world.get_voxel(IVec3::new(8, 5, 8)).is_some_and(|v| v.is_air()));
    }
}
