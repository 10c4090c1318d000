//! Breadth-first light propagation and removal
//!
//! Every search advances in rings: all nodes of ring `d` are processed before
//! any node of ring `d + 1`, and each ring costs one light level. Positions
//! whose chunk is unavailable are neither light sources nor written to.

use glam::IVec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::constants::MAX_LIGHT;
use crate::core::voxel::{LightChannel, Voxel};

pub const FACE_NEIGHBORS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Z,
    IVec3::NEG_Z,
    IVec3::Y,
    IVec3::NEG_Y,
];

/// Read access to voxels by world position.
pub trait VoxelSource {
    /// `None` when the owning chunk is missing or not yet generated.
    fn voxel(&self, pos: IVec3) -> Option<Voxel>;
}

/// Light writes by world position. Writers mark affected chunks dirty.
pub trait VoxelStore: VoxelSource {
    fn set_light(&self, pos: IVec3, channel: LightChannel, level: u8) -> bool;
}

/// Strength a voxel contributes as a light source on the given channel.
fn source_strength(voxel: Voxel, channel: LightChannel) -> u8 {
    match channel {
        LightChannel::Sky if voxel.is_transparent() && voxel.sky_light() == MAX_LIGHT => MAX_LIGHT,
        LightChannel::Sky => 0,
        LightChannel::Block => voxel.material().emission,
    }
}

fn expand(
    source: &impl VoxelSource,
    pos: IVec3,
    channel: LightChannel,
    visited: &mut FxHashSet<IVec3>,
    next: &mut Vec<IVec3>,
) {
    for offset in FACE_NEIGHBORS {
        let neighbor = pos + offset;
        if visited.contains(&neighbor) {
            continue;
        }
        let Some(voxel) = source.voxel(neighbor) else {
            continue;
        };
        // Opaque emitters are visited as sources but never expanded through
        let passable = voxel.is_transparent();
        let emitter = channel == LightChannel::Block && voxel.material().emission > 0;
        if passable || emitter {
            visited.insert(neighbor);
            next.push(neighbor);
        }
    }
}

/// True light level at `pos`: the strongest source minus its ring distance.
pub fn calculate_light_at(source: &impl VoxelSource, pos: IVec3, channel: LightChannel) -> u8 {
    let Some(start) = source.voxel(pos) else {
        return 0;
    };
    if start.is_opaque() {
        return source_strength(start, channel).min(MAX_LIGHT);
    }

    let mut visited = FxHashSet::default();
    visited.insert(pos);
    let mut ring = vec![pos];
    let mut next = Vec::new();
    let mut best = 0u8;
    let mut distance = 0u8;

    while !ring.is_empty() && distance < MAX_LIGHT && best < MAX_LIGHT - distance {
        for &node in &ring {
            let Some(voxel) = source.voxel(node) else {
                continue;
            };
            best = best.max(source_strength(voxel, channel).saturating_sub(distance));
            if voxel.is_transparent() {
                expand(source, node, channel, &mut visited, &mut next);
            }
        }
        std::mem::swap(&mut ring, &mut next);
        next.clear();
        distance += 1;
    }

    best
}

/// Floods `level` outward from `pos`, raising every reachable voxel whose
/// stored level is lower than the ring level. Returns the number of writes.
pub fn propagate_light(
    store: &impl VoxelStore,
    pos: IVec3,
    level: u8,
    channel: LightChannel,
) -> usize {
    let mut visited = FxHashSet::default();
    visited.insert(pos);
    let mut ring = vec![pos];
    let mut next = Vec::new();
    let mut current = level.min(MAX_LIGHT);
    let mut writes = 0;

    while !ring.is_empty() && current > 0 {
        for &node in &ring {
            let Some(voxel) = store.voxel(node) else {
                continue;
            };
            if current <= voxel.light_level(channel) {
                continue;
            }
            if store.set_light(node, channel, current) {
                writes += 1;
            }
            if voxel.is_transparent() || node == pos {
                expand_transparent(store, node, &mut visited, &mut next);
            }
        }
        std::mem::swap(&mut ring, &mut next);
        next.clear();
        current -= 1;
    }

    writes
}

/// Retracts light that may have come from a source of `level` at `pos`.
///
/// The affected region is every voxel reachable from `pos` whose stored level
/// is at most the ring level. Its levels are then recomputed from the sources
/// that remain (emitters or sky inside the region, plus the light bordering
/// it) instead of being zeroed, so overlapping sources keep their
/// contribution. Returns the number of writes.
pub fn remove_light(
    store: &impl VoxelStore,
    pos: IVec3,
    level: u8,
    channel: LightChannel,
) -> usize {
    let mut visited = FxHashSet::default();
    visited.insert(pos);
    let mut ring = vec![pos];
    let mut next = Vec::new();
    let mut current = level.min(MAX_LIGHT);

    let mut affected: FxHashMap<IVec3, Voxel> = FxHashMap::default();
    let mut border: Vec<(IVec3, u8)> = Vec::new();

    while !ring.is_empty() && current > 0 {
        for &node in &ring {
            let Some(voxel) = store.voxel(node) else {
                continue;
            };
            let stored = voxel.light_level(channel);
            if stored > current {
                border.push((node, stored));
                continue;
            }
            affected.insert(node, voxel);
            if voxel.is_transparent() || node == pos {
                expand_transparent(store, node, &mut visited, &mut next);
            }
        }
        std::mem::swap(&mut ring, &mut next);
        next.clear();
        current -= 1;
    }
    // Nodes beyond the last ring keep whatever they already hold
    for node in ring {
        if let Some(voxel) = store.voxel(node) {
            border.push((node, voxel.light_level(channel)));
        }
    }

    let levels = recompute_region(&affected, &border, channel);

    let mut writes = 0;
    for (node, voxel) in &affected {
        let recalculated = levels.get(node).copied().unwrap_or(0);
        if recalculated != voxel.light_level(channel)
            && store.set_light(*node, channel, recalculated)
        {
            writes += 1;
        }
    }
    writes
}

/// Level-bucketed flood restricted to `region`, seeded by sources inside it
/// and by the stored levels of the voxels bordering it.
fn recompute_region(
    region: &FxHashMap<IVec3, Voxel>,
    border: &[(IVec3, u8)],
    channel: LightChannel,
) -> FxHashMap<IVec3, u8> {
    let mut flood = RegionFlood {
        region,
        channel,
        levels: FxHashMap::default(),
        buckets: vec![Vec::new(); MAX_LIGHT as usize + 1],
    };

    for (&node, &voxel) in region {
        flood.raise(node, source_strength(voxel, channel).min(MAX_LIGHT));
    }
    for &(node, stored) in border {
        for offset in FACE_NEIGHBORS {
            flood.raise(node + offset, stored.saturating_sub(1));
        }
    }

    for level in (1..=MAX_LIGHT).rev() {
        let nodes = std::mem::take(&mut flood.buckets[level as usize]);
        for node in nodes {
            if flood.levels.get(&node).copied() != Some(level) {
                continue;
            }
            for offset in FACE_NEIGHBORS {
                flood.raise(node + offset, level - 1);
            }
        }
    }

    flood.levels
}

struct RegionFlood<'a> {
    region: &'a FxHashMap<IVec3, Voxel>,
    channel: LightChannel,
    levels: FxHashMap<IVec3, u8>,
    buckets: Vec<Vec<IVec3>>,
}

impl RegionFlood<'_> {
    fn raise(&mut self, node: IVec3, candidate: u8) {
        let Some(&voxel) = self.region.get(&node) else {
            return;
        };
        let emits = source_strength(voxel, self.channel) > 0;
        if candidate == 0 || !(voxel.is_transparent() || emits) {
            return;
        }
        let entry = self.levels.entry(node).or_insert(0);
        if candidate > *entry {
            *entry = candidate;
            self.buckets[candidate as usize].push(node);
        }
    }
}

fn expand_transparent(
    source: &impl VoxelSource,
    pos: IVec3,
    visited: &mut FxHashSet<IVec3>,
    next: &mut Vec<IVec3>,
) {
    for offset in FACE_NEIGHBORS {
        let neighbor = pos + offset;
        if visited.contains(&neighbor) {
            continue;
        }
        if source.voxel(neighbor).is_some_and(|v| v.is_transparent()) {
            visited.insert(neighbor);
            next.push(neighbor);
        }
    }
}
