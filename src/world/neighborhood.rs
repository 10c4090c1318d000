use std::sync::Arc;

use glam::IVec3;
use parking_lot::RwLockReadGuard;

use crate::core::chunk::Chunk;
use crate::core::coords;
use crate::core::voxel::Voxel;
use crate::world::light::VoxelSource;
use crate::world::manager::ChunkSlot;

pub const NEIGHBORHOOD_SIZE: usize = 27;
const CENTER: usize = 13;

/// Offset of slot `index` in a 3x3x3 block, x fastest.
pub fn offset_of(index: usize) -> IVec3 {
    let i = index as i32;
    IVec3::new(i % 3 - 1, (i / 3) % 3 - 1, i / 9 - 1)
}

fn index_of(offset: IVec3) -> Option<usize> {
    if offset.abs().max_element() > 1 {
        return None;
    }
    let o = offset + IVec3::ONE;
    Some((o.x + o.y * 3 + o.z * 9) as usize)
}

/// Read guards over a chunk and its 26 neighbors, held for one meshing pass.
pub struct Neighborhood<'a> {
    center: IVec3,
    guards: Vec<Option<RwLockReadGuard<'a, Chunk>>>,
}

impl<'a> Neighborhood<'a> {
    pub fn lock(center: IVec3, slots: &'a [Option<Arc<ChunkSlot>>]) -> Self {
        debug_assert_eq!(slots.len(), NEIGHBORHOOD_SIZE);
        Neighborhood {
            center,
            guards: slots.iter().map(|slot| slot.as_ref().map(|s| s.read())).collect(),
        }
    }

    pub fn center(&self) -> Option<&Chunk> {
        self.guards.get(CENTER)?.as_deref()
    }
}

impl VoxelSource for Neighborhood<'_> {
    fn voxel(&self, pos: IVec3) -> Option<Voxel> {
        let index = index_of(coords::chunk_pos(pos) - self.center)?;
        let chunk = self.guards[index].as_deref()?;
        chunk.get_voxel(coords::local_pos(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_round_trip_through_index() {
        for i in 0..NEIGHBORHOOD_SIZE {
            assert_eq!(index_of(offset_of(i)), Some(i));
        }
        assert_eq!(offset_of(CENTER), IVec3::ZERO);
        assert_eq!(index_of(IVec3::new(2, 0, 0)), None);
    }
}
