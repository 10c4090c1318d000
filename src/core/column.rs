use std::sync::atomic::{AtomicUsize, Ordering};

use glam::IVec2;
use once_cell::sync::OnceCell;

use crate::constants::CHUNK_SIZE;
use crate::core::biome::Biome;

/// Terrain description of one (x, z) position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnData {
    pub biome: Biome,
    /// Y of the topmost terrain voxel.
    pub world_height: i32,
    /// Normalized height in [0, 1] before scaling.
    pub height: f32,
    pub humidity: f32,
    pub temperature: f32,
    /// Mountain overlay weight; values strictly between 0 and 1 mark the transitional band.
    pub mountain_blend: f32,
}

impl ColumnData {
    pub fn in_transition_band(&self) -> bool {
        self.mountain_blend > 0.0 && self.mountain_blend < 1.0
    }
}

/// Terrain data shared by every chunk stacked on one footprint.
///
/// The data is filled once by whichever generation task reaches it first.
pub struct ChunkColumn {
    pub position: IVec2,
    data: OnceCell<Box<[ColumnData]>>,
    dependency_count: AtomicUsize,
}

impl ChunkColumn {
    pub fn new(position: IVec2) -> Self {
        ChunkColumn {
            position,
            data: OnceCell::new(),
            dependency_count: AtomicUsize::new(0),
        }
    }

    pub fn is_generated(&self) -> bool {
        self.data.get().is_some()
    }

    pub fn data(&self) -> Option<&[ColumnData]> {
        self.data.get().map(|d| &d[..])
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> Box<[ColumnData]>) -> &[ColumnData] {
        self.data.get_or_init(init)
    }

    pub fn at(&self, x: i32, z: i32) -> Option<&ColumnData> {
        if !(0..CHUNK_SIZE).contains(&x) || !(0..CHUNK_SIZE).contains(&z) {
            return None;
        }
        self.data()?.get((x + z * CHUNK_SIZE) as usize)
    }

    pub fn acquire(&self) -> usize {
        self.dependency_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn release(&self) -> usize {
        let previous = self.dependency_count.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "column released more often than acquired");
        previous - 1
    }

    pub fn dependency_count(&self) -> usize {
        self.dependency_count.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHUNK_AREA;

    #[test]
    fn test_dependency_counting() {
        let column = ChunkColumn::new(IVec2::new(2, -3));
        assert_eq!(column.acquire(), 1);
        assert_eq!(column.acquire(), 2);
        assert_eq!(column.release(), 1);
        assert_eq!(column.dependency_count(), 1);
    }

    #[test]
    fn test_data_initialized_once() {
        let column = ChunkColumn::new(IVec2::ZERO);
        assert!(column.at(0, 0).is_none());

        let first = column.get_or_init(|| {
            vec![
                ColumnData {
                    world_height: 120,
                    ..Default::default()
                };
                CHUNK_AREA
            ]
            .into_boxed_slice()
        });
        assert_eq!(first.len(), CHUNK_AREA);

        let second = column.get_or_init(|| vec![].into_boxed_slice());
        assert_eq!(second.len(), CHUNK_AREA);
        assert_eq!(column.at(15, 15).map(|d| d.world_height), Some(120));
        assert!(column.at(16, 0).is_none());
    }
}
