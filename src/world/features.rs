//! Decorative features placed after terrain generation.

use glam::IVec3;
use once_cell::sync::Lazy;

use crate::constants::{CHUNK_SIZE, TREE_TRUNK_HEIGHT};
use crate::core::biome::Biome;
use crate::core::chunk::Chunk;
use crate::core::column::ChunkColumn;
use crate::core::material::{GRASS, LEAVES, WOOD};
use crate::world::generator::{ChunkGenerator, SALT_TREE};

/// Voxel template placed relative to an anchor voxel.
#[derive(Debug, Clone)]
pub struct Structure {
    pub biomes: Vec<Biome>,
    pub blocks: Vec<(IVec3, u8)>,
}

impl Structure {
    pub fn new(biomes: Vec<Biome>) -> Self {
        Self {
            biomes,
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, x: i32, y: i32, z: i32, material_id: u8) -> Self {
        self.blocks.push((IVec3::new(x, y, z), material_id));
        self
    }

    pub fn allowed_in(&self, biome: Biome) -> bool {
        self.biomes.contains(&biome)
    }
}

/// Trunk on top of the anchor voxel with a layered leaf crown.
pub static TREE: Lazy<Structure> = Lazy::new(|| {
    let mut tree = Structure::new(vec![
        Biome::Plains,
        Biome::Forest,
        Biome::Rainforest,
        Biome::Taiga,
    ]);

    for dy in 1..=TREE_TRUNK_HEIGHT {
        tree = tree.with_block(0, dy, 0, WOOD);
    }

    let crown = TREE_TRUNK_HEIGHT - 1;
    for dy in crown..=TREE_TRUNK_HEIGHT + 1 {
        let radius: i32 = if dy > TREE_TRUNK_HEIGHT { 1 } else { 2 };
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let corner = dx.abs() == radius && dz.abs() == radius;
                let trunk = dx == 0 && dz == 0 && dy <= TREE_TRUNK_HEIGHT;
                if (radius == 2 && corner) || trunk {
                    continue;
                }
                tree = tree.with_block(dx, dy, dz, LEAVES);
            }
        }
    }

    // Plus-shaped cap
    let cap = TREE_TRUNK_HEIGHT + 2;
    tree.with_block(0, cap, 0, LEAVES)
        .with_block(1, cap, 0, LEAVES)
        .with_block(-1, cap, 0, LEAVES)
        .with_block(0, cap, 1, LEAVES)
        .with_block(0, cap, -1, LEAVES)
});

/// World positions of the grass surface voxels in this chunk that grow a tree.
pub fn plan_trees(
    generator: &ChunkGenerator,
    chunk: &Chunk,
    column: &ChunkColumn,
    chance: f32,
) -> Vec<IVec3> {
    let mut anchors = Vec::new();
    for lz in 0..CHUNK_SIZE {
        for lx in 0..CHUNK_SIZE {
            let Some(data) = column.at(lx, lz) else {
                continue;
            };
            if !TREE.allowed_in(Biome::lowland(data.humidity, data.temperature)) {
                continue;
            }
            // Surface must lie inside this chunk and still be untouched grass
            if chunk.height_at(lx, lz) != Some(data.world_height) {
                continue;
            }
            let local = IVec3::new(lx, data.world_height - chunk.world_position.y, lz);
            if chunk.get_voxel(local).map(|v| v.material_id) != Some(GRASS) {
                continue;
            }

            let anchor = chunk.world_position + local;
            if generator.uniform(anchor, SALT_TREE) < chance {
                anchors.push(anchor);
            }
        }
    }
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WATER_LEVEL;

    #[test]
    fn test_tree_template_shape() {
        let trunk: Vec<_> = TREE.blocks.iter().filter(|(_, m)| *m == WOOD).collect();
        assert_eq!(trunk.len(), TREE_TRUNK_HEIGHT as usize);
        assert!(trunk.iter().all(|(p, _)| p.x == 0 && p.z == 0 && p.y >= 1));

        let mut seen = std::collections::HashSet::new();
        assert!(TREE.blocks.iter().all(|(p, _)| seen.insert(*p)));
        assert!(TREE.blocks.iter().all(|(p, _)| p.x.abs() <= 2 && p.z.abs() <= 2));
        assert!(!TREE.blocks.iter().any(|(p, _)| *p == IVec3::new(2, TREE_TRUNK_HEIGHT, 2)));

        // Two wide layers minus corners and trunk, a narrow layer, a plus-shaped cap
        let leaves = TREE.blocks.iter().filter(|(_, m)| *m == LEAVES).count();
        assert_eq!(leaves, 2 * (25 - 4 - 1) + 9 + 5);
        let top_ring = TREE_TRUNK_HEIGHT + 1;
        assert!(
            TREE.blocks
                .iter()
                .filter(|(p, _)| p.y == top_ring)
                .all(|(p, _)| p.x.abs() <= 1 && p.z.abs() <= 1)
        );
    }

    #[test]
    fn test_plan_trees_needs_grass_surface() {
        let generator = ChunkGenerator::new(11, WATER_LEVEL);
        let column = ChunkColumn::new(glam::IVec2::ZERO);
        generator.generate_chunk_column(&column);

        // A chunk holding no surface never grows trees
        let empty = Chunk::new(IVec3::new(0, 30, 0));
        assert!(plan_trees(&generator, &empty, &column, 1.0).is_empty());

        // Certain trial on a chunk whose surface is grass everywhere it exists
        let data = *column.at(0, 0).unwrap();
        let chunk_y = data.world_height.div_euclid(CHUNK_SIZE);
        let mut chunk = Chunk::new(IVec3::new(0, chunk_y, 0));
        generator.generate_chunk(&mut chunk, &column);
        let anchors = plan_trees(&generator, &chunk, &column, 1.0);
        for anchor in &anchors {
            let local = *anchor - chunk.world_position;
            assert_eq!(chunk.get_voxel(local).map(|v| v.material_id), Some(GRASS));
        }
        assert!(plan_trees(&generator, &chunk, &column, 0.0).is_empty());
    }
}
