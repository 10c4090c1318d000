//! Core data structures for the voxel world
//! Contains voxels, materials, biomes, chunks, columns and vertices.

pub mod aabb;
pub mod biome;
pub mod chunk;
pub mod column;
pub mod coords;
pub mod material;
pub mod vertex;
pub mod voxel;

// Re-export commonly used types
pub use aabb::AABB;
pub use biome::Biome;
pub use chunk::Chunk;
pub use column::{ChunkColumn, ColumnData};
pub use material::Material;
pub use vertex::Vertex;
pub use voxel::{LightChannel, Voxel};
