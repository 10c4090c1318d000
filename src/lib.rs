// Core module with voxels, chunks, columns and geometry types
pub mod core;

// Mesh building
pub mod render;

// World generation, lighting and chunk lifecycle
pub mod world;

pub mod constants;
pub mod scheduler;
pub mod settings;

// Re-exports
pub use constants::*;
pub use crate::core::{AABB, Biome, Chunk, ChunkColumn, ColumnData, LightChannel, Material, Vertex, Voxel};
pub use render::{ChunkMesh, MeshStream, generate_chunk_meshes};
pub use scheduler::TaskScheduler;
pub use settings::{ConfigError, WorldConfig};
pub use world::{
    ChunkGenerator, ChunkState, LoadedChunk, RayHit, TickStats, VoxelSource, VoxelStore, World,
};
