//! World generation and management modules
//! Contains terrain generation, decoration, lighting, ray casts and the chunk lifecycle.

pub mod features;
pub mod generator;
pub mod light;
pub mod manager;
pub mod neighborhood;
pub mod noise;
pub mod raycast;
pub mod slab;

// Re-export commonly used types
pub use generator::ChunkGenerator;
pub use light::{VoxelSource, VoxelStore};
pub use manager::{ChunkSlot, ChunkState, LoadedChunk, TickStats, World};
pub use raycast::{RayHit, world_ray_detection};
pub use slab::SlabAllocator;
