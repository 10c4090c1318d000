//! Rendering-related modules
//! Contains mesh buffers and the chunk mesher.

pub mod mesh;
pub mod mesher;

// Re-export commonly used types
pub use mesh::{ChunkMesh, MeshStream, add_quad};
pub use mesher::generate_chunk_meshes;
