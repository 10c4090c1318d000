//! Chunk mesh extraction
//!
//! Emits one quad per visible voxel face with per-vertex ambient occlusion
//! and averaged light. Neighbor voxels are resolved through a
//! [`VoxelSource`]; positions it cannot resolve count as transparent air.

use glam::IVec3;

use crate::core::chunk::Chunk;
use crate::core::vertex::Vertex;
use crate::core::voxel::Voxel;
use crate::render::mesh::ChunkMesh;
use crate::world::light::{FACE_NEIGHBORS, VoxelSource};

pub const TOP_FACE: usize = 4;

/// Corner offsets from the voxel center per face, ordered so v0-v1 and v2-v3
/// are the two diagonals. Face order matches [`FACE_NEIGHBORS`].
const FACE_VERTICES: [[[f32; 3]; 4]; 6] = [
    // +X
    [[0.5, -0.5, -0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [0.5, -0.5, 0.5]],
    // -X
    [[-0.5, -0.5, 0.5], [-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [-0.5, -0.5, -0.5]],
    // +Z
    [[0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, -0.5, 0.5]],
    // -Z
    [[-0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, -0.5, -0.5]],
    // +Y
    [[-0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, -0.5]],
    // -Y
    [[0.5, -0.5, 0.5], [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [0.5, -0.5, -0.5]],
];

fn normal_axis(face: usize) -> usize {
    match face {
        0 | 1 => 0,
        4 | 5 => 1,
        _ => 2,
    }
}

fn corner_sign(corner: [f32; 3]) -> IVec3 {
    IVec3::new(
        corner[0].signum() as i32,
        corner[1].signum() as i32,
        corner[2].signum() as i32,
    )
}

/// Edge and corner neighbor offsets of a vertex on the face's outer layer.
fn vertex_neighbors(face: usize, corner: [f32; 3]) -> [IVec3; 3] {
    let axis = normal_axis(face);
    let mut diagonal = corner_sign(corner);
    diagonal[axis] = FACE_NEIGHBORS[face][axis];

    let (t1, t2) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let mut side1 = diagonal;
    side1[t2] = 0;
    let mut side2 = diagonal;
    side2[t1] = 0;
    [side1, side2, diagonal]
}

fn occludes(source: &impl VoxelSource, pos: IVec3) -> bool {
    source.voxel(pos).is_some_and(|v| v.is_opaque())
}

/// 0 (darkest) to 3 (unoccluded).
fn vertex_ao(source: &impl VoxelSource, world: IVec3, face: usize, corner: [f32; 3]) -> u8 {
    let [side1, side2, diagonal] = vertex_neighbors(face, corner);
    let side1 = occludes(source, world + side1) as u8;
    let side2 = occludes(source, world + side2) as u8;
    let diagonal = occludes(source, world + diagonal) as u8;

    if side1 == 1 && side2 == 1 {
        return 0;
    }
    3 - (side1 + side2 + diagonal)
}

/// Averages sky and block light over the transparent voxels around a vertex.
fn vertex_light(source: &impl VoxelSource, world: IVec3, face: usize, corner: [f32; 3]) -> u8 {
    let [side1, side2, diagonal] = vertex_neighbors(face, corner);
    let samples = [FACE_NEIGHBORS[face], side1, side2, diagonal];

    let (mut sky, mut block, mut count) = (0u32, 0u32, 0u32);
    for offset in samples {
        if let Some(voxel) = source.voxel(world + offset).filter(|v| v.is_transparent()) {
            sky += voxel.sky_light() as u32;
            block += voxel.block_light() as u32;
            count += 1;
        }
    }

    if count == 0 {
        return 0;
    }
    ((sky / count) | ((block / count) << 4)) as u8
}

fn face_visible(voxel: Voxel, neighbor: Option<Voxel>, face: usize) -> bool {
    let neighbor = neighbor.unwrap_or(Voxel::AIR);
    if voxel.is_opaque() {
        return neighbor.is_transparent();
    }
    if face == TOP_FACE && voxel.is_liquid() && !neighbor.is_liquid() {
        return true;
    }
    !neighbor.is_solid()
}

/// True when every voxel of the chunk and of the shell around it is opaque,
/// so no face of the chunk can be seen.
fn is_enclosed(chunk: &Chunk, source: &impl VoxelSource) -> bool {
    if !chunk.iter().all(|(_, voxel)| voxel.is_opaque()) {
        return false;
    }
    chunk
        .iter()
        .filter(|(local, _)| Chunk::is_edge(*local))
        .all(|(local, _)| {
            let world = chunk.world_position + local;
            FACE_NEIGHBORS
                .iter()
                .filter(|offset| chunk.get_voxel(local + **offset).is_none())
                .all(|offset| occludes(source, world + *offset))
        })
}

/// Builds the opaque and transparent streams for `chunk`. Vertex positions
/// are chunk-local; voxel `v` spans `[v, v + 1]`.
pub fn generate_chunk_meshes(chunk: &Chunk, source: &impl VoxelSource) -> ChunkMesh {
    let mut mesh = ChunkMesh::default();
    if chunk.is_empty() || is_enclosed(chunk, source) {
        return mesh;
    }

    for (local, voxel) in chunk.iter_solid() {
        let world = chunk.world_position + local;
        let transparent = voxel.is_transparent();
        let center = local.as_vec3() + 0.5;

        for (face, normal) in FACE_NEIGHBORS.iter().enumerate() {
            if !face_visible(voxel, source.voxel(world + *normal), face) {
                continue;
            }

            let mut ao = [3u8; 4];
            let quad: [Vertex; 4] = std::array::from_fn(|v| {
                let corner = FACE_VERTICES[face][v];
                if !transparent {
                    ao[v] = vertex_ao(source, world, face, corner);
                }
                let position = [
                    center.x + corner[0],
                    center.y + corner[1],
                    center.z + corner[2],
                ];
                let light = vertex_light(source, world, face, corner);
                Vertex::new(position, light, ao[v], face as u8, voxel.material_id)
            });

            if transparent {
                mesh.transparent.add_quad(quad, false);
            } else {
                // Shared edge joins the brighter diagonal pair
                let flipped = ao[0] + ao[1] <= ao[2] + ao[3];
                mesh.opaque.add_quad(quad, flipped);
            }
        }
    }

    mesh
}
