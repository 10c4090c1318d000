//! Conversions between world, chunk and local voxel coordinates.

use glam::{IVec2, IVec3, Vec3};

use crate::constants::CHUNK_SIZE;

/// Chunk lattice coordinate containing a world voxel.
pub fn chunk_pos(world: IVec3) -> IVec3 {
    world.div_euclid(IVec3::splat(CHUNK_SIZE))
}

/// Position of a world voxel inside its chunk, always in [0, CHUNK_SIZE).
pub fn local_pos(world: IVec3) -> IVec3 {
    world.rem_euclid(IVec3::splat(CHUNK_SIZE))
}

/// World voxel at the lattice origin of a chunk.
pub fn chunk_origin(chunk: IVec3) -> IVec3 {
    chunk * CHUNK_SIZE
}

pub fn column_pos(chunk: IVec3) -> IVec2 {
    IVec2::new(chunk.x, chunk.z)
}

/// Voxel occupying a point; voxel `v` spans `[v, v + 1)` on every axis.
pub fn voxel_at(point: Vec3) -> IVec3 {
    point.floor().as_ivec3()
}

pub fn chebyshev(a: IVec3, b: IVec3) -> i32 {
    (a - b).abs().max_element()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_coordinates() {
        let world = IVec3::new(-1, -16, -17);
        assert_eq!(chunk_pos(world), IVec3::new(-1, -1, -2));
        assert_eq!(local_pos(world), IVec3::new(15, 0, 15));
        assert_eq!(chunk_origin(chunk_pos(world)) + local_pos(world), world);
    }

    #[test]
    fn test_voxel_at_floors() {
        assert_eq!(voxel_at(Vec3::new(0.5, 20.0, -0.5)), IVec3::new(0, 20, -1));
    }
}
