use glam::IVec3;

use crate::constants::*;
use crate::core::coords;
use crate::core::voxel::{LightChannel, Voxel};

/// Height-map value for a column with no solid voxel inside the chunk.
pub const NO_HEIGHT: i32 = i32::MIN;

/// Cubic block of `CHUNK_SIZE³` voxels with a per-column height cache.
pub struct Chunk {
    /// World voxel at the chunk's lattice origin.
    pub world_position: IVec3,
    voxels: Box<[Voxel]>,
    height_map: Box<[i32]>,
    solid_count: u32,
}

impl Chunk {
    pub fn new(chunk_pos: IVec3) -> Self {
        Chunk {
            world_position: coords::chunk_origin(chunk_pos),
            voxels: vec![Voxel::AIR; CHUNK_VOLUME].into_boxed_slice(),
            height_map: vec![NO_HEIGHT; CHUNK_AREA].into_boxed_slice(),
            solid_count: 0,
        }
    }

    pub fn chunk_position(&self) -> IVec3 {
        coords::chunk_pos(self.world_position)
    }

    fn index(local: IVec3) -> Option<usize> {
        let in_bounds = (0..CHUNK_SIZE).contains(&local.x)
            && (0..CHUNK_SIZE).contains(&local.y)
            && (0..CHUNK_SIZE).contains(&local.z);
        in_bounds.then(|| {
            (local.x + local.y * CHUNK_SIZE + local.z * CHUNK_SIZE * CHUNK_SIZE) as usize
        })
    }

    fn column_index(x: i32, z: i32) -> Option<usize> {
        ((0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&z))
            .then(|| (x + z * CHUNK_SIZE) as usize)
    }

    fn local_from_index(index: usize) -> IVec3 {
        let i = index as i32;
        IVec3::new(
            i % CHUNK_SIZE,
            (i / CHUNK_SIZE) % CHUNK_SIZE,
            i / (CHUNK_SIZE * CHUNK_SIZE),
        )
    }

    pub fn get_voxel(&self, local: IVec3) -> Option<Voxel> {
        Self::index(local).map(|i| self.voxels[i])
    }

    /// Places a voxel into an air cell. Fails without mutation if the cell is solid.
    pub fn add_voxel(&mut self, local: IVec3, voxel: Voxel) -> bool {
        let Some(i) = Self::index(local) else {
            return false;
        };
        if self.voxels[i].is_solid() {
            return false;
        }

        self.voxels[i] = voxel;
        if voxel.is_solid() {
            self.solid_count += 1;
            let world_y = self.world_position.y + local.y;
            if let Some(c) = Self::column_index(local.x, local.z) {
                if world_y > self.height_map[c] {
                    self.height_map[c] = world_y;
                }
            }
        }
        true
    }

    /// Clears a solid cell to air. Fails if the cell is already air.
    pub fn remove_voxel(&mut self, local: IVec3) -> bool {
        let Some(i) = Self::index(local) else {
            return false;
        };
        if self.voxels[i].is_air() {
            return false;
        }

        self.voxels[i] = Voxel::AIR;
        self.solid_count -= 1;
        if self.height_at(local.x, local.z) == Some(self.world_position.y + local.y) {
            self.update_height_at(local.x, local.z);
        }
        true
    }

    /// Rescans a column from the top of the chunk down to find its highest solid voxel.
    pub fn update_height_at(&mut self, x: i32, z: i32) {
        let Some(c) = Self::column_index(x, z) else {
            return;
        };
        self.height_map[c] = (0..CHUNK_SIZE)
            .rev()
            .find(|&y| self.position_is_solid(IVec3::new(x, y, z)))
            .map_or(NO_HEIGHT, |y| self.world_position.y + y);
    }

    /// World Y of the highest solid voxel in a column, `None` for an empty column
    /// or a position outside the chunk.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        Self::column_index(x, z)
            .map(|c| self.height_map[c])
            .filter(|&h| h != NO_HEIGHT)
    }

    pub fn position_is_solid(&self, local: IVec3) -> bool {
        self.get_voxel(local).is_some_and(|v| v.is_solid())
    }

    pub fn position_is_transparent(&self, local: IVec3) -> bool {
        self.get_voxel(local).is_some_and(|v| v.is_transparent())
    }

    pub fn set_light(&mut self, local: IVec3, channel: LightChannel, level: u8) -> bool {
        let Some(i) = Self::index(local) else {
            return false;
        };
        self.voxels[i].set_light_level(channel, level);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    pub fn is_edge(local: IVec3) -> bool {
        local.min_element() == 0 || local.max_element() == CHUNK_SIZE - 1
    }

    /// Lazily yields every `(local_position, voxel)` pair in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Voxel)> + '_ {
        self.voxels
            .iter()
            .enumerate()
            .map(|(i, voxel)| (Self::local_from_index(i), *voxel))
    }

    pub fn iter_solid(&self) -> impl Iterator<Item = (IVec3, Voxel)> + '_ {
        self.iter().filter(|(_, voxel)| voxel.is_solid())
    }

    /// Gives full skylight to every transparent voxel above the chunk's height entry.
    pub fn fill_open_sky(&mut self) {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let floor = self
                    .height_at(x, z)
                    .map_or(0, |h| h - self.world_position.y + 1);
                for y in floor..CHUNK_SIZE {
                    if let Some(i) = Self::index(IVec3::new(x, y, z)) {
                        if self.voxels[i].is_transparent() {
                            self.voxels[i].set_sky_light(MAX_LIGHT);
                        }
                    }
                }
            }
        }
    }
}
