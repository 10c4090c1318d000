//! Thread-safe terrain generation
//!
//! Column data (height, climate, biome) is computed once per footprint and
//! shared by every chunk stacked on it. Chunk generation only reads that
//! data plus a seeded position hash, so it can run on any worker thread.

use glam::{IVec3, Vec2};

use crate::constants::*;
use crate::core::biome::Biome;
use crate::core::chunk::Chunk;
use crate::core::column::{ChunkColumn, ColumnData};
use crate::core::material::{SNOW, STONE, WATER};
use crate::core::voxel::Voxel;
use crate::world::noise::{NoiseSource, SimplexNoise};

const SALT_BIOME_BLEND: u32 = 0;
pub const SALT_TREE: u32 = 1;

pub struct ChunkGenerator {
    noise: Box<dyn NoiseSource>,
    pub seed: u32,
    pub water_level: i32,
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl ChunkGenerator {
    pub fn new(seed: u32, water_level: i32) -> Self {
        Self::with_noise(SimplexNoise::new(seed), seed, water_level)
    }

    pub fn with_noise(noise: impl NoiseSource + 'static, seed: u32, water_level: i32) -> Self {
        ChunkGenerator {
            noise: Box::new(noise),
            seed,
            water_level,
        }
    }

    /// Terrain description of a single world (x, z) position.
    pub fn sample_column(&self, world_x: i32, world_z: i32) -> ColumnData {
        let (x, z) = (world_x as f32, world_z as f32);

        let base = 0.5 + 0.2 * self.noise.octave_noise(x, z, 5, 0.5, 0.002, Vec2::ZERO);
        let humidity = (0.5
            + 0.5 * self.noise.octave_noise(x, z, 3, 0.5, 0.002, Vec2::new(1000.0, 1000.0)))
        .clamp(0.0, 1.0);
        let temperature = (0.5
            + 0.5
                * self
                    .noise
                    .octave_noise(x, z, 3, 0.5, 0.0015, Vec2::new(-1000.0, -1000.0)))
        .clamp(0.0, 1.0);

        // Mountain overlay fades in around the threshold to avoid a hard seam
        let mountain = (0.3
            * self
                .noise
                .octave_noise(x, z, 3, 0.5, 0.005, Vec2::new(-1000.0, 1000.0)))
        .max(0.0);
        let mountain_blend = smoothstep(
            MOUNTAIN_THRESHOLD - MOUNTAIN_BLEND_BAND,
            MOUNTAIN_THRESHOLD + MOUNTAIN_BLEND_BAND,
            base,
        );
        let height = (base + mountain * mountain_blend).clamp(0.0, 1.0);

        ColumnData {
            biome: Biome::classify(height, humidity, temperature),
            world_height: ((height * TERRAIN_SCALE) as i32).clamp(0, MAX_TERRAIN_HEIGHT),
            height,
            humidity,
            temperature,
            mountain_blend,
        }
    }

    /// Fills the column's terrain data if no other task has done so yet.
    pub fn generate_chunk_column<'a>(&self, column: &'a ChunkColumn) -> &'a [ColumnData] {
        column.get_or_init(|| {
            let origin = column.position * CHUNK_SIZE;
            let mut data = Vec::with_capacity(CHUNK_AREA);
            for lz in 0..CHUNK_SIZE {
                for lx in 0..CHUNK_SIZE {
                    data.push(self.sample_column(origin.x + lx, origin.y + lz));
                }
            }
            data.into_boxed_slice()
        })
    }

    pub fn position_hash(&self, x: i32, y: i32, z: i32) -> u32 {
        let mut hash = self.seed;
        hash = hash.wrapping_add(x as u32).wrapping_mul(73856093);
        hash = hash.wrapping_add(y as u32).wrapping_mul(19349663);
        hash = hash.wrapping_add(z as u32).wrapping_mul(83492791);
        hash ^ (hash >> 16)
    }

    /// Uniform draw in [0, 1) keyed on a world position. Distinct salts give
    /// independent draws at the same position.
    pub fn uniform(&self, pos: IVec3, salt: u32) -> f32 {
        let mut hash = self.position_hash(pos.x, pos.y, pos.z) ^ salt.wrapping_mul(0x9E37_79B9);
        hash = hash.wrapping_mul(0x85EB_CA6B);
        hash ^= hash >> 13;
        (hash & 0xFFFF) as f32 / 65536.0
    }

    /// Material for a terrain voxel, `None` for air.
    pub fn voxel_material(&self, data: &ColumnData, pos: IVec3) -> Option<u8> {
        let surface = data.world_height;
        if pos.y > surface {
            return (pos.y < self.water_level).then_some(WATER);
        }

        let depth = surface - pos.y;
        let biome = if data.in_transition_band() {
            // Noisy boundary between the lowland biome and bare mountain rock
            if self.uniform(pos, SALT_BIOME_BLEND) < data.mountain_blend {
                Biome::Mountains
            } else {
                Biome::lowland(data.humidity, data.temperature)
            }
        } else {
            data.biome
        };

        if biome == Biome::Mountains {
            if depth == 0 && pos.y >= SNOW_LINE {
                return Some(SNOW);
            }
            return Some(STONE);
        }
        Some(biome.layer_material(depth))
    }

    /// Fills a chunk from its column data and seeds its skylight.
    pub fn generate_chunk(&self, chunk: &mut Chunk, column: &ChunkColumn) {
        let data = self.generate_chunk_column(column);
        let origin = chunk.world_position;

        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let column_data = &data[(lx + lz * CHUNK_SIZE) as usize];
                let top = column_data.world_height.max(self.water_level - 1);

                for ly in 0..CHUNK_SIZE {
                    let pos = origin + IVec3::new(lx, ly, lz);
                    if pos.y > top {
                        break;
                    }
                    let Some(material_id) = self.voxel_material(column_data, pos) else {
                        continue;
                    };

                    let mut voxel = Voxel::new(material_id);
                    if material_id == WATER {
                        // One level lost per voxel of water above
                        let depth = (self.water_level - 1 - pos.y).clamp(0, MAX_LIGHT as i32) as u8;
                        voxel.set_sky_light((MAX_LIGHT - 1).saturating_sub(depth));
                    }
                    chunk.add_voxel(IVec3::new(lx, ly, lz), voxel);
                }
            }
        }

        chunk.fill_open_sky();
    }
}
