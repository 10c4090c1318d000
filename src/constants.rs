// World constants
pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE as usize;
pub const MAX_LIGHT: u8 = 15;

// Terrain shaping
pub const TERRAIN_SCALE: f32 = 255.0;
pub const MAX_TERRAIN_HEIGHT: i32 = 255;
pub const WATER_LEVEL: i32 = 110;
pub const SNOW_LINE: i32 = 200;
pub const OCEAN_THRESHOLD: f32 = 0.45;
pub const MOUNTAIN_THRESHOLD: f32 = 0.6;
pub const MOUNTAIN_BLEND_BAND: f32 = 0.02;
pub const SOIL_DEPTH: i32 = 3;

// Decoration
pub const TREE_CHANCE: f32 = 0.01;
pub const TREE_TRUNK_HEIGHT: i32 = 5;

// Streaming defaults
pub const DEFAULT_SEED: u32 = 1337;
pub const UPDATE_DISTANCE: i32 = 4;
