use crate::constants::MAX_LIGHT;
use crate::core::material::{self, Material};

/// Which of the two light nibbles an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Sky,
    Block,
}

impl LightChannel {
    pub const ALL: [LightChannel; 2] = [LightChannel::Sky, LightChannel::Block];
}

/// Packed voxel: material id plus skylight (low nibble) and blocklight (high nibble).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub material_id: u8,
    pub light: u8,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        material_id: material::AIR,
        light: 0,
    };

    pub const fn new(material_id: u8) -> Self {
        Voxel {
            material_id,
            light: 0,
        }
    }

    pub fn with_light(material_id: u8, sky: u8, block: u8) -> Self {
        let mut voxel = Voxel::new(material_id);
        voxel.set_sky_light(sky);
        voxel.set_block_light(block);
        voxel
    }

    pub fn material(&self) -> &'static Material {
        material::material(self.material_id)
    }

    pub fn is_air(&self) -> bool {
        self.material_id == material::AIR
    }

    pub fn is_solid(&self) -> bool {
        !self.is_air()
    }

    pub fn is_transparent(&self) -> bool {
        self.material().is_transparent
    }

    pub fn is_opaque(&self) -> bool {
        !self.is_transparent()
    }

    pub fn is_liquid(&self) -> bool {
        self.material().is_liquid
    }

    pub fn sky_light(&self) -> u8 {
        self.light & 0x0F
    }

    pub fn block_light(&self) -> u8 {
        self.light >> 4
    }

    pub fn set_sky_light(&mut self, level: u8) {
        self.light = (self.light & 0xF0) | level.min(MAX_LIGHT);
    }

    pub fn set_block_light(&mut self, level: u8) {
        self.light = (self.light & 0x0F) | (level.min(MAX_LIGHT) << 4);
    }

    pub fn light_level(&self, channel: LightChannel) -> u8 {
        match channel {
            LightChannel::Sky => self.sky_light(),
            LightChannel::Block => self.block_light(),
        }
    }

    pub fn set_light_level(&mut self, channel: LightChannel, level: u8) {
        match channel {
            LightChannel::Sky => self.set_sky_light(level),
            LightChannel::Block => self.set_block_light(level),
        }
    }
}
