use bytemuck::{Pod, Zeroable};

const OFFSET_LIGHT: u32 = 0;
const OFFSET_AO: u32 = 8;
const OFFSET_NORMAL: u32 = 10;
const OFFSET_MATERIAL: u32 = 13;

/// Mesh vertex: chunk-local position plus a packed data word.
///
/// Data layout: bits 0-7 light (sky low nibble, block high nibble),
/// bits 8-9 ambient occlusion, bits 10-12 face normal index,
/// bits 13-20 material id.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub data: u32,
}

impl Vertex {
    pub fn new(position: [f32; 3], light: u8, ao: u8, normal: u8, material_id: u8) -> Self {
        let data = (light as u32) << OFFSET_LIGHT
            | ((ao as u32) & 0b11) << OFFSET_AO
            | ((normal as u32) & 0b111) << OFFSET_NORMAL
            | (material_id as u32) << OFFSET_MATERIAL;
        Vertex { position, data }
    }

    pub fn light(&self) -> u8 {
        (self.data >> OFFSET_LIGHT) as u8
    }

    pub fn sky_light(&self) -> u8 {
        self.light() & 0x0F
    }

    pub fn block_light(&self) -> u8 {
        self.light() >> 4
    }

    pub fn ao(&self) -> u8 {
        ((self.data >> OFFSET_AO) & 0b11) as u8
    }

    pub fn normal_index(&self) -> u8 {
        ((self.data >> OFFSET_NORMAL) & 0b111) as u8
    }

    pub fn material_id(&self) -> u8 {
        (self.data >> OFFSET_MATERIAL) as u8
    }
}
