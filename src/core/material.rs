//! Static material table indexed by material id.
//!
//! The table is built once on first access and never mutated afterwards.
//! Ids that were never defined resolve to an opaque placeholder.

use once_cell::sync::Lazy;

pub const AIR: u8 = 0;
pub const STONE: u8 = 1;
pub const DIRT: u8 = 2;
pub const GRASS: u8 = 3;
pub const SAND: u8 = 4;
pub const WATER: u8 = 5;
pub const WOOD: u8 = 6;
pub const LEAVES: u8 = 7;
pub const SNOW: u8 = 8;
pub const ICE: u8 = 9;
pub const LAMP: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub color: [f32; 3],
    pub is_transparent: bool,
    pub is_liquid: bool,
    pub shininess: f32,
    pub roughness: f32,
    /// Blocklight emitted by a voxel of this material.
    pub emission: u8,
}

impl Material {
    const UNDEFINED: Material = Material {
        name: "undefined",
        color: [1.0, 0.0, 1.0],
        is_transparent: false,
        is_liquid: false,
        shininess: 0.0,
        roughness: 1.0,
        emission: 0,
    };

    const fn solid(name: &'static str, color: [f32; 3], roughness: f32) -> Self {
        Material {
            name,
            color,
            roughness,
            ..Material::UNDEFINED
        }
    }
}

static MATERIALS: Lazy<[Material; 256]> = Lazy::new(|| {
    let mut table = [Material::UNDEFINED; 256];

    table[AIR as usize] = Material {
        name: "air",
        color: [0.0, 0.0, 0.0],
        is_transparent: true,
        ..Material::UNDEFINED
    };
    table[STONE as usize] = Material::solid("stone", [0.55, 0.55, 0.55], 0.9);
    table[DIRT as usize] = Material::solid("dirt", [0.52, 0.37, 0.26], 1.0);
    table[GRASS as usize] = Material::solid("grass", [0.36, 0.7, 0.28], 0.95);
    table[SAND as usize] = Material::solid("sand", [0.89, 0.83, 0.61], 1.0);
    table[WATER as usize] = Material {
        name: "water",
        color: [0.25, 0.46, 0.82],
        is_transparent: true,
        is_liquid: true,
        shininess: 64.0,
        roughness: 0.1,
        emission: 0,
    };
    table[WOOD as usize] = Material::solid("wood", [0.6, 0.4, 0.2], 0.8);
    table[LEAVES as usize] = Material {
        name: "leaves",
        color: [0.3, 0.6, 0.2],
        is_transparent: true,
        ..Material::UNDEFINED
    };
    table[SNOW as usize] = Material::solid("snow", [0.95, 0.95, 0.98], 0.7);
    table[ICE as usize] = Material {
        name: "ice",
        color: [0.7, 0.85, 0.95],
        is_transparent: true,
        shininess: 32.0,
        roughness: 0.2,
        ..Material::UNDEFINED
    };
    table[LAMP as usize] = Material {
        name: "lamp",
        color: [1.0, 0.9, 0.6],
        emission: 15,
        ..Material::UNDEFINED
    };

    table
});

pub fn material(id: u8) -> &'static Material {
    &MATERIALS[id as usize]
}

pub fn is_transparent(id: u8) -> bool {
    material(id).is_transparent
}

pub fn is_liquid(id: u8) -> bool {
    material(id).is_liquid
}

pub fn emission(id: u8) -> u8 {
    material(id).emission
}

pub fn color(id: u8) -> [f32; 3] {
    material(id).color
}

pub fn shininess(id: u8) -> f32 {
    material(id).shininess
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_and_water_are_transparent() {
        assert!(is_transparent(AIR));
        assert!(is_transparent(WATER));
        assert!(is_liquid(WATER));
        assert!(!is_transparent(STONE));
        assert!(!is_liquid(ICE));
    }

    #[test]
    fn test_undefined_ids_are_opaque() {
        let entry = material(200);
        assert_eq!(entry.name, "undefined");
        assert!(!entry.is_transparent);
        assert_eq!(entry.emission, 0);
    }

    #[test]
    fn test_lamp_emits() {
        assert_eq!(emission(LAMP), 15);
        assert_eq!(emission(GRASS), 0);
    }
}
