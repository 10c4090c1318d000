use crate::constants::{MOUNTAIN_THRESHOLD, OCEAN_THRESHOLD, SOIL_DEPTH};
use crate::core::material::{DIRT, GRASS, SAND, SNOW, STONE};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Biome {
    Ocean,
    Mountains,
    Rainforest,
    Forest,
    Taiga,
    Desert,
    #[default]
    Plains,
    Snow,
}

impl Biome {
    /// Decision table over normalized height, humidity and temperature.
    pub fn classify(height: f32, humidity: f32, temperature: f32) -> Biome {
        if height < OCEAN_THRESHOLD {
            Biome::Ocean
        } else if height > MOUNTAIN_THRESHOLD {
            Biome::Mountains
        } else {
            Self::lowland(humidity, temperature)
        }
    }

    /// The 3x3 humidity/temperature grid used below the mountain threshold.
    pub fn lowland(humidity: f32, temperature: f32) -> Biome {
        let wet = humidity > 0.5;
        match (wet, temperature) {
            (true, t) if t > 0.66 => Biome::Rainforest,
            (true, t) if t > 0.33 => Biome::Forest,
            (true, _) => Biome::Taiga,
            (false, t) if t > 0.66 => Biome::Desert,
            (false, t) if t > 0.33 => Biome::Plains,
            (false, _) => Biome::Snow,
        }
    }

    /// Material for a voxel `depth` voxels below the column surface.
    pub fn layer_material(&self, depth: i32) -> u8 {
        match self {
            Biome::Ocean if depth <= 1 => SAND,
            Biome::Desert if depth <= SOIL_DEPTH => SAND,
            Biome::Ocean | Biome::Desert | Biome::Mountains => STONE,
            Biome::Snow if depth == 0 => SNOW,
            _ if depth == 0 => GRASS,
            _ if depth <= SOIL_DEPTH => DIRT,
            _ => STONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(Biome::classify(0.3, 0.9, 0.9), Biome::Ocean);
        assert_eq!(Biome::classify(0.7, 0.1, 0.1), Biome::Mountains);
        assert_eq!(Biome::classify(0.5, 0.8, 0.8), Biome::Rainforest);
        assert_eq!(Biome::classify(0.5, 0.8, 0.5), Biome::Forest);
        assert_eq!(Biome::classify(0.5, 0.8, 0.1), Biome::Taiga);
        assert_eq!(Biome::classify(0.5, 0.2, 0.8), Biome::Desert);
        assert_eq!(Biome::classify(0.5, 0.2, 0.5), Biome::Plains);
        assert_eq!(Biome::classify(0.5, 0.2, 0.1), Biome::Snow);
    }

    #[test]
    fn test_layers() {
        assert_eq!(Biome::Plains.layer_material(0), GRASS);
        assert_eq!(Biome::Plains.layer_material(3), DIRT);
        assert_eq!(Biome::Plains.layer_material(4), STONE);
        assert_eq!(Biome::Desert.layer_material(2), SAND);
        assert_eq!(Biome::Ocean.layer_material(1), SAND);
        assert_eq!(Biome::Ocean.layer_material(2), STONE);
        assert_eq!(Biome::Snow.layer_material(0), SNOW);
        assert_eq!(Biome::Mountains.layer_material(0), STONE);
    }
}
