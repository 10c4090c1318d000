//! Noise sources for terrain shaping
//!
//! The generator only depends on [`NoiseSource`]; [`SimplexNoise`] is the
//! default implementation backed by FastNoiseLite.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use glam::Vec2;

/// Deterministic coherent noise with values in [-1, 1].
pub trait NoiseSource: Send + Sync {
    fn sample2(&self, x: f32, z: f32) -> f32;

    fn sample3(&self, x: f32, y: f32, z: f32) -> f32;

    /// Normalized sum of `octaves` layers, each at double the frequency and
    /// `persistence` times the amplitude of the previous one.
    fn octave_noise(
        &self,
        x: f32,
        z: f32,
        octaves: u32,
        persistence: f32,
        scale: f32,
        offset: Vec2,
    ) -> f32 {
        let mut total = 0.0;
        let mut frequency = scale;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.sample2((x + offset.x) * frequency, (z + offset.y) * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value > 0.0 {
            (total / max_value).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

pub struct SimplexNoise {
    noise: FastNoiseLite,
}

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // Callers scale coordinates themselves
        noise.set_frequency(Some(1.0));
        SimplexNoise { noise }
    }
}

impl NoiseSource for SimplexNoise {
    fn sample2(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z)
    }

    fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise.get_noise_3d(x, y, z)
    }
}
