//! Default raw gradient-noise source.
//!
//! The CDF curves in [`crate::remap`] were fitted against FastNoiseLite's
//! single-octave Perlin sampled at frequency 1, with no fractal layering and
//! no 3D domain rotation. `PerlinLite` exposes exactly that primitive through
//! the `noise` crate's `NoiseFn`/`Seedable` traits so it plugs into
//! [`crate::fractal`] like any other source.
//!
//! Other `noise` sources (e.g. `noise::Perlin`) use different gradient sets
//! and output scaling; their sums fall outside the fitted domains and do not
//! come out uniform.
use std::fmt;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use noise::{NoiseFn, Seedable};

pub struct PerlinLite {
    seed: i32,
    noise: FastNoiseLite,
}

impl PerlinLite {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        Self { seed, noise }
    }

    pub fn signed_seed(&self) -> i32 {
        self.seed
    }
}

impl Default for PerlinLite {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for PerlinLite {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl fmt::Debug for PerlinLite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerlinLite").field("seed", &self.seed).finish()
    }
}

impl Seedable for PerlinLite {
    /// `seed` is the bit pattern of the signed seed (see [`crate::fractal::seeded_source`]).
    fn set_seed(self, seed: u32) -> Self {
        if self.seed as u32 == seed {
            return self;
        }
        Self::new(seed as i32)
    }

    fn seed(&self) -> u32 {
        self.seed as u32
    }
}

impl NoiseFn<f64, 2> for PerlinLite {
    #[inline]
    fn get(&self, [x, y]: [f64; 2]) -> f64 {
        self.noise.get_noise_2d(x, y) as f64
    }
}

impl NoiseFn<f64, 3> for PerlinLite {
    #[inline]
    fn get(&self, [x, y, z]: [f64; 3]) -> f64 {
        self.noise.get_noise_3d(x, y, z) as f64
    }
}
