//! Seeded evaluator producing approximately uniform fractal noise.
//!
//! `UniformNoise` owns a [`NoiseConfig`] and the raw source seeded from it.
//! Every evaluation accumulates octaves (see [`crate::fractal`]) and remaps
//! the sum through the canonical-fractal curve; the single-octave curves are
//! never used here.
//!
//! Setters take `&mut self`, so configuration changes can never overlap an
//! evaluation. A shared `&UniformNoise` is `Sync` and can be sampled from many
//! threads at once.
use noise::{NoiseFn, Seedable};
use serde::{Deserialize, Serialize};

use crate::fractal::{accumulate_2d, accumulate_3d, seeded_source};
use crate::params::NoiseConfig;
use crate::primitive::PerlinLite;
use crate::remap::{FRACTAL_2D, FRACTAL_3D};

/// Regular sampling lattice in noise space, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
    /// Noise-space coordinate of cell (row 0, col 0).
    pub origin: [f64; 2],
    /// Noise-space distance between neighbouring cells.
    pub step: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { width: 256, height: 256, origin: [0.0, 0.0], step: 1.0 / 64.0 }
    }
}

impl GridSpec {
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> [f64; 2] {
        [
            self.origin[0] + col as f64 * self.step,
            self.origin[1] + row as f64 * self.step,
        ]
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct UniformNoise<S = PerlinLite> {
    config: NoiseConfig,
    source: S,
}

impl UniformNoise<PerlinLite> {
    /// Evaluator over [`PerlinLite`] with `octaves = 0` and `persistence = 0`.
    ///
    /// Until octaves are configured every evaluation returns the curve's
    /// baseline at 0 (≈ 0.5).
    pub fn new(seed: i32) -> Self {
        Self::from_config(NoiseConfig::default().with_seed(seed))
    }
}

impl<S: Seedable + Default> UniformNoise<S> {
    pub fn from_config(config: NoiseConfig) -> Self {
        Self { config, source: seeded_source(config.seed) }
    }

    /// Reseed the raw source. Takes effect on the next evaluation.
    pub fn set_seed(&mut self, seed: i32) {
        self.config.seed = seed;
        self.source = seeded_source(seed);
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.set_seed(seed);
        self
    }
}

impl<S> UniformNoise<S> {
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn set_octaves(&mut self, octaves: u32) {
        self.config.octaves = octaves;
    }

    pub fn set_persistence(&mut self, persistence: f64) {
        self.config.persistence = persistence;
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.set_octaves(octaves);
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.set_persistence(persistence);
        self
    }
}

impl<S: NoiseFn<f64, 2>> UniformNoise<S> {
    /// Fractal sum at `(x, y)` before remapping.
    #[inline]
    pub fn raw_2d(&self, x: f64, y: f64) -> f64 {
        accumulate_2d(&self.source, [x, y], self.config.octaves, self.config.persistence)
    }

    /// Approximately uniform noise in [0, 1] at `(x, y)`. NaN in, NaN out.
    #[inline]
    pub fn evaluate_2d(&self, x: f64, y: f64) -> f64 {
        FRACTAL_2D.apply(self.raw_2d(x, y))
    }
}

impl<S: NoiseFn<f64, 3>> UniformNoise<S> {
    /// Fractal sum at `(x, y, z)` before remapping.
    #[inline]
    pub fn raw_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        accumulate_3d(&self.source, [x, y, z], self.config.octaves, self.config.persistence)
    }

    /// Approximately uniform noise in [0, 1] at `(x, y, z)`. NaN in, NaN out.
    #[inline]
    pub fn evaluate_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        FRACTAL_3D.apply(self.raw_3d(x, y, z))
    }

    /// Uniform noise over `grid` on the plane at height `z`.
    pub fn sample_grid_3d(&self, grid: &GridSpec, z: f64) -> Vec<f64>
    where
        S: Sync,
    {
        fill_grid(grid, |[x, y]| self.evaluate_3d(x, y, z))
    }
}

impl<S: NoiseFn<f64, 2> + Sync> UniformNoise<S> {
    /// Uniform noise over `grid`, row-major.
    pub fn sample_grid_2d(&self, grid: &GridSpec) -> Vec<f64> {
        fill_grid(grid, |[x, y]| self.evaluate_2d(x, y))
    }

    /// Raw fractal sums over `grid`, row-major.
    pub fn sample_raw_grid_2d(&self, grid: &GridSpec) -> Vec<f64> {
        fill_grid(grid, |[x, y]| self.raw_2d(x, y))
    }
}

/// Evaluate `f` at every grid point. Rows run in parallel with `threading`.
fn fill_grid<F>(grid: &GridSpec, f: F) -> Vec<f64>
where
    F: Fn([f64; 2]) -> f64 + Sync,
{
    let mut out = vec![0.0f64; grid.len()];
    if grid.is_empty() {
        return out;
    }
    let fill_row = |(r, row): (usize, &mut [f64])| {
        for (c, v) in row.iter_mut().enumerate() {
            *v = f(grid.point(r, c));
        }
    };

    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(grid.width).enumerate().for_each(fill_row);
    }
    #[cfg(not(feature = "threading"))]
    out.chunks_mut(grid.width).enumerate().for_each(fill_row);

    out
}
