//! Fractal gradient noise remapped to an approximately uniform distribution.
//!
//! Raw Perlin-style noise is bell-shaped: values near 0 are far more common
//! than values near ±1, which makes thresholds and quantisation behave
//! unevenly. This crate sums octaves of a raw `noise` source and pushes the
//! sum through a fitted polynomial approximation of its CDF, so every bucket
//! of [0, 1] is roughly equally likely.
//!
//! ```
//! use uniform_noise::{NoiseConfig, UniformNoise};
//!
//! let noise = UniformNoise::new(1234).with_octaves(4).with_persistence(0.5);
//! let v = noise.evaluate_2d(0.25, 0.75);
//! assert!((0.0..=1.0).contains(&v));
//! assert_eq!(noise.config(), &NoiseConfig::canonical(1234));
//! ```
//!
//! Lower-level pieces:
//! - [`fractal`]: octave accumulation over any `noise::NoiseFn` source.
//! - [`primitive`]: [`PerlinLite`], the single-octave Perlin the curves were
//!   fitted against and the evaluator's default source.
//! - [`remap`]: the four fitted CDF curves (2D/3D × single/fractal).
//! - [`stats`]: histogram and Kolmogorov–Smirnov checks for uniformity.
pub mod error;
pub mod fractal;
pub mod params;
pub mod primitive;
pub mod remap;
pub mod stats;
pub mod uniform;

pub use error::ConfigError;
pub use fractal::{accumulate_2d, accumulate_3d, LACUNARITY};
pub use params::NoiseConfig;
pub use primitive::PerlinLite;
pub use remap::{remap, CdfCurve, Dimension, Regime};
pub use uniform::{GridSpec, UniformNoise};
