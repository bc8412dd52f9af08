//! Serializable fractal parameters and the canonical fitted regime.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::uniform::UniformNoise;

/// Octave count the fractal CDF curves were fitted against.
pub const CANONICAL_OCTAVES: u32 = 4;
/// Persistence the fractal CDF curves were fitted against.
pub const CANONICAL_PERSISTENCE: f64 = 0.5;

/// Fractal accumulation parameters for one evaluation.
///
/// Nothing here is validated: a persistence outside (0, 1] simply pushes the
/// raw sum outside the fitted domain, where the remap clamps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Forwarded verbatim to the raw noise source.
    pub seed: i32,
    /// Number of layers summed. 0 gives a raw value of exactly 0.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
}

impl NoiseConfig {
    /// 4 octaves at persistence 0.5, the regime the fractal curves match exactly.
    pub fn canonical(seed: i32) -> Self {
        Self { seed, octaves: CANONICAL_OCTAVES, persistence: CANONICAL_PERSISTENCE }
    }

    pub fn with_seed(self, seed: i32) -> Self {
        Self { seed, ..self }
    }

    pub fn with_octaves(self, octaves: u32) -> Self {
        Self { octaves, ..self }
    }

    pub fn with_persistence(self, persistence: f64) -> Self {
        Self { persistence, ..self }
    }

    /// True when the fractal CDF curves were fitted for exactly these parameters.
    pub fn is_canonical(&self) -> bool {
        self.octaves == CANONICAL_OCTAVES && self.persistence == CANONICAL_PERSISTENCE
    }

    /// Parse a config from JSON. Missing fields take their `Default` values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build an evaluator over the default [`crate::PerlinLite`] source.
    pub fn evaluator(self) -> UniformNoise {
        UniformNoise::from_config(self)
    }
}
