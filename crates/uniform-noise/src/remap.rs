//! Polynomial CDF remapping of raw gradient noise onto [0, 1].
//!
//! Raw (fractal) gradient noise is bell-shaped around 0. Each curve below is a
//! quintic least-squares fit of the empirical CDF of that raw value, so
//! `curve.apply(raw)` is approximately uniform on [0, 1]. Inputs outside a
//! curve's fitted domain clamp to 0 or 1 before the polynomial is touched.
//!
//! The fractal curves were fitted against 4 octaves at persistence 0.5.
//! Other fractal settings still map into [0, 1] but drift away from uniform.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::NoiseConfig;

/// Dimensionality of the noise the raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Two,
    Three,
}

/// Accumulation scheme the raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// One octave of the raw primitive.
    SingleOctave,
    /// Fractal sum, fitted at 4 octaves / persistence 0.5.
    CanonicalFractal,
}

impl Regime {
    /// Best-fitting regime for `config`: single octave when exactly one layer
    /// is summed, the fractal fit otherwise.
    pub fn for_config(config: &NoiseConfig) -> Self {
        if config.octaves == 1 {
            Regime::SingleOctave
        } else {
            Regime::CanonicalFractal
        }
    }
}

/// One fitted CDF approximation: quintic coefficients plus its open clamp domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdfCurve {
    /// Coefficients from x⁵ down to x⁰.
    pub coefficients: [f64; 6],
    /// Raw values strictly below this map to 0.
    pub lower: f64,
    /// Raw values strictly above this map to 1.
    pub upper: f64,
}

pub const SINGLE_OCTAVE_2D: CdfCurve = CdfCurve {
    coefficients: [1.0616674, -0.04779669, -1.5704816, 0.023737413, 1.2176103, 0.49882874],
    lower: -0.729,
    upper: 0.751,
};

pub const SINGLE_OCTAVE_3D: CdfCurve = CdfCurve {
    coefficients: [2.0015578, 0.0028363844, -2.4018942, -0.00099932467, 1.4237269, 0.50005216],
    lower: -0.662,
    upper: 0.66,
};

/// Fitted on [-0.9, 0.9].
pub const FRACTAL_2D: CdfCurve = CdfCurve {
    coefficients: [0.55801775, 0.0034876526, -1.102035, -0.0021366362, 1.083566, 0.50009794],
    lower: -0.897,
    upper: 0.891,
};

/// Fitted on [-0.8, 0.8].
pub const FRACTAL_3D: CdfCurve = CdfCurve {
    coefficients: [0.98832232, 0.0021932919, -1.6058296, -0.0013540642, 1.2490637, 0.50019288],
    lower: -0.796,
    upper: 0.793,
};

impl CdfCurve {
    /// Curve fitted for `(dimension, regime)`.
    pub fn select(dimension: Dimension, regime: Regime) -> &'static CdfCurve {
        match (dimension, regime) {
            (Dimension::Two,   Regime::SingleOctave)     => &SINGLE_OCTAVE_2D,
            (Dimension::Three, Regime::SingleOctave)     => &SINGLE_OCTAVE_3D,
            (Dimension::Two,   Regime::CanonicalFractal) => &FRACTAL_2D,
            (Dimension::Three, Regime::CanonicalFractal) => &FRACTAL_3D,
        }
    }

    /// `(lower, upper)` clamp bounds; both bounds themselves use the polynomial.
    pub fn domain(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Map a raw noise value to approximately uniform [0, 1].
    ///
    /// NaN fails both clamp comparisons and comes back out as NaN.
    #[inline]
    pub fn apply(&self, raw: f64) -> f64 {
        if raw < self.lower {
            return 0.0;
        }
        if raw > self.upper {
            return 1.0;
        }
        horner(&self.coefficients, raw)
    }
}

/// Evaluate a polynomial with coefficients ordered highest degree first.
#[inline]
fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Remap `raw` through the curve fitted for `(dimension, regime)`.
#[inline]
pub fn remap(raw: f64, dimension: Dimension, regime: Regime) -> f64 {
    CdfCurve::select(dimension, regime).apply(raw)
}

// ── Name parsing (CLI / config files) ─────────────────────────────────────────

impl FromStr for Dimension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "2" | "2d" | "two" => Ok(Dimension::Two),
            "3" | "3d" | "three" => Ok(Dimension::Three),
            _ => Err(ConfigError::UnknownDimension(s.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Two => "2d",
            Dimension::Three => "3d",
        })
    }
}

impl FromStr for Regime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" | "single-octave" => Ok(Regime::SingleOctave),
            "fractal" | "canonical" | "canonical-fractal" => Ok(Regime::CanonicalFractal),
            _ => Err(ConfigError::UnknownRegime(s.to_string())),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Regime::SingleOctave => "single",
            Regime::CanonicalFractal => "fractal",
        })
    }
}
