//! Configuration parsing errors.
//!
//! Numeric evaluation never fails; only turning external text (JSON configs,
//! CLI names) into typed values can.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid noise config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown dimension `{0}` (expected `2d` or `3d`)")]
    UnknownDimension(String),

    #[error("unknown regime `{0}` (expected `single` or `fractal`)")]
    UnknownRegime(String),
}
