//! Error types for the simulation core

use thiserror::Error;

/// Errors surfaced by simulation and camera configuration
#[derive(Debug, Error)]
pub enum GameError {
    /// Animation sequence name not found in the entity's sequence table
    #[error("animation sequence `{0}` is not defined")]
    UnknownSequence(String),

    /// Asteroid size outside the supported tiers
    #[error("asteroid size {size} outside supported tiers 0..={max}")]
    InvalidSize { size: u8, max: u8 },

    /// Weapon identifier not recognized
    #[error("unsupported weapon type `{0}`")]
    UnsupportedWeapon(String),

    /// Camera update policy identifier not recognized
    #[error("unsupported camera update policy `{0}`")]
    UnsupportedPolicy(String),

    /// Camera deceleration distance must be positive
    #[error("camera deceleration distance must be positive, got {0}")]
    InvalidDecelDistance(f32),

    /// Tuning config could not be parsed
    #[error("invalid tuning config: {0}")]
    InvalidTuning(#[from] serde_json::Error),
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, GameError>;
