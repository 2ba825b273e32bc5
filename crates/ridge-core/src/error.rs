//! Error types for Ridgeline

use thiserror::Error;

/// The main error type for Ridgeline operations
#[derive(Debug, Error)]
pub enum RidgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid dimensions: {width}x{depth} ({reason})")]
    InvalidDimensions {
        width: usize,
        depth: usize,
        reason: String,
    },

    #[error("Non-finite height value at cell ({x}, {z})")]
    NonFiniteHeight { x: usize, z: usize },

    #[error("Roughness must be a finite value >= 0, got {0}")]
    InvalidRoughness(f32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Path contains no points: {0}")]
    EmptyPath(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Result type alias for Ridgeline operations
pub type Result<T> = std::result::Result<T, RidgeError>;

impl From<toml::de::Error> for RidgeError {
    fn from(err: toml::de::Error) -> Self {
        RidgeError::TomlParse(err.to_string())
    }
}
