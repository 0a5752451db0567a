//! Error types for every fallible boundary of the generator.

use thiserror::Error;

/// Invalid generation parameters, rejected before any grid is allocated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("map size {width}x{height} is too small, both sides must be at least {min}")]
    InvalidDimensions { width: usize, height: usize, min: usize },
    #[error("wall probability {0} must be between 0.0 and 1.0")]
    InvalidWallProbability(f32),
    #[error("smoothing threshold {0} must be at most 9")]
    InvalidThreshold(u8),
    #[error("tile size {actual} is too small, must be at least {min}")]
    InvalidTileSize { actual: u32, min: u32 },
    #[error("failed to read config {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Failures while running the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not enough memory for {capacity} visit stack entries")]
    OutOfMemory { capacity: usize },
}

/// Failures while loading a tile atlas.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("unexpected tile image size: expected {expected:?}, got {actual:?}")]
    DimensionMismatch { expected: (u32, u32), actual: (u32, u32) },
    #[error("error reading {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Precondition violations while compositing tiles.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("tile index {index:#04x} at ({x}, {y}) is outside the atlas ({tiles} tiles)")]
    TileOutOfRange { index: u8, x: usize, y: usize, tiles: u32 },
}

/// Failures while writing generated files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("not writing output to stdout because it's a tty")]
    TerminalStdout,
    #[error("error writing {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error encoding {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
