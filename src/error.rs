use thiserror::Error;

/// Errors raised when creating or resizing a drawing surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors that can occur while capturing or restoring a raster snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),
    /// The decode worker went away before reporting a result
    #[error("Snapshot decode was canceled")]
    DecodeCanceled,
}

/// Errors that can occur while loading the editor configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}
