use thiserror::Error;

/// Errors that can occur while loading or saving a [`crate::SurfaceConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while writing a drawing to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: surface is {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    #[error("Failed to write drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode drawing: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
