use thiserror::Error;

// === ShellError ===

/// Errors raised by the tab multiplexer and its surfaces.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The platform could not allocate a content or control surface.
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),
    /// The host window has already been shut down.
    #[error("Host window is closed")]
    Closed,
}

// === ConfigError ===

/// Errors related to loading, saving, and editing shell options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the options file.
    #[error("Config I/O error: {0}")]
    Io(String),
    /// Failed to serialize or deserialize options.
    #[error("Config serialization error: {0}")]
    Serialization(String),
    /// The provided options key is invalid.
    #[error("Invalid config key: {0}")]
    InvalidKey(String),
    /// The provided options value is invalid.
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
