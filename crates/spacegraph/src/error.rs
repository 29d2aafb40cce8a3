//! Application-wide error types using thiserror.

use spacegraph_common::SpaceGraphError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[source] SpaceGraphError),

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[source] SpaceGraphError),

    /// A chart or the APOD report could not be written.
    #[error("Rendering error: {0}")]
    Render(#[source] SpaceGraphError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
