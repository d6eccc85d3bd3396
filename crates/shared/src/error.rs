//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Only the edges of the system fail: loading configuration, reading
/// sources and writing output. Report assembly and pagination are total.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration loaded but is not usable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An input source could not be read.
    #[error("Source error: {0}")]
    Source(String),

    /// The rendered output could not be written.
    #[error("Output error: {0}")]
    Output(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Validation(_) => 78,
            Self::Source(_) => 66,
            Self::Output(_) => 73,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Source(_) => "SOURCE_ERROR",
            Self::Output(_) => "OUTPUT_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
