//! Error types and Result aliases for poshterm

use std::fmt;
use std::path::PathBuf;

/// Result type alias for poshterm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for poshterm
///
/// Rendering and decoding never produce errors; these variants cover the
/// edges of the crate where files are read and themes are accepted.
#[derive(Debug)]
pub enum Error {
    // === Theme errors ===
    /// Theme JSON was rejected
    ThemeLoad(ThemeLoadError),

    /// Failed to read a theme file
    ThemeReadFailed {
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    // === I/O errors ===
    /// I/O errors
    Io(std::io::Error),
}

/// Reasons a theme can be rejected by [`crate::PromptEngine::try_load_theme`]
#[derive(Debug, thiserror::Error)]
pub enum ThemeLoadError {
    #[error("malformed theme JSON: {0}")]
    MalformedJson(String),

    #[error("theme must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid theme structure: {0}")]
    InvalidShape(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Theme errors
            Error::ThemeLoad(err) => write!(f, "Failed to load theme: {}", err),
            Error::ThemeReadFailed { path, reason } => {
                write!(f, "Failed to read theme '{}': {}", path.display(), reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }

            // I/O errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ThemeLoad(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ThemeLoadError> for Error {
    fn from(err: ThemeLoadError) -> Self {
        Error::ThemeLoad(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
