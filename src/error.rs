// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the classification library.

use std::fmt;

/// Result type alias for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Main error type for the classification library.
///
/// Data-shape conditions (no detection, missing keypoints, degenerate
/// geometry) are NOT errors; they are [`crate::Classification`] values.
/// This type covers the plumbing around the core: file I/O, JSON parsing,
/// and image handling.
#[derive(Debug)]
pub enum ClassifierError {
    /// Error reading or interpreting a landmark file.
    LandmarkError(String),
    /// Error parsing landmark JSON.
    JsonError(String),
    /// Error loading or saving images.
    ImageError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Invalid configuration provided.
    ConfigError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandmarkError(msg) => write!(f, "Landmark error: {msg}"),
            Self::JsonError(msg) => write!(f, "JSON error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for ClassifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}
