//! Error types for the refimage loader.
//!
//! Errors are organized by concern so the host can tell a bad configuration
//! from a bad file on disk. Failures here are fatal by contract: one
//! unreadable image aborts the run, and an unknown settings revision aborts
//! pipeline loading. The only lenient case is metadata substitution, which
//! never errors at all.

use std::path::PathBuf;
use thiserror::Error;

use crate::migrate::SettingsOrigin;

/// Top-level error type for refimage operations.
#[derive(Error, Debug)]
pub enum RefimageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image loading and registry errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Settings migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A serialized folder-choice label is not one of the known labels
    #[error("Unknown folder choice: {0:?}")]
    UnknownFolderChoice(String),

    /// A flat setting-value sequence has the wrong shape
    #[error("Malformed setting values: {0}")]
    MalformedSettings(String),
}

/// Errors raised while loading images or writing run measurements.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The configured file does not exist under the resolved directory
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The file could not be read
    #[error("Read error for {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The file could not be decoded as an image
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A provider with this logical name is already registered
    #[error("An image named {0:?} is already registered")]
    DuplicateImageName(String),

    /// No provider with this logical name is registered
    #[error("No image named {0:?} is registered")]
    UnknownImageName(String),

    /// The measurement was already recorded this run
    #[error("Measurement {feature:?} for entity {entity:?} has already been recorded")]
    MeasurementExists { entity: String, feature: String },
}

/// Settings migration errors, surfaced to the host's settings loader.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// No migration path exists from this revision
    #[error("Unsupported settings revision {revision} (origin: {origin})")]
    UnsupportedRevision {
        revision: u32,
        origin: SettingsOrigin,
    },

    /// The value sequence is too short to carry a valid configuration
    #[error("Setting values too short: expected at least {expected}, got {actual}")]
    TooFewValues { expected: usize, actual: usize },
}

/// Convenience type alias for refimage results.
pub type Result<T> = std::result::Result<T, RefimageError>;
