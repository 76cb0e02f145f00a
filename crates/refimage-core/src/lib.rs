//! Refimage Core - reference-image loading for analysis pipelines.
//!
//! A host pipeline engine configures this module with a set of single
//! images (an illumination-correction reference, a static mask) and invokes
//! it once per run, on the first image cycle. The module resolves where
//! each image lives, decodes it, registers it by logical name so later
//! stages can fetch it, and records provenance measurements (file name,
//! path, MD5 content digest).
//!
//! # Architecture
//!
//! ```text
//! Config → Resolve (directory + filenames) → Register provider → Decode
//!        → Record measurements (FileName_*, PathName_*, MD5Digest_*)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use refimage_core::{ImageSet, LoaderConfig, Measurements, RunContext, SingleImageLoader};
//!
//! let config = LoaderConfig::load_from("loader.toml".as_ref())?;
//! let ctx = RunContext::new("/data/in", "/data/out").with_metadata("Plate", "P01");
//!
//! let loader = SingleImageLoader::new(config);
//! let mut image_set = ImageSet::new();
//! let mut measurements = Measurements::new();
//! loader.run(&ctx, &mut image_set, &mut measurements)?;
//!
//! let illum = image_set.get("IllumBlue");
//! ```

// Module declarations
pub mod config;
pub mod context;
pub mod error;
pub mod image_set;
pub mod loader;
pub mod measurements;
pub mod migrate;
pub mod provider;
pub mod resolve;

// Re-exports for convenient access
pub use config::{FolderChoice, ImageEntry, LoaderConfig};
pub use context::RunContext;
pub use error::{ConfigError, LoadError, MigrationError, RefimageError, Result};
pub use image_set::ImageSet;
pub use loader::{RunSummary, SingleImageLoader};
pub use measurements::{ColumnKind, Measurement, MeasurementColumn, Measurements, IMAGE};
pub use migrate::{migrate_settings, SettingsOrigin, SETTINGS_REVISION};
pub use provider::FileImageProvider;
pub use resolve::{resolve_base_directory, resolve_file_name};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
