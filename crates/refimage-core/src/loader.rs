//! The loader module: resolves, registers, decodes, and records each
//! configured image once per run.
//!
//! The host invokes [`SingleImageLoader::run`] on the first image cycle of a
//! run; the registered images stay available to every later cycle through
//! the [`ImageSet`].

use md5::{Digest, Md5};
use std::path::{Path, PathBuf};

use crate::config::{FolderChoice, LoaderConfig};
use crate::context::RunContext;
use crate::error::Result;
use crate::image_set::ImageSet;
use crate::measurements::{ColumnKind, MeasurementColumn, Measurements, IMAGE};
use crate::provider::FileImageProvider;
use crate::resolve::{resolve_base_directory, resolve_file_name};

const FEATURE_FILE_NAME: &str = "FileName";
const FEATURE_PATH_NAME: &str = "PathName";
const FEATURE_MD5_DIGEST: &str = "MD5Digest";

/// Rows for an optional display surface: a header followed by one
/// (image name, file) pair per loaded image. Headless hosts drop it.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Two-column display rows, header first
    pub rows: Vec<(String, String)>,
}

/// Loads a fixed set of images once per run and records their provenance.
pub struct SingleImageLoader {
    config: LoaderConfig,
}

impl SingleImageLoader {
    /// Create a loader for the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The loader's configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Logical names of every configured image, in configuration order.
    ///
    /// Downstream modules use this to validate their image references.
    pub fn image_names(&self) -> Vec<&str> {
        self.config.image_names()
    }

    /// The directory images are loaded from in this run.
    pub fn base_directory(&self, ctx: &RunContext) -> PathBuf {
        resolve_base_directory(self.config.folder, &self.config.custom_path, ctx)
    }

    /// (logical name, resolved filename) for every entry, in order.
    pub fn resolved_file_names(&self, ctx: &RunContext) -> Vec<(String, String)> {
        self.config
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.image_name.clone(),
                    resolve_file_name(&entry.file_name, ctx),
                )
            })
            .collect()
    }

    /// Column schema for the measurements this module writes: three per
    /// configured image.
    pub fn measurement_columns(&self) -> Vec<MeasurementColumn> {
        let mut columns = Vec::with_capacity(self.config.entries.len() * 3);
        for entry in &self.config.entries {
            let name = &entry.image_name;
            columns.push(MeasurementColumn::new(
                IMAGE,
                format!("{FEATURE_FILE_NAME}_{name}"),
                ColumnKind::FileName,
            ));
            columns.push(MeasurementColumn::new(
                IMAGE,
                format!("{FEATURE_PATH_NAME}_{name}"),
                ColumnKind::PathName,
            ));
            columns.push(MeasurementColumn::new(
                IMAGE,
                format!("{FEATURE_MD5_DIGEST}_{name}"),
                ColumnKind::FixedText(32),
            ));
        }
        columns
    }

    /// Load every configured image, register it with the image set, and
    /// record its provenance measurements.
    ///
    /// Providers support lazy decoding, but this forces each one eagerly:
    /// the digest measurement needs the pixel bytes up front. One missing or
    /// undecodable file aborts the whole run.
    pub fn run(
        &self,
        ctx: &RunContext,
        image_set: &mut ImageSet,
        measurements: &mut Measurements,
    ) -> Result<RunSummary> {
        let base_directory = self.base_directory(ctx);
        let base_str = base_directory.display().to_string();
        tracing::debug!("Loading {} image(s) from {:?}", self.config.entries.len(), base_directory);

        let mut summary = RunSummary {
            rows: vec![("Image name".to_string(), "File".to_string())],
        };

        for (image_name, file_name) in self.resolved_file_names(ctx) {
            let provider = FileImageProvider::new(&image_name, &base_directory, &file_name);
            image_set.register(provider)?;

            measurements.write(
                IMAGE,
                &format!("{FEATURE_FILE_NAME}_{image_name}"),
                file_name.clone(),
            )?;
            measurements.write(
                IMAGE,
                &format!("{FEATURE_PATH_NAME}_{image_name}"),
                base_str.clone(),
            )?;

            // Force the decode now; the digest needs pixel bytes.
            let image = image_set.provide(&image_name)?;
            let digest = pixel_digest(image.as_bytes());
            measurements.write(IMAGE, &format!("{FEATURE_MD5_DIGEST}_{image_name}"), digest)?;

            tracing::info!("Loaded {:?} as {:?}", file_name, image_name);
            summary.rows.push((image_name, file_name));
        }

        Ok(summary)
    }

    /// Rewrite the configuration for batch execution on another host.
    ///
    /// Default-folder choices become fixed custom paths (resolved against
    /// this run's context and passed through `alter_path`); metadata
    /// templates are altered only up to the first tag so the tags still
    /// resolve on the batch host.
    pub fn prepare_batch(&mut self, ctx: &RunContext, alter_path: impl Fn(&Path) -> PathBuf) {
        match self.config.folder {
            FolderChoice::DefaultInput => {
                self.config.folder = FolderChoice::Custom;
                self.config.custom_path =
                    alter_path(ctx.default_input_dir()).display().to_string();
            }
            FolderChoice::DefaultOutput => {
                self.config.folder = FolderChoice::Custom;
                self.config.custom_path =
                    alter_path(ctx.default_output_dir()).display().to_string();
            }
            FolderChoice::Custom => {
                self.config.custom_path = alter_path(Path::new(&self.config.custom_path))
                    .display()
                    .to_string();
            }
            FolderChoice::CustomWithMetadata => {
                let path = self.config.custom_path.clone();
                match path.find("\\g<") {
                    Some(tag_start) => {
                        let altered = alter_path(Path::new(&path[..tag_start]));
                        self.config.custom_path =
                            format!("{}{}", altered.display(), &path[tag_start..]);
                    }
                    None => {
                        self.config.custom_path =
                            alter_path(Path::new(&path)).display().to_string();
                    }
                }
            }
        }
    }
}

/// MD5 over the raw contiguous bytes of a pixel buffer, as 32 lowercase hex
/// characters.
fn pixel_digest(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
