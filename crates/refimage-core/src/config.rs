//! Module configuration: which images to load and where to find them.
//!
//! A configuration is an ordered list of image entries sharing one folder
//! choice. It round-trips two ways: as TOML (`load_from`/`to_toml`) for
//! standalone use, and as a flat setting-value sequence
//! (`to_setting_values`/`from_setting_values`) for hosts that persist
//! pipelines as positional value lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

const LABEL_DEFAULT_INPUT: &str = "Default Input Folder";
const LABEL_DEFAULT_OUTPUT: &str = "Default Output Folder";
const LABEL_CUSTOM: &str = "Custom folder";
const LABEL_CUSTOM_WITH_METADATA: &str = "Custom with metadata";

/// Where the base directory for configured images comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderChoice {
    /// The run's default input folder
    DefaultInput,
    /// The run's default output folder
    DefaultOutput,
    /// A fixed path, used as-is
    Custom,
    /// A path template with metadata tags and `./` / `&/` shorthands
    CustomWithMetadata,
}

impl FolderChoice {
    /// The label this choice carries in flat setting-value sequences.
    ///
    /// Pipeline files store labels, not serde names, so the two can evolve
    /// independently.
    pub fn setting_label(self) -> &'static str {
        match self {
            FolderChoice::DefaultInput => LABEL_DEFAULT_INPUT,
            FolderChoice::DefaultOutput => LABEL_DEFAULT_OUTPUT,
            FolderChoice::Custom => LABEL_CUSTOM,
            FolderChoice::CustomWithMetadata => LABEL_CUSTOM_WITH_METADATA,
        }
    }

    /// Parse a setting-value label back into a choice.
    pub fn from_setting_label(label: &str) -> Result<Self, ConfigError> {
        match label {
            LABEL_DEFAULT_INPUT => Ok(FolderChoice::DefaultInput),
            LABEL_DEFAULT_OUTPUT => Ok(FolderChoice::DefaultOutput),
            LABEL_CUSTOM => Ok(FolderChoice::Custom),
            LABEL_CUSTOM_WITH_METADATA => Ok(FolderChoice::CustomWithMetadata),
            other => Err(ConfigError::UnknownFolderChoice(other.to_string())),
        }
    }
}

impl fmt::Display for FolderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setting_label())
    }
}

/// One configured image: a filename template and the logical name
/// downstream stages use to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Filename of the image to load; may contain `\g<Key>` metadata tags
    pub file_name: String,

    /// Logical name the loaded image is registered under
    pub image_name: String,
}

impl ImageEntry {
    /// Create a new entry.
    pub fn new(file_name: impl Into<String>, image_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            image_name: image_name.into(),
        }
    }
}

/// Configuration for one loader instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// How the base directory is computed
    pub folder: FolderChoice,

    /// Path (or path template) for the custom folder choices
    pub custom_path: String,

    /// Images to load, in order; never empty in a valid configuration
    pub entries: Vec<ImageEntry>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            folder: FolderChoice::DefaultInput,
            custom_path: ".".to_string(),
            entries: vec![ImageEntry::new("image.tif", "Reference")],
        }
    }
}

impl LoaderConfig {
    /// Load a configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: LoaderConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Append an entry to the configuration.
    pub fn add_entry(&mut self, entry: ImageEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry at `index`, if it exists.
    pub fn remove_entry(&mut self, index: usize) -> Option<ImageEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Logical names of every configured image, in order.
    pub fn image_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.image_name.as_str()).collect()
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one image entry is required".into(),
            ));
        }
        for entry in &self.entries {
            if entry.image_name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "entry for file {:?} has an empty image name",
                    entry.file_name
                )));
            }
            if entry.file_name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "entry {:?} has an empty file name",
                    entry.image_name
                )));
            }
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i]
                .iter()
                .any(|earlier| earlier.image_name == entry.image_name)
            {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate image name {:?}",
                    entry.image_name
                )));
            }
        }
        if matches!(
            self.folder,
            FolderChoice::Custom | FolderChoice::CustomWithMetadata
        ) && self.custom_path.is_empty()
        {
            return Err(ConfigError::ValidationError(
                "custom_path must be set for custom folder choices".into(),
            ));
        }
        Ok(())
    }

    /// Flatten into the positional value sequence used by pipeline files:
    /// `[folder label, custom path, (file name, image name)*]`.
    pub fn to_setting_values(&self) -> Vec<String> {
        let mut values = vec![
            self.folder.setting_label().to_string(),
            self.custom_path.clone(),
        ];
        for entry in &self.entries {
            values.push(entry.file_name.clone());
            values.push(entry.image_name.clone());
        }
        values
    }

    /// Rebuild a configuration from a positional value sequence, taking as
    /// many entries as the sequence carries.
    pub fn from_setting_values(values: &[String]) -> Result<Self, ConfigError> {
        if values.len() < 4 {
            return Err(ConfigError::MalformedSettings(format!(
                "expected at least 4 values, got {}",
                values.len()
            )));
        }
        if (values.len() - 2) % 2 != 0 {
            return Err(ConfigError::MalformedSettings(format!(
                "dangling file entry in {} values",
                values.len()
            )));
        }
        let folder = FolderChoice::from_setting_label(&values[0])?;
        let custom_path = values[1].clone();
        let entries = values[2..]
            .chunks(2)
            .map(|pair| ImageEntry::new(&pair[0], &pair[1]))
            .collect();
        let config = Self {
            folder,
            custom_path,
            entries,
        };
        config.validate()?;
        Ok(config)
    }
}
