//! Settings migration for serialized module configurations.
//!
//! Pipeline files carry a flat positional value list plus a revision number
//! and an origin marker. [`migrate_settings`] is a pure function from that
//! triple to the current layout; hosts call it while loading a pipeline and
//! treat any error as fatal.

use std::fmt;

use crate::config::FolderChoice;
use crate::error::MigrationError;

/// Serialized logical-name value marking a disabled legacy entry.
const DO_NOT_USE: &str = "Do not use";

/// Current revision of the serialized settings layout.
pub const SETTINGS_REVISION: u32 = 1;

/// Interim labels written by legacy imports and early revision-1 files,
/// standardized away in the final step.
const OLD_LABEL_INPUT: &str = "Default input folder";
const OLD_LABEL_OUTPUT: &str = "Default output folder";

/// Where a serialized configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    /// Written by this tool
    Native,
    /// Imported from the predecessor tool
    Legacy,
}

impl fmt::Display for SettingsOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsOrigin::Native => f.write_str("native"),
            SettingsOrigin::Legacy => f.write_str("legacy"),
        }
    }
}

/// Migrate serialized setting values to the current revision.
///
/// Returns the migrated values together with the revision they now conform
/// to and the (possibly reinterpreted) origin. Idempotent on values that are
/// already current.
pub fn migrate_settings(
    values: Vec<String>,
    revision: u32,
    origin: SettingsOrigin,
) -> Result<(Vec<String>, u32, SettingsOrigin), MigrationError> {
    let (mut values, revision) = match (origin, revision) {
        (SettingsOrigin::Legacy, 4) => (migrate_legacy_r4(values)?, SETTINGS_REVISION),
        (SettingsOrigin::Legacy, revision) => {
            return Err(MigrationError::UnsupportedRevision {
                revision,
                origin: SettingsOrigin::Legacy,
            })
        }
        (SettingsOrigin::Native, revision) => (values, revision),
    };

    if revision != SETTINGS_REVISION {
        return Err(MigrationError::UnsupportedRevision {
            revision,
            origin: SettingsOrigin::Native,
        });
    }

    if let Some(first) = values.first_mut() {
        // Very early revision-1 files wrote "Default image folder".
        if first.starts_with("Default image") {
            *first = OLD_LABEL_INPUT.to_string();
        }
        *first = standardize_folder_label(first);
    }

    Ok((values, SETTINGS_REVISION, SettingsOrigin::Native))
}

/// Legacy revision 4: slot 0 was blank; the folder choice is derived from
/// the sentinel in slot 1, then disabled entry pairs are dropped.
fn migrate_legacy_r4(mut values: Vec<String>) -> Result<Vec<String>, MigrationError> {
    if values.len() < 4 {
        return Err(MigrationError::TooFewValues {
            expected: 4,
            actual: values.len(),
        });
    }
    values[0] = match values[1].as_str() {
        "." => OLD_LABEL_INPUT.to_string(),
        "&" => OLD_LABEL_OUTPUT.to_string(),
        _ => FolderChoice::Custom.setting_label().to_string(),
    };
    // Disabled entries sat at fixed offsets in the legacy layout. Descending
    // order keeps the earlier offsets valid while pairs are removed.
    for i in [8usize, 6, 4] {
        if values.get(i + 1).map(String::as_str) == Some(DO_NOT_USE) {
            values.drain(i..i + 2);
        }
    }
    Ok(values)
}

/// Map historical default-folder spellings onto the canonical labels.
fn standardize_folder_label(label: &str) -> String {
    const INPUT_ALIASES: [&str; 4] = [
        "default input folder",
        "default image folder",
        "default image directory",
        "default input directory",
    ];
    const OUTPUT_ALIASES: [&str; 2] = ["default output folder", "default output directory"];

    let lower = label.to_lowercase();
    if INPUT_ALIASES.contains(&lower.as_str()) {
        FolderChoice::DefaultInput.setting_label().to_string()
    } else if OUTPUT_ALIASES.contains(&lower.as_str()) {
        FolderChoice::DefaultOutput.setting_label().to_string()
    } else {
        label.to_string()
    }
}
