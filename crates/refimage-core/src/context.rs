//! Run context: per-run directories and metadata substitution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const TAG_OPEN: &str = "\\g<";

/// Everything the loader needs from the host for one run.
///
/// Default directories are explicit values owned by the context rather than
/// process-wide state, so two runs with different folders can coexist in one
/// process.
#[derive(Debug, Clone)]
pub struct RunContext {
    default_input_dir: PathBuf,
    default_output_dir: PathBuf,
    metadata: BTreeMap<String, String>,
}

impl RunContext {
    /// Create a context with the given default input and output folders.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_input_dir: input_dir.into(),
            default_output_dir: output_dir.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add one metadata value, builder style.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Add or replace one metadata value.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// The run's default input folder.
    pub fn default_input_dir(&self) -> &Path {
        &self.default_input_dir
    }

    /// The run's default output folder.
    pub fn default_output_dir(&self) -> &Path {
        &self.default_output_dir
    }

    /// Replace each `\g<Key>` tag in `template` with the metadata value for
    /// `Key`.
    ///
    /// Lenient by contract: a tag whose key has no metadata value, and any
    /// malformed (unterminated) tag, passes through as literal text.
    pub fn substitute_metadata(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find(TAG_OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + TAG_OPEN.len()..];
            match after.find('>') {
                Some(end) => {
                    let key = &after[..end];
                    match self.metadata.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + TAG_OPEN.len() + end + 1]),
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}
