//! Per-run measurement store and column schema.

use serde::Serialize;

use crate::error::LoadError;

/// Entity name for image-level measurements.
pub const IMAGE: &str = "Image";

/// Column kinds understood by the measurement store's schema validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free-text file name
    FileName,
    /// Free-text path name
    PathName,
    /// Fixed-length text of the given width
    FixedText(usize),
}

/// One declared measurement column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementColumn {
    /// Entity the column belongs to (always `Image` for this module)
    pub entity: String,
    /// Feature name, e.g. `MD5Digest_IllumBlue`
    pub feature: String,
    /// Value kind for the store's schema validator
    pub kind: ColumnKind,
}

impl MeasurementColumn {
    /// Declare a column for `entity`.
    pub fn new(entity: impl Into<String>, feature: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            entity: entity.into(),
            feature: feature.into(),
            kind,
        }
    }
}

/// One recorded scalar.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    /// Entity the value belongs to
    pub entity: String,
    /// Feature name
    pub feature: String,
    /// Recorded value
    pub value: String,
}

/// Append-only store of string scalars for the first image cycle.
///
/// Features are written once and immutable thereafter; a second write to the
/// same (entity, feature) is a loud error rather than an overwrite.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Measurements {
    records: Vec<Measurement>,
}

impl Measurements {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one value.
    pub fn write(
        &mut self,
        entity: &str,
        feature: &str,
        value: impl Into<String>,
    ) -> Result<(), LoadError> {
        if self.get(entity, feature).is_some() {
            return Err(LoadError::MeasurementExists {
                entity: entity.to_string(),
                feature: feature.to_string(),
            });
        }
        self.records.push(Measurement {
            entity: entity.to_string(),
            feature: feature.to_string(),
            value: value.into(),
        });
        Ok(())
    }

    /// The recorded value for (entity, feature), if any.
    pub fn get(&self, entity: &str, feature: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.entity == entity && r.feature == feature)
            .map(|r| r.value.as_str())
    }

    /// All records, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.records.iter()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
