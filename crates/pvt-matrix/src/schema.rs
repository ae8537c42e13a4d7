//! Preposition schema
//!
//! An immutable, ordered list of preposition labels. Column `i` of every verb
//! row produced under a schema means "verb + `labels[i]`". Schemas are values
//! passed into the matrix, so several versions can coexist (tests, migrations).

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema version number stored alongside each persisted row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(pub u32);

impl SchemaVersion {
    /// Sixteen-column layout
    pub const LEGACY: Self = Self(1);
    /// Eighteen-column layout that predates "Up with" and "Forward"
    pub const PRE_UP_WITH: Self = Self(2);
    /// Twenty-column layout
    pub const CURRENT: Self = Self(3);

    /// Raw number
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

const LEGACY_LABELS: [&str; 16] = [
    "Across", "Along", "Around", "Away", "Back", "By", "Down", "For", "In", "Into", "Off", "On",
    "Out", "Over", "Up", "With",
];

const CURRENT_LABELS: [&str; 20] = [
    "About", "Across", "After", "Along", "Around", "Away", "Back", "By", "Down", "For", "Forward",
    "In", "Into", "Off", "On", "Out", "Over", "Up", "Up with", "With",
];

/// Ordered preposition labels for one schema version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepositionSchema {
    version: SchemaVersion,
    labels: Vec<String>,
    leading_insertion: Option<String>,
}

impl PrepositionSchema {
    /// Create a schema from labels
    ///
    /// # Errors
    /// - `SchemaError::Empty` if no labels are given
    /// - `SchemaError::BlankLabel` if a label is whitespace only
    /// - `SchemaError::DuplicateLabel` if two labels match case-insensitively
    pub fn new<I, S>(version: SchemaVersion, labels: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(SchemaError::BlankLabel { index });
            }
            if !seen.insert(label.to_lowercase()) {
                return Err(SchemaError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        Ok(Self {
            version,
            labels,
            leading_insertion: None,
        })
    }

    /// Mark `label` as the column most recently inserted at index 0.
    ///
    /// Rows exactly one column short are then aligned by prepending an empty
    /// slot instead of padding at the end.
    ///
    /// # Errors
    /// `SchemaError::LeadingInsertionMismatch` if `label` is not the first column
    pub fn with_leading_insertion(mut self, label: impl Into<String>) -> Result<Self, SchemaError> {
        let label = label.into();
        if self.labels.first() != Some(&label) {
            return Err(SchemaError::LeadingInsertionMismatch { label });
        }
        self.leading_insertion = Some(label);
        Ok(self)
    }

    /// The original sixteen-preposition layout
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            version: SchemaVersion::LEGACY,
            labels: LEGACY_LABELS.iter().map(|s| (*s).to_string()).collect(),
            leading_insertion: None,
        }
    }

    /// The twenty-preposition layout in use today
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: SchemaVersion::CURRENT,
            labels: CURRENT_LABELS.iter().map(|s| (*s).to_string()).collect(),
            leading_insertion: Some(CURRENT_LABELS[0].to_string()),
        }
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed schema
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at `index`
    #[inline]
    #[must_use]
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All labels in column order
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Schema version
    #[inline]
    #[must_use]
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Label inserted at index 0 by the latest revision, if any
    #[inline]
    #[must_use]
    pub fn leading_insertion(&self) -> Option<&str> {
        self.leading_insertion.as_deref()
    }

    /// Column index of `label`, matched case-insensitively
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        let wanted = label.trim().to_lowercase();
        self.labels.iter().position(|l| l.to_lowercase() == wanted)
    }
}
