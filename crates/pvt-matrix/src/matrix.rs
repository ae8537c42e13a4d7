//! Verb matrix store
//!
//! Holds every verb row for one user, always normalized to the injected
//! schema and ordered with [`locale_cmp`]. At most one row exists per
//! lowercased verb.

use crate::collation::locale_cmp;
use crate::error::MatrixError;
use crate::normalize::{normalize_with_adjustment, Adjustment};
use crate::row::{StoredRow, VerbRow};
use crate::schema::PrepositionSchema;
use crate::validation::{validate_meaning, validate_verb};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, per-user collection of verb rows
#[derive(Debug, Clone)]
pub struct VerbMatrix {
    schema: Arc<PrepositionSchema>,
    rows: Vec<VerbRow>,
}

impl VerbMatrix {
    /// Empty matrix under `schema`
    #[inline]
    #[must_use]
    pub fn new(schema: Arc<PrepositionSchema>) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Build from loaded rows
    ///
    /// Each row is normalized to the schema. A later row whose verb matches an
    /// earlier one case-insensitively is dropped.
    pub fn from_rows<I>(schema: Arc<PrepositionSchema>, rows: I) -> Self
    where
        I: IntoIterator<Item = VerbRow>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for row in rows {
            if !seen.insert(row.key()) {
                tracing::warn!("Dropping duplicate row for verb '{}'", row.verb);
                continue;
            }

            let (meanings, adjustment) = normalize_with_adjustment(&row.meanings, &schema);
            match adjustment {
                Adjustment::Unchanged => {}
                Adjustment::Truncated(dropped) => tracing::warn!(
                    "Truncated {} trailing meanings from '{}' to fit schema {}",
                    dropped,
                    row.verb,
                    schema.version()
                ),
                other => tracing::debug!("Normalized '{}': {:?}", row.verb, other),
            }

            out.push(VerbRow {
                verb: row.verb,
                meanings,
            });
        }

        let mut matrix = Self { schema, rows: out };
        matrix.sort();
        matrix
    }

    /// Add a verb with all meanings empty
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    /// - `MatrixError::Validation` for an invalid name
    /// - `MatrixError::Duplicate` if the verb exists in any letter case
    pub fn add_verb(&mut self, name: &str) -> Result<VerbRow, MatrixError> {
        let verb = validate_verb(name)?;
        if self.find_key(&verb.to_lowercase()).is_some() {
            return Err(MatrixError::Duplicate {
                verb: verb.to_string(),
            });
        }

        let row = VerbRow::blank(verb, &self.schema);
        self.rows.push(row.clone());
        self.sort();
        Ok(row)
    }

    /// Rename a verb, keeping its meanings
    ///
    /// Renaming to a different letter case of the same verb is allowed.
    ///
    /// # Errors
    /// - `MatrixError::Validation` for an invalid new name
    /// - `MatrixError::UnknownVerb` if `old` is not present
    /// - `MatrixError::Duplicate` if another row already uses the new name
    pub fn rename_verb(&mut self, old: &str, new: &str) -> Result<&VerbRow, MatrixError> {
        let new = validate_verb(new)?.to_string();
        let idx = self.position(old).ok_or_else(|| MatrixError::UnknownVerb {
            verb: old.to_string(),
        })?;

        if let Some(other) = self.find_key(&new.to_lowercase()) {
            if other != idx {
                return Err(MatrixError::Duplicate { verb: new });
            }
        }

        self.rows[idx].verb.clone_from(&new);
        self.sort();
        self.get(&new).ok_or(MatrixError::UnknownVerb { verb: new })
    }

    /// Remove a verb; absent verbs are ignored
    pub fn delete_verb(&mut self, name: &str) -> Option<VerbRow> {
        let idx = self.position(name)?;
        Some(self.rows.remove(idx))
    }

    /// Replace one meaning
    ///
    /// # Errors
    /// - `MatrixError::Validation` if `value` is over the length limit
    /// - `MatrixError::ColumnOutOfRange` if `column` is outside the schema
    /// - `MatrixError::UnknownVerb` if the verb is not present
    pub fn set_meaning(
        &mut self,
        verb: &str,
        column: usize,
        value: impl Into<String>,
    ) -> Result<(), MatrixError> {
        let value = value.into();
        validate_meaning(&value)?;

        if column >= self.schema.len() {
            return Err(MatrixError::ColumnOutOfRange {
                index: column,
                len: self.schema.len(),
            });
        }

        let idx = self.position(verb).ok_or_else(|| MatrixError::UnknownVerb {
            verb: verb.to_string(),
        })?;
        self.rows[idx].meanings[column] = value;
        Ok(())
    }

    /// Fill still-empty slots of `verb` with fetched meanings
    ///
    /// Slots the user edited in the meantime are kept. Values that fail
    /// validation are skipped. Returns the number of slots filled, or `None`
    /// if the verb is gone.
    pub fn fill_empty_meanings(&mut self, verb: &str, fetched: &[String]) -> Option<usize> {
        let idx = self.position(verb)?;
        let row = &mut self.rows[idx];
        let mut filled = 0;

        for (slot, value) in row.meanings.iter_mut().zip(fetched) {
            if !slot.is_empty() || value.is_empty() {
                continue;
            }
            if let Err(e) = validate_meaning(value) {
                tracing::warn!("Skipping fetched meaning for '{}': {}", row.verb, e);
                continue;
            }
            slot.clone_from(value);
            filled += 1;
        }

        Some(filled)
    }

    /// Row for an exact verb name
    #[must_use]
    pub fn get(&self, verb: &str) -> Option<&VerbRow> {
        self.rows.iter().find(|r| r.verb == verb)
    }

    /// Whether a verb exists in any letter case
    #[must_use]
    pub fn contains(&self, verb: &str) -> bool {
        self.find_key(&verb.trim().to_lowercase()).is_some()
    }

    /// Rows in display order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[VerbRow] {
        &self.rows
    }

    /// Verb names in display order
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.verb.as_str())
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Active schema
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Arc<PrepositionSchema> {
        &self.schema
    }

    /// Every row in persisted form, tagged with the schema version
    #[must_use]
    pub fn to_stored(&self, user_id: &str) -> Vec<StoredRow> {
        let version = self.schema.version();
        self.rows
            .iter()
            .map(|r| StoredRow::from_row(user_id, r, version))
            .collect()
    }

    fn position(&self, verb: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.verb == verb)
    }

    fn find_key(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.verb.to_lowercase() == key)
    }

    // `sort_by` is stable: rows that compare equal keep their relative order.
    fn sort(&mut self) {
        self.rows.sort_by(|a, b| locale_cmp(&a.verb, &b.verb));
    }
}
