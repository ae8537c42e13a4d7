//! Verb rows and their persisted form

use crate::schema::{PrepositionSchema, SchemaVersion};
use serde::{Deserialize, Serialize};

/// One verb and its per-preposition meanings
///
/// An empty string in `meanings` means "no known translation", which is
/// distinct from a missing column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbRow {
    /// Verb as the user typed it
    pub verb: String,
    /// One entry per schema column
    pub meanings: Vec<String>,
}

impl VerbRow {
    /// Row with every meaning empty
    #[must_use]
    pub fn blank(verb: impl Into<String>, schema: &PrepositionSchema) -> Self {
        Self {
            verb: verb.into(),
            meanings: vec![String::new(); schema.len()],
        }
    }

    /// Meaning at `column`
    #[inline]
    #[must_use]
    pub fn meaning(&self, column: usize) -> Option<&str> {
        self.meanings.get(column).map(String::as_str)
    }

    /// Number of non-empty meanings
    #[must_use]
    pub fn filled(&self) -> usize {
        self.meanings.iter().filter(|m| !m.is_empty()).count()
    }

    /// Lowercased verb used for uniqueness checks
    #[inline]
    #[must_use]
    pub fn key(&self) -> String {
        self.verb.to_lowercase()
    }
}

/// Row as exchanged with the row store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRow {
    /// Owning user
    pub user_id: String,
    /// Verb
    pub verb: String,
    /// Meanings in the layout of `schema_version`
    pub meanings: Vec<String>,
    /// Layout marker; `None` for rows written before markers existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<SchemaVersion>,
}

impl StoredRow {
    /// Persisted form of `row` under `version`
    #[must_use]
    pub fn from_row(user_id: impl Into<String>, row: &VerbRow, version: SchemaVersion) -> Self {
        Self {
            user_id: user_id.into(),
            verb: row.verb.clone(),
            meanings: row.meanings.clone(),
            schema_version: Some(version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_row_matches_schema() {
        let row = VerbRow::blank("Ask", &PrepositionSchema::current());
        assert_eq!(row.meanings.len(), 20);
        assert_eq!(row.filled(), 0);
        assert_eq!(row.key(), "ask");
    }

    #[test]
    fn stored_row_without_marker_deserializes() {
        let json = r#"{"user_id":"u1","verb":"Ask","meanings":["a","b"]}"#;
        let row: StoredRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.schema_version, None);
        assert_eq!(row.meanings, vec!["a", "b"]);
    }

    #[test]
    fn stored_row_marker_is_a_plain_number() {
        let row = StoredRow::from_row(
            "u1",
            &VerbRow::blank("Ask", &PrepositionSchema::legacy()),
            SchemaVersion::CURRENT,
        );
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["schema_version"], 3);
    }
}
