//! Column-insertion schema migration
//!
//! A migration splices empty columns into stored meaning lists when the
//! schema grows. Rows carry a schema-version marker and `plan` refuses to
//! touch rows that are already at or past the target version, or whose length
//! does not match the source layout. Running a migration twice therefore
//! leaves data alone instead of shifting columns again.

use crate::row::StoredRow;
use crate::schema::SchemaVersion;

/// Insert empty columns to move rows from one layout to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMigration {
    from: SchemaVersion,
    to: SchemaVersion,
    from_len: usize,
    insert_at: Vec<usize>,
}

/// What `plan` decided for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationDecision {
    /// Row needs these new meanings
    Migrate(Vec<String>),
    /// Marker already at or past the target version
    AlreadyCurrent,
    /// Length does not match the source layout; left untouched
    LengthMismatch {
        /// Meanings in the stored row
        found: usize,
        /// Meanings the source layout has
        expected: usize,
    },
}

impl SchemaMigration {
    /// Create a migration
    ///
    /// `insert_at` holds positions in the output layout; they are applied in
    /// ascending order.
    #[must_use]
    pub fn new(
        from: SchemaVersion,
        to: SchemaVersion,
        from_len: usize,
        mut insert_at: Vec<usize>,
    ) -> Self {
        insert_at.sort_unstable();
        insert_at.dedup();
        Self {
            from,
            to,
            from_len,
            insert_at,
        }
    }

    /// Adds the "Up with" and "Forward" columns: 18 columns become 20, with
    /// empty slots at 15 and 16
    #[must_use]
    pub fn up_with_and_forward() -> Self {
        Self::new(
            SchemaVersion::PRE_UP_WITH,
            SchemaVersion::CURRENT,
            18,
            vec![15, 16],
        )
    }

    /// Source version
    #[inline]
    #[must_use]
    pub fn from(&self) -> SchemaVersion {
        self.from
    }

    /// Target version
    #[inline]
    #[must_use]
    pub fn to(&self) -> SchemaVersion {
        self.to
    }

    /// Expected length of rows in the source layout
    #[inline]
    #[must_use]
    pub fn from_len(&self) -> usize {
        self.from_len
    }

    /// Expected length after migration
    #[inline]
    #[must_use]
    pub fn to_len(&self) -> usize {
        self.from_len + self.insert_at.len()
    }

    /// Splice the empty columns into `meanings`
    ///
    /// Positions past the end append.
    #[must_use]
    pub fn apply(&self, meanings: &[String]) -> Vec<String> {
        let mut out = meanings.to_vec();
        for &at in &self.insert_at {
            let at = at.min(out.len());
            out.insert(at, String::new());
        }
        out
    }

    /// Decide whether and how `row` should be migrated
    #[must_use]
    pub fn plan(&self, row: &StoredRow) -> MigrationDecision {
        if row.schema_version.is_some_and(|v| v >= self.to) {
            return MigrationDecision::AlreadyCurrent;
        }
        if row.meanings.len() != self.from_len {
            return MigrationDecision::LengthMismatch {
                found: row.meanings.len(),
                expected: self.from_len,
            };
        }
        MigrationDecision::Migrate(self.apply(&row.meanings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("m{i}")).collect()
    }

    fn stored(meanings: Vec<String>, version: Option<SchemaVersion>) -> StoredRow {
        StoredRow {
            user_id: "u1".into(),
            verb: "Look".into(),
            meanings,
            schema_version: version,
        }
    }

    #[test]
    fn splices_at_fifteen_and_sixteen() {
        let m = numbered(18);
        let out = SchemaMigration::up_with_and_forward().apply(&m);

        assert_eq!(out.len(), 20);
        assert_eq!(&out[..15], &m[..15]);
        assert_eq!(out[15], "");
        assert_eq!(out[16], "");
        assert_eq!(out[17], m[15]);
        assert_eq!(out[19], m[17]);
    }

    #[test]
    fn plan_migrates_unmarked_rows() {
        let migration = SchemaMigration::up_with_and_forward();
        let decision = migration.plan(&stored(numbered(18), None));
        assert!(matches!(decision, MigrationDecision::Migrate(ref v) if v.len() == 20));
    }

    #[test]
    fn plan_skips_current_rows() {
        let migration = SchemaMigration::up_with_and_forward();
        assert_eq!(
            migration.plan(&stored(numbered(18), Some(SchemaVersion::CURRENT))),
            MigrationDecision::AlreadyCurrent
        );
    }

    #[test]
    fn plan_skips_wrong_length() {
        let migration = SchemaMigration::up_with_and_forward();
        assert_eq!(
            migration.plan(&stored(numbered(20), None)),
            MigrationDecision::LengthMismatch {
                found: 20,
                expected: 18
            }
        );
    }

    #[test]
    fn second_run_is_noop() {
        let migration = SchemaMigration::up_with_and_forward();
        let mut row = stored(numbered(18), Some(SchemaVersion::PRE_UP_WITH));

        if let MigrationDecision::Migrate(meanings) = migration.plan(&row) {
            row.meanings = meanings;
            row.schema_version = Some(migration.to());
        }
        let after_first = row.clone();

        assert_eq!(migration.plan(&row), MigrationDecision::AlreadyCurrent);
        assert_eq!(row, after_first);
    }

    #[test]
    fn insert_positions_are_sorted() {
        let migration = SchemaMigration::new(SchemaVersion(1), SchemaVersion(2), 2, vec![3, 0]);
        let out = migration.apply(&numbered(2));
        assert_eq!(out, vec!["", "m0", "m1", ""]);
        assert_eq!(migration.to_len(), 4);
    }
}
