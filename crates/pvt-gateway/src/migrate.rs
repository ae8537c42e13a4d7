//! Drive a [`SchemaMigration`] against a row store

use crate::error::GatewayError;
use crate::traits::RowStore;
use pvt_matrix::{MigrationDecision, SchemaMigration};

/// Outcome counts for one user's migration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Rows rewritten
    pub migrated: usize,
    /// Rows already at the target version
    pub already_current: usize,
    /// Rows left alone because their length did not match
    pub skipped: usize,
    /// Rows whose update failed
    pub failed: usize,
}

impl MigrationReport {
    /// Rows examined
    #[must_use]
    pub fn total(&self) -> usize {
        self.migrated + self.already_current + self.skipped + self.failed
    }

    /// Whether every eligible row was written
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Migrate every row of `user_id`
///
/// Rows already carrying the target version are left untouched, so running
/// this twice does not shift columns again. Per-row write failures are logged
/// and counted.
///
/// # Errors
/// Returns the error if the user's rows cannot be read.
pub async fn migrate_user(
    store: &dyn RowStore,
    user_id: &str,
    migration: &SchemaMigration,
) -> Result<MigrationReport, GatewayError> {
    let rows = store.select(user_id).await?;
    let mut report = MigrationReport::default();

    for row in &rows {
        match migration.plan(row) {
            MigrationDecision::Migrate(meanings) => {
                match store
                    .update_meanings(user_id, &row.verb, &meanings, migration.to())
                    .await
                {
                    Ok(()) => report.migrated += 1,
                    Err(e) => {
                        tracing::error!("Failed to migrate '{}': {}", row.verb, e);
                        report.failed += 1;
                    }
                }
            }
            MigrationDecision::AlreadyCurrent => report.already_current += 1,
            MigrationDecision::LengthMismatch { found, expected } => {
                tracing::warn!(
                    "Skipping '{}': {} meanings, migration expects {}",
                    row.verb,
                    found,
                    expected
                );
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        "Migration {} -> {} for user {}: {:?}",
        migration.from(),
        migration.to(),
        user_id,
        report
    );
    Ok(report)
}
