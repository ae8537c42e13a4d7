//! Save-all action run by the debouncer

use crate::debounce::DebouncedAction;
use crate::notice::{Notice, NoticeBoard};
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use pvt_gateway::RowStore;
use pvt_matrix::VerbMatrix;
use std::sync::Arc;
use tracing::{info, warn};

/// Upserts every row of a matrix
///
/// No diffing: the whole matrix is written on each run. A failure for one row
/// does not stop the others; one notice is pushed per run that had failures.
pub(crate) struct SaveAll {
    pub(crate) user_id: String,
    pub(crate) matrix: Arc<Mutex<VerbMatrix>>,
    pub(crate) store: Arc<dyn RowStore>,
    pub(crate) notices: Arc<NoticeBoard>,
}

impl SaveAll {
    /// Upsert all rows; returns the number that failed
    pub(crate) async fn run(&self) -> usize {
        let rows = self.matrix.lock().to_stored(&self.user_id);
        let total = rows.len();

        let results = join_all(rows.iter().map(|row| self.store.upsert(row))).await;

        let mut failed = 0;
        for (row, result) in rows.iter().zip(results) {
            if let Err(e) = result {
                warn!("Failed to save '{}': {}", row.verb, e);
                failed += 1;
            }
        }

        if failed > 0 {
            self.notices.push(Notice::error("Failed to save changes"));
        }
        info!("Saved {} of {} rows for {}", total - failed, total, self.user_id);
        failed
    }
}

#[async_trait]
impl DebouncedAction for SaveAll {
    async fn fire(&self) {
        self.run().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvt_gateway::{GatewayError, InMemoryRowStore};
    use pvt_matrix::{PrepositionSchema, SchemaVersion, StoredRow};

    struct Rejecting;

    #[async_trait]
    impl RowStore for Rejecting {
        async fn select(&self, _user_id: &str) -> Result<Vec<StoredRow>, GatewayError> {
            Ok(Vec::new())
        }
        async fn insert(&self, _rows: &[StoredRow]) -> Result<(), GatewayError> {
            Ok(())
        }
        async fn upsert(&self, _row: &StoredRow) -> Result<(), GatewayError> {
            Err(GatewayError::Transport("offline".into()))
        }
        async fn update_meanings(
            &self,
            _user_id: &str,
            _verb: &str,
            _meanings: &[String],
            _version: SchemaVersion,
        ) -> Result<(), GatewayError> {
            Ok(())
        }
        async fn delete(&self, _user_id: &str, _verb: &str) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    fn matrix_with(verbs: &[&str]) -> Arc<Mutex<VerbMatrix>> {
        let mut matrix = VerbMatrix::new(Arc::new(PrepositionSchema::current()));
        for verb in verbs {
            matrix.add_verb(verb).unwrap();
        }
        Arc::new(Mutex::new(matrix))
    }

    #[tokio::test]
    async fn upserts_every_row_with_version() {
        let store = Arc::new(InMemoryRowStore::new());
        let save = SaveAll {
            user_id: "u1".into(),
            matrix: matrix_with(&["Ask", "Be"]),
            store: store.clone(),
            notices: Arc::new(NoticeBoard::new(8)),
        };

        assert_eq!(save.run().await, 0);
        assert_eq!(store.stats().upserts, 2);
        let row = store.get("u1", "Ask").unwrap();
        assert_eq!(row.schema_version, Some(SchemaVersion::CURRENT));
        assert!(save.notices.is_empty());
    }

    #[tokio::test]
    async fn failures_push_a_single_notice() {
        let save = SaveAll {
            user_id: "u1".into(),
            matrix: matrix_with(&["Ask", "Be", "Go"]),
            store: Arc::new(Rejecting),
            notices: Arc::new(NoticeBoard::new(8)),
        };

        assert_eq!(save.run().await, 3);
        let notices = save.notices.drain();
        assert_eq!(notices, vec![Notice::error("Failed to save changes")]);
    }
}
