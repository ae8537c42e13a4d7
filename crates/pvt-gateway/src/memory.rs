//! In-process row store
//!
//! Enforces the same `(user_id, lowercased verb)` uniqueness as the hosted
//! table. Used by tests and offline runs.

use crate::error::GatewayError;
use crate::traits::RowStore;
use async_trait::async_trait;
use dashmap::DashMap;
use pvt_matrix::{locale_cmp, SchemaVersion, StoredRow};
use std::sync::atomic::{AtomicUsize, Ordering};

type RowKey = (String, String);

fn key(user_id: &str, verb: &str) -> RowKey {
    (user_id.to_string(), verb.to_lowercase())
}

/// Call counters for assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// `select` calls
    pub selects: usize,
    /// Rows passed to `insert`
    pub inserted: usize,
    /// `upsert` calls
    pub upserts: usize,
    /// `update_meanings` calls
    pub updates: usize,
    /// `delete` calls
    pub deletes: usize,
}

/// Concurrent in-memory row store
#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    rows: DashMap<RowKey, StoredRow>,
    selects: AtomicUsize,
    inserted: AtomicUsize,
    upserts: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryRowStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `rows`; later duplicates overwrite earlier ones
    #[must_use]
    pub fn with_rows(rows: impl IntoIterator<Item = StoredRow>) -> Self {
        let store = Self::new();
        for row in rows {
            store.rows.insert(key(&row.user_id, &row.verb), row);
        }
        store
    }

    /// Snapshot of one row
    #[must_use]
    pub fn get(&self, user_id: &str, verb: &str) -> Option<StoredRow> {
        self.rows.get(&key(user_id, verb)).map(|r| r.clone())
    }

    /// Number of rows across all users
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Call counters so far
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            selects: self.selects.load(Ordering::Relaxed),
            inserted: self.inserted.load(Ordering::Relaxed),
            upserts: self.upserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn select(&self, user_id: &str) -> Result<Vec<StoredRow>, GatewayError> {
        self.selects.fetch_add(1, Ordering::Relaxed);
        let mut rows: Vec<StoredRow> = self
            .rows
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| locale_cmp(&a.verb, &b.verb));
        Ok(rows)
    }

    async fn insert(&self, rows: &[StoredRow]) -> Result<(), GatewayError> {
        // All-or-nothing, like a single multi-row INSERT.
        for row in rows {
            if self.rows.contains_key(&key(&row.user_id, &row.verb)) {
                return Err(GatewayError::Conflict {
                    verb: row.verb.clone(),
                });
            }
        }
        for row in rows {
            self.rows.insert(key(&row.user_id, &row.verb), row.clone());
        }
        self.inserted.fetch_add(rows.len(), Ordering::Relaxed);
        Ok(())
    }

    async fn upsert(&self, row: &StoredRow) -> Result<(), GatewayError> {
        self.upserts.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(key(&row.user_id, &row.verb), row.clone());
        Ok(())
    }

    async fn update_meanings(
        &self,
        user_id: &str,
        verb: &str,
        meanings: &[String],
        version: SchemaVersion,
    ) -> Result<(), GatewayError> {
        self.updates.fetch_add(1, Ordering::Relaxed);
        // Matching no rows is not an error for an UPDATE.
        if let Some(mut row) = self.rows.get_mut(&key(user_id, verb)) {
            row.meanings = meanings.to_vec();
            row.schema_version = Some(version);
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, verb: &str) -> Result<(), GatewayError> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.rows.remove(&key(user_id, verb));
        Ok(())
    }
}
