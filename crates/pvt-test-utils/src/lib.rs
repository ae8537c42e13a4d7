//! Testing utilities for the phrasal verb table workspace
//!
//! Shared fixtures and scripted collaborators.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pvt_gateway::{
    AuthSession, ExampleRequest, ExampleService, GatewayError, InMemoryRowStore, RowStore,
    StaticAuth, TranslationRequest, TranslationService,
};
use pvt_matrix::{PrepositionSchema, SchemaVersion, StoredRow};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_USER: &str = "user-1";

pub fn current_schema() -> Arc<PrepositionSchema> {
    Arc::new(PrepositionSchema::current())
}

pub fn signed_in() -> StaticAuth {
    StaticAuth::signed_in(AuthSession::new(TEST_USER, "test-token"))
}

/// Stored row whose meanings are `"{verb}-{i}"`
pub fn stored_row(verb: &str, len: usize, version: Option<SchemaVersion>) -> StoredRow {
    StoredRow {
        user_id: TEST_USER.to_string(),
        verb: verb.to_string(),
        meanings: (0..len).map(|i| format!("{verb}-{i}")).collect(),
        schema_version: version,
    }
}

fn offline() -> GatewayError {
    GatewayError::Transport("scripted failure".to_string())
}

/// Translator answering from a script; unscripted pairs get `""`
#[derive(Debug, Default)]
pub struct ScriptedTranslator {
    answers: HashMap<String, String>,
    failing: Vec<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `text` for a lowercased preposition
    pub fn answer(mut self, preposition: &str, text: &str) -> Self {
        self.answers
            .insert(preposition.to_lowercase(), text.to_string());
        self
    }

    /// Fail for a lowercased preposition
    pub fn fail_on(mut self, preposition: &str) -> Self {
        self.failing.push(preposition.to_lowercase());
        self
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationService for ScriptedTranslator {
    async fn translate(&self, request: TranslationRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&request.preposition) {
            return Err(offline());
        }
        Ok(self
            .answers
            .get(&request.preposition)
            .cloned()
            .unwrap_or_default())
    }
}

/// Example service returning a fixed response
#[derive(Debug)]
pub struct ScriptedExamples {
    response: Mutex<Result<String, ()>>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ExampleRequest>>,
}

impl ScriptedExamples {
    pub fn returning(raw: &str) -> Self {
        Self {
            response: Mutex::new(Ok(raw.to_string())),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Mutex::new(Err(())),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change the response for later calls
    pub fn set_response(&self, raw: &str) {
        *self.response.lock() = Ok(raw.to_string());
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<ExampleRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ExampleService for ScriptedExamples {
    async fn example(&self, request: ExampleRequest) -> Result<String, GatewayError> {
        self.requests.lock().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.lock().clone().map_err(|()| offline())
    }
}

/// Row store where every call fails
#[derive(Debug, Default)]
pub struct UnavailableRowStore;

#[async_trait]
impl RowStore for UnavailableRowStore {
    async fn select(&self, _user_id: &str) -> Result<Vec<StoredRow>, GatewayError> {
        Err(offline())
    }

    async fn insert(&self, _rows: &[StoredRow]) -> Result<(), GatewayError> {
        Err(offline())
    }

    async fn upsert(&self, _row: &StoredRow) -> Result<(), GatewayError> {
        Err(offline())
    }

    async fn update_meanings(
        &self,
        _user_id: &str,
        _verb: &str,
        _meanings: &[String],
        _version: SchemaVersion,
    ) -> Result<(), GatewayError> {
        Err(offline())
    }

    async fn delete(&self, _user_id: &str, _verb: &str) -> Result<(), GatewayError> {
        Err(offline())
    }
}

/// In-memory store whose upserts take `delay` before they land
#[derive(Debug)]
pub struct SlowUpsertStore {
    inner: Arc<InMemoryRowStore>,
    delay: Duration,
}

impl SlowUpsertStore {
    pub fn new(inner: Arc<InMemoryRowStore>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl RowStore for SlowUpsertStore {
    async fn select(&self, user_id: &str) -> Result<Vec<StoredRow>, GatewayError> {
        self.inner.select(user_id).await
    }

    async fn insert(&self, rows: &[StoredRow]) -> Result<(), GatewayError> {
        self.inner.insert(rows).await
    }

    async fn upsert(&self, row: &StoredRow) -> Result<(), GatewayError> {
        tokio::time::sleep(self.delay).await;
        self.inner.upsert(row).await
    }

    async fn update_meanings(
        &self,
        user_id: &str,
        verb: &str,
        meanings: &[String],
        version: SchemaVersion,
    ) -> Result<(), GatewayError> {
        self.inner
            .update_meanings(user_id, verb, meanings, version)
            .await
    }

    async fn delete(&self, user_id: &str, verb: &str) -> Result<(), GatewayError> {
        self.inner.delete(user_id, verb).await
    }
}
