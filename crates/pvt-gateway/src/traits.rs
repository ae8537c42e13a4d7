//! Collaborator interfaces
//!
//! Every external dependency of the editing session is reached through one of
//! these traits. Implementations must be `Send + Sync` so a session can share
//! them across tasks.

use crate::auth::AuthSession;
use crate::error::GatewayError;
use async_trait::async_trait;
use pvt_matrix::{SchemaVersion, StoredRow};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Persistent per-user row storage, keyed by `(user_id, verb)`
#[async_trait]
pub trait RowStore: Send + Sync {
    /// All rows for `user_id`, ordered by verb
    async fn select(&self, user_id: &str) -> Result<Vec<StoredRow>, GatewayError>;

    /// Insert new rows; fails with `Conflict` if any key exists
    async fn insert(&self, rows: &[StoredRow]) -> Result<(), GatewayError>;

    /// Insert or replace one row on `(user_id, verb)`
    async fn upsert(&self, row: &StoredRow) -> Result<(), GatewayError>;

    /// Replace the meanings and version marker of an existing row
    async fn update_meanings(
        &self,
        user_id: &str,
        verb: &str,
        meanings: &[String],
        version: SchemaVersion,
    ) -> Result<(), GatewayError>;

    /// Delete one row; deleting an absent row succeeds
    async fn delete(&self, user_id: &str, verb: &str) -> Result<(), GatewayError>;
}

/// Request body for the translation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Base verb
    pub verb: String,
    /// Lowercased preposition
    pub preposition: String,
}

impl TranslationRequest {
    /// Build a request, lowercasing the preposition
    #[must_use]
    pub fn new(verb: impl Into<String>, preposition: &str) -> Self {
        Self {
            verb: verb.into(),
            preposition: preposition.to_lowercase(),
        }
    }
}

/// Request body for the example-sentence service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRequest {
    /// Base verb
    pub verb: String,
    /// Lowercased preposition
    pub preposition: String,
    /// Meaning the example should illustrate
    pub meaning: String,
}

impl ExampleRequest {
    /// Build a request, lowercasing the preposition
    #[must_use]
    pub fn new(verb: impl Into<String>, preposition: &str, meaning: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            preposition: preposition.to_lowercase(),
            meaning: meaning.into(),
        }
    }
}

/// Suggests a meaning for a verb + preposition pair
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translation text; an empty string means "no suggestion"
    async fn translate(&self, request: TranslationRequest) -> Result<String, GatewayError>;
}

/// Generates example sentences
#[async_trait]
pub trait ExampleService: Send + Sync {
    /// Raw example text, possibly `|`-separated
    async fn example(&self, request: ExampleRequest) -> Result<String, GatewayError>;
}

/// Source of the signed-in user
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, `None` when signed out
    async fn session(&self) -> Result<Option<AuthSession>, GatewayError>;

    /// Receiver notified on every sign-in or sign-out
    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>>;

    /// End the session
    async fn sign_out(&self) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_lowercase_preposition() {
        let req = TranslationRequest::new("Look", "Up with");
        assert_eq!(req.preposition, "up with");

        let req = ExampleRequest::new("Look", "After", "Cuidar");
        assert_eq!(req.preposition, "after");
        assert_eq!(req.meaning, "Cuidar");
    }
}
