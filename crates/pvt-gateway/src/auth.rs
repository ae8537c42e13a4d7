//! Authentication session handling
//!
//! The real identity provider lives outside this workspace. [`StaticAuth`]
//! serves a session from configured credentials and broadcasts sign-out to
//! subscribers.

use crate::error::GatewayError;
use crate::traits::AuthProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Row-store owner id
    pub user_id: String,
    /// Bearer token for row-store and function calls
    pub access_token: String,
}

impl AuthSession {
    /// Create a session
    #[must_use]
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }
}

/// Auth provider backed by a fixed session
#[derive(Debug)]
pub struct StaticAuth {
    state: watch::Sender<Option<AuthSession>>,
}

impl StaticAuth {
    /// Provider that starts signed in
    #[must_use]
    pub fn signed_in(session: AuthSession) -> Self {
        let (state, _) = watch::channel(Some(session));
        Self { state }
    }

    /// Provider that starts signed out
    #[must_use]
    pub fn signed_out() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// Replace the session and notify subscribers
    pub fn sign_in(&self, session: AuthSession) {
        self.state.send_replace(Some(session));
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn session(&self) -> Result<Option<AuthSession>, GatewayError> {
        Ok(self.state.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.state.subscribe()
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        tracing::info!("Signing out");
        self.state.send_replace(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_out_notifies_subscribers() {
        let auth = StaticAuth::signed_in(AuthSession::new("u1", "t"));
        let mut rx = auth.subscribe();

        assert_eq!(auth.session().await.unwrap().unwrap().user_id, "u1");

        auth.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(auth.session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_in_replaces_session() {
        let auth = StaticAuth::signed_out();
        assert!(auth.session().await.unwrap().is_none());

        auth.sign_in(AuthSession::new("u2", "t2"));
        assert_eq!(auth.session().await.unwrap().unwrap().user_id, "u2");
    }
}
