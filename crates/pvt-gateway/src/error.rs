//! Error types for external collaborators

/// Failure talking to an external service
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request never got an HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("{service} returned status {status}: {body}")]
    Status {
        /// Which service
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("could not decode {service} response: {reason}")]
    Decode {
        /// Which service
        service: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Uniqueness constraint on `(user_id, verb)` violated
    #[error("row for verb '{verb}' already exists")]
    Conflict {
        /// Conflicting verb
        verb: String,
    },

    /// No authenticated session
    #[error("not signed in")]
    Unauthenticated,

    /// Client misconfigured
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether a caller could reasonably try again later
    ///
    /// Nothing in this workspace retries automatically; the flag feeds notices
    /// and logs.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(GatewayError::Transport("reset".into()).is_retryable());
        assert!(GatewayError::Status {
            service: "rows",
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!GatewayError::Status {
            service: "rows",
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!GatewayError::Conflict { verb: "Ask".into() }.is_retryable());
        assert!(!GatewayError::Unauthenticated.is_retryable());
    }

    #[test]
    fn status_display() {
        let err = GatewayError::Status {
            service: "translate",
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "translate returned status 500: boom");
    }
}
