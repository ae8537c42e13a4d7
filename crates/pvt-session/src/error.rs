//! Error types for the editing session

use pvt_gateway::GatewayError;
use pvt_matrix::MatrixError;

/// Editing session failure
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Matrix rejected the mutation
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// An add-verb submission is still in progress
    #[error("still adding '{verb}'")]
    Busy {
        /// Verb being added
        verb: String,
    },

    /// No signed-in user
    #[error("not signed in")]
    Unauthenticated,

    /// External service failure that could not be degraded
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Commit or cancel without a matching edit in progress
    #[error("no edit in progress")]
    NoActiveEdit,

    /// Cell is waiting for a translation
    #[error("cell ({verb}, {column}) is loading")]
    CellLoading {
        /// Row
        verb: String,
        /// Column
        column: usize,
    },
}

impl SessionError {
    /// Whether this error should surface as a notice
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::Matrix(e) => e.is_user_facing(),
            Self::Busy { .. } | Self::Unauthenticated => true,
            _ => false,
        }
    }
}
