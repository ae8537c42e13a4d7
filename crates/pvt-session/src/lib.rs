//! PVT Session - interactive editing on top of the verb matrix
//!
//! [`EditingSession`] ties one user's [`pvt_matrix::VerbMatrix`] to the
//! gateway collaborators:
//! - cell, row-label and add-verb state machines
//! - a debounced save-all ([`SaveScheduler`])
//! - cached, de-duplicated example fetches
//! - user-facing [`Notice`]s for every degraded outcome
//!
//! # Example
//!
//! ```rust,no_run
//! use pvt_gateway::{AuthSession, EdgeFunctionClient, InMemoryRowStore, ServiceEndpoint, StaticAuth};
//! use pvt_matrix::PrepositionSchema;
//! use pvt_session::{Collaborators, EditingSession, SessionConfig};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = StaticAuth::signed_in(AuthSession::new("user-1", "token"));
//! let functions = Arc::new(EdgeFunctionClient::new(ServiceEndpoint::new(
//!     "https://example.supabase.co",
//!     "anon-key",
//! ))?);
//! let collaborators = Collaborators::new(
//!     Arc::new(InMemoryRowStore::new()),
//!     functions.clone(),
//!     functions,
//! );
//!
//! let session = EditingSession::open(
//!     &auth,
//!     collaborators,
//!     Arc::new(PrepositionSchema::current()),
//!     SessionConfig::default(),
//! )
//! .await?;
//! session.add_verb("Look").await?;
//! session.flush().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod debounce;
pub mod error;
pub mod keys;
pub mod notice;
mod persist;
pub mod seed;
pub mod session;
pub mod state;

// Re-exports
pub use config::SessionConfig;
pub use debounce::{DebouncedAction, SaveScheduler};
pub use error::SessionError;
pub use keys::{CellKey, ExampleKey, InFlight, InFlightGuard};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use seed::seed_rows;
pub use session::{Collaborators, EditingSession, ExampleFetch};
pub use state::{AddVerbState, CellState, RowLabelState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
