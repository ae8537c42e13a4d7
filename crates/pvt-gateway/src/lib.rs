//! PVT Gateway - external collaborators
//!
//! Narrow async interfaces to everything outside the process:
//! - [`RowStore`]: per-user verb rows keyed by `(user_id, verb)`
//! - [`TranslationService`] / [`ExampleService`]: text generation endpoints
//! - [`AuthProvider`]: the signed-in user
//!
//! Adapters: [`InMemoryRowStore`], [`RestRowStore`], [`EdgeFunctionClient`],
//! [`StaticAuth`]. [`migrate_user`] runs a schema migration over one user's
//! rows.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod auth;
pub mod error;
pub mod example;
pub mod memory;
pub mod migrate;
pub mod rest;
pub mod traits;

// Re-exports
pub use auth::{AuthSession, StaticAuth};
pub use error::GatewayError;
pub use example::{ExampleSentences, EXAMPLE_UNAVAILABLE};
pub use memory::{InMemoryRowStore, StoreStats};
pub use migrate::{migrate_user, MigrationReport};
pub use rest::{EdgeFunctionClient, RestRowStore, ServiceEndpoint};
pub use traits::{
    AuthProvider, ExampleRequest, ExampleService, RowStore, TranslationRequest,
    TranslationService,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
