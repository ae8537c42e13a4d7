//! PVT Matrix - verb/preposition meaning grid
//!
//! The testable core of the phrasal verb table:
//! - [`PrepositionSchema`]: ordered column labels for one schema version
//! - [`normalize`]: reconciles stored rows with the active schema
//! - [`VerbMatrix`]: per-user rows with validation and locale ordering
//! - [`SchemaMigration`]: version-guarded column insertion
//!
//! # Example
//!
//! ```rust
//! use pvt_matrix::{PrepositionSchema, VerbMatrix};
//! use std::sync::Arc;
//!
//! let mut matrix = VerbMatrix::new(Arc::new(PrepositionSchema::current()));
//! matrix.add_verb("Zebra").unwrap();
//! matrix.add_verb("Apple").unwrap();
//! matrix.set_meaning("Apple", 0, "Sobre manzanas").unwrap();
//!
//! assert_eq!(matrix.verbs().collect::<Vec<_>>(), vec!["Apple", "Zebra"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod collation;
pub mod error;
pub mod matrix;
pub mod migration;
pub mod normalize;
pub mod row;
pub mod schema;
pub mod validation;

// Re-exports
pub use collation::locale_cmp;
pub use error::{MatrixError, SchemaError, ValidationError, MAX_MEANING_CHARS, MAX_VERB_CHARS};
pub use matrix::VerbMatrix;
pub use migration::{MigrationDecision, SchemaMigration};
pub use normalize::{normalize, normalize_with_adjustment, Adjustment};
pub use row::{StoredRow, VerbRow};
pub use schema::{PrepositionSchema, SchemaVersion};
pub use validation::{validate_meaning, validate_verb};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the matrix
    pub use crate::{
        MatrixError, PrepositionSchema, SchemaVersion, StoredRow, ValidationError, VerbMatrix,
        VerbRow,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
