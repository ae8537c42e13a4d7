//! Error types for the verb matrix
//!
//! Three layers of failure:
//! - Schema construction failures (deploy-time configuration mistakes)
//! - Input validation failures (bad verb names or meaning text)
//! - Matrix operation failures (duplicates, unknown verbs, bad columns)

/// Maximum verb name length, in characters
pub const MAX_VERB_CHARS: usize = 50;

/// Maximum meaning length, in characters
pub const MAX_MEANING_CHARS: usize = 200;

/// Invalid preposition schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No labels supplied
    #[error("schema has no prepositions")]
    Empty,

    /// A label is blank
    #[error("blank preposition label at column {index}")]
    BlankLabel {
        /// Column of the blank label
        index: usize,
    },

    /// The same label appears twice
    #[error("duplicate preposition label '{label}'")]
    DuplicateLabel {
        /// Repeated label
        label: String,
    },

    /// The leading insertion label is not the first column
    #[error("leading insertion '{label}' is not the first column")]
    LeadingInsertionMismatch {
        /// Configured leading label
        label: String,
    },
}

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Verb name is empty after trimming
    #[error("please enter a verb name")]
    EmptyVerb,

    /// Verb name exceeds the length limit
    #[error("verb name is {len} characters, limit is {MAX_VERB_CHARS}")]
    VerbTooLong {
        /// Length in characters
        len: usize,
    },

    /// Verb name contains something other than letters and spaces
    #[error("verb name '{verb}' may only contain letters and spaces")]
    InvalidVerbCharacters {
        /// Rejected name
        verb: String,
    },

    /// Meaning exceeds the length limit
    #[error("meaning is {len} characters, limit is {MAX_MEANING_CHARS}")]
    MeaningTooLong {
        /// Length in characters
        len: usize,
    },
}

/// Matrix operation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Input failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Verb already exists (case-insensitive)
    #[error("the verb '{verb}' already exists")]
    Duplicate {
        /// Name as supplied
        verb: String,
    },

    /// Column index outside the schema
    #[error("column {index} out of range (schema has {len} columns)")]
    ColumnOutOfRange {
        /// Requested column
        index: usize,
        /// Number of columns in the schema
        len: usize,
    },

    /// Verb not present in the matrix
    #[error("unknown verb '{verb}'")]
    UnknownVerb {
        /// Name looked up
        verb: String,
    },
}

impl MatrixError {
    /// Whether this error should be shown to the user as a notice.
    ///
    /// Column range errors are programming defects and stay in the logs.
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Duplicate { .. })
    }
}
