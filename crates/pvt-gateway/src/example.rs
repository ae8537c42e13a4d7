//! Example sentence parsing

use serde::{Deserialize, Serialize};

/// Display text shown when an example could not be generated
pub const EXAMPLE_UNAVAILABLE: &str = "Could not generate example";

/// Example sentences for one verb + preposition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentences {
    /// Sentence shown first
    pub primary: String,
    /// Further sentences, in service order
    pub secondary: Vec<String>,
}

impl ExampleSentences {
    /// Split `|`-separated service output
    ///
    /// Blank segments are dropped. Returns `None` when nothing remains.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split('|').map(str::trim).filter(|s| !s.is_empty());
        let primary = parts.next()?.to_string();
        Some(Self {
            primary,
            secondary: parts.map(str::to_string).collect(),
        })
    }

    /// Placeholder carrying [`EXAMPLE_UNAVAILABLE`]
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            primary: EXAMPLE_UNAVAILABLE.to_string(),
            secondary: Vec::new(),
        }
    }

    /// Whether this is the failure placeholder
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.primary == EXAMPLE_UNAVAILABLE && self.secondary.is_empty()
    }
}
