//! Input validation for verb names and meanings
//!
//! Lengths are counted in characters, not bytes, so accented meanings such as
//! "Estar enfermo de" are measured the way a user reads them.

use crate::error::{ValidationError, MAX_MEANING_CHARS, MAX_VERB_CHARS};

/// Validate a verb name and return it trimmed
///
/// # Errors
/// - `ValidationError::EmptyVerb` if nothing is left after trimming
/// - `ValidationError::VerbTooLong` above the character limit
/// - `ValidationError::InvalidVerbCharacters` for anything but letters and spaces
pub fn validate_verb(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyVerb);
    }

    let len = trimmed.chars().count();
    if len > MAX_VERB_CHARS {
        return Err(ValidationError::VerbTooLong { len });
    }

    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(ValidationError::InvalidVerbCharacters {
            verb: trimmed.to_string(),
        });
    }

    Ok(trimmed)
}

/// Validate meaning text
///
/// # Errors
/// `ValidationError::MeaningTooLong` above the character limit
pub fn validate_meaning(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > MAX_MEANING_CHARS {
        return Err(ValidationError::MeaningTooLong { len });
    }
    Ok(())
}
