//! Meaning-length reconciliation against the active schema

use crate::schema::PrepositionSchema;

/// How a raw meaning list was brought to schema length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Length already matched
    Unchanged,
    /// One empty slot prepended for the leading insertion column
    Prepended,
    /// Empty slots appended
    Padded(usize),
    /// Trailing meanings dropped
    Truncated(usize),
}

/// Reconcile `raw` with the length of `schema`.
///
/// Total for any input length. Once the output has schema length, applying it
/// again returns the same list.
#[must_use]
pub fn normalize(raw: &[String], schema: &PrepositionSchema) -> Vec<String> {
    normalize_with_adjustment(raw, schema).0
}

/// [`normalize`], also reporting which rule applied
#[must_use]
pub fn normalize_with_adjustment(
    raw: &[String],
    schema: &PrepositionSchema,
) -> (Vec<String>, Adjustment) {
    let target = schema.len();
    let len = raw.len();

    if len == target {
        return (raw.to_vec(), Adjustment::Unchanged);
    }

    if len + 1 == target && leading_column_was_inserted(schema) {
        let mut out = Vec::with_capacity(target);
        out.push(String::new());
        out.extend_from_slice(raw);
        return (out, Adjustment::Prepended);
    }

    if len < target {
        let mut out = raw.to_vec();
        out.resize(target, String::new());
        return (out, Adjustment::Padded(target - len));
    }

    (raw[..target].to_vec(), Adjustment::Truncated(len - target))
}

fn leading_column_was_inserted(schema: &PrepositionSchema) -> bool {
    match (schema.leading_insertion(), schema.label_at(0)) {
        (Some(inserted), Some(first)) => inserted == first,
        _ => false,
    }
}
