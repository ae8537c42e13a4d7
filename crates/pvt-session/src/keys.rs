//! Typed keys for per-cell bookkeeping
//!
//! Keys are structs rather than formatted strings, so a verb containing a
//! hyphen can never collide with another verb's column suffix.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::hash::Hash;

/// One cell of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    /// Row verb
    pub verb: String,
    /// Column index
    pub column: usize,
}

impl CellKey {
    /// Create a key
    #[inline]
    #[must_use]
    pub fn new(verb: impl Into<String>, column: usize) -> Self {
        Self {
            verb: verb.into(),
            column,
        }
    }
}

/// Verb + preposition pair used for example sentences
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExampleKey {
    /// Row verb
    pub verb: String,
    /// Preposition label
    pub preposition: String,
}

impl ExampleKey {
    /// Create a key
    #[inline]
    #[must_use]
    pub fn new(verb: impl Into<String>, preposition: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            preposition: preposition.into(),
        }
    }
}

/// Set of keys with an outstanding network call
#[derive(Debug)]
pub struct InFlight<K> {
    keys: Mutex<HashSet<K>>,
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Mutex::new(HashSet::new()),
        }
    }

    /// Claim `key`; false if it was already claimed
    pub fn try_begin(&self, key: K) -> bool {
        self.keys.lock().insert(key)
    }

    /// Release `key`
    pub fn finish(&self, key: &K) {
        self.keys.lock().remove(key);
    }

    /// Claim `key` until the returned guard is dropped
    pub fn begin(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        if self.try_begin(key.clone()) {
            Some(InFlightGuard { set: self, key })
        } else {
            None
        }
    }

    /// Whether `key` is claimed
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.keys.lock().contains(key)
    }

    /// Number of claimed keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    /// Whether nothing is claimed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }

    /// Claimed keys matching `pred`
    pub fn snapshot_where(&self, pred: impl Fn(&K) -> bool) -> Vec<K> {
        self.keys.lock().iter().filter(|k| pred(k)).cloned().collect()
    }
}

/// Releases its key on drop
#[derive(Debug)]
pub struct InFlightGuard<'a, K: Eq + Hash + Clone> {
    set: &'a InFlight<K>,
    key: K,
}

impl<K: Eq + Hash + Clone> InFlightGuard<'_, K> {
    /// Claimed key
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Eq + Hash + Clone> Drop for InFlightGuard<'_, K> {
    fn drop(&mut self) {
        self.set.finish(&self.key);
    }
}

impl<K: Eq + Hash + Clone> Default for InFlight<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_field() {
        // Concatenated without a separator, both would read "Ask10".
        let set = InFlight::new();
        assert!(set.try_begin(CellKey::new("Ask1", 0)));
        assert!(set.try_begin(CellKey::new("Ask", 10)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn begin_is_exclusive_until_finish() {
        let set = InFlight::new();
        let key = ExampleKey::new("Look", "After");
        assert!(set.try_begin(key.clone()));
        assert!(!set.try_begin(key.clone()));
        assert!(set.contains(&key));
        set.finish(&key);
        assert!(set.is_empty());
        assert!(set.try_begin(key));
    }

    #[test]
    fn guard_releases_on_drop() {
        let set = InFlight::new();
        {
            let guard = set.begin(CellKey::new("Ask", 3));
            assert!(guard.is_some());
            assert!(set.begin(CellKey::new("Ask", 3)).is_none());
        }
        assert!(set.is_empty());
    }

    #[test]
    fn snapshot_filters() {
        let set = InFlight::new();
        set.try_begin(CellKey::new("Ask", 0));
        set.try_begin(CellKey::new("Ask", 1));
        set.try_begin(CellKey::new("Be", 0));
        let mut ask = set.snapshot_where(|k| k.verb == "Ask");
        ask.sort_by_key(|k| k.column);
        assert_eq!(ask, vec![CellKey::new("Ask", 0), CellKey::new("Ask", 1)]);
    }
}
