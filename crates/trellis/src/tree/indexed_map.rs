//! An insertion-ordered map with positional lookup.
//!
//! [`IndexedMap`] is the child container used by configuration nodes. It
//! behaves like a map keyed by `String`, but additionally remembers the order
//! keys were first inserted in and can answer "what is at row N?" in O(1).
//! Row order is the canonical display order for a node's children.

use std::collections::HashMap;

/// An insertion-ordered `String`-keyed map with O(1) lookup by key and by
/// position.
///
/// Invariant: `index_to_key` and `key_to_index` always describe the same
/// bijection, and index order equals first-insertion order. Re-inserting an
/// existing key replaces its value but keeps its original position.
///
/// There is deliberately no removal operation: configuration trees are
/// append/update-only, so positions handed out to a view stay stable.
///
/// # Example
///
/// ```
/// use trellis::tree::IndexedMap;
///
/// let mut map = IndexedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert("c", 3);
///
/// assert_eq!(map.value_at(2), Some(&3));
/// assert_eq!(map.key_at(2), Some("c"));
/// assert_eq!(map.index_of("b"), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexedMap<T> {
    index_to_key: Vec<String>,
    key_to_index: HashMap<String, usize>,
    values: Vec<T>,
}

impl<T> IndexedMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            index_to_key: Vec::new(),
            key_to_index: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Insert or replace the value under `key`.
    ///
    /// A new key is appended at the end of the order; an existing key keeps
    /// its position. Returns the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        let key = key.into();
        match self.key_to_index.get(&key) {
            Some(&index) => Some(std::mem::replace(&mut self.values[index], value)),
            None => {
                let index = self.values.len();
                self.key_to_index.insert(key.clone(), index);
                self.index_to_key.push(key);
                self.values.push(value);
                None
            }
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.key_to_index.get(key).map(|&i| &self.values[i])
    }

    /// Look up a value mutably by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.key_to_index.get(key) {
            Some(&i) => Some(&mut self.values[i]),
            None => None,
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.key_to_index.contains_key(key)
    }

    /// The position of `key` in insertion order.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.key_to_index.get(key).copied()
    }

    /// The key stored at position `index`.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.index_to_key.get(index).map(String::as_str)
    }

    /// The value stored at position `index`.
    pub fn value_at(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.index_to_key
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index_to_key.iter().map(String::as_str)
    }

    /// Iterate values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut map = IndexedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(map.index_of("c"), Some(2));
        assert_eq!(map.key_at(1), Some("b"));
        assert_eq!(map.value_at(0), Some(&1));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = IndexedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        let old = map.insert("a", 10);
        assert_eq!(old, Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map.index_of("a"), Some(0));
        assert_eq!(map.get("a"), Some(&10));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let mut map = IndexedMap::new();
        map.insert("a", 1);

        assert_eq!(map.value_at(5), None);
        assert_eq!(map.key_at(5), None);
        assert_eq!(map.index_of("missing"), None);
    }

    #[test]
    fn test_iter_pairs() {
        let mut map = IndexedMap::new();
        map.insert("x", "ex");
        map.insert("y", "why");

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("x", &"ex"), ("y", &"why")]);
    }
}
