//! Ordered map type for decoded mappings.
//!
//! This module provides [`YamlMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for mapping entries. Keys are unique within one
//! mapping; inserting an existing key replaces the value but keeps the
//! original position, which gives duplicate keys in input documents
//! last-write-wins behavior.
//!
//! ## Why IndexMap?
//!
//! `IndexMap` instead of `HashMap` ensures:
//!
//! - **Deterministic output**: re-encoding a decoded document preserves the
//!   original entry order
//! - **Iteration order**: entries are iterated in insertion order
//! - **Compatibility**: predictable output makes testing and diffing easy
//!
//! ## Examples
//!
//! ```rust
//! use serde_yamlite::{YamlMap, Value};
//!
//! let mut map = YamlMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to values.
///
/// A thin wrapper around [`IndexMap`] that maintains insertion order, which
/// is what makes re-encoding deterministic.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{YamlMap, Value};
///
/// let mut map = YamlMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YamlMap(IndexMap<String, crate::Value>);

impl YamlMap {
    /// Creates an empty `YamlMap`.
    #[must_use]
    pub fn new() -> Self {
        YamlMap(IndexMap::new())
    }

    /// Creates an empty `YamlMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        YamlMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the entry keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yamlite::{YamlMap, Value};
    ///
    /// let mut map = YamlMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for YamlMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        YamlMap(map.into_iter().collect())
    }
}

impl From<YamlMap> for HashMap<String, crate::Value> {
    fn from(map: YamlMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for YamlMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a YamlMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for YamlMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        YamlMap(IndexMap::from_iter(iter))
    }
}
