//! Multimap counting the distinct values stored under each key.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Map `key -> set of values` where the interesting quantity is the size of
/// each set.
///
/// Keys can be registered without values, so a key with a count of zero is
/// distinguishable from an unknown key.
///
/// ```
/// use ibf_requirements::usage::CountingMultimap;
///
/// let mut map: CountingMultimap<&str, u32> = CountingMultimap::new();
/// map.add_key("a");
/// assert_eq!(map.add("a", 1), 1);
/// assert_eq!(map.add("a", 2), 2);
/// assert_eq!(map.remove(&"a", &1), 1);
/// assert_eq!(map.count(&"a"), 1);
/// assert_eq!(map.count(&"b"), 0);
/// ```
#[derive(Debug, Clone)]
pub struct CountingMultimap<K, V> {
    map: HashMap<K, HashSet<V>>,
}

impl<K, V> Default for CountingMultimap<K, V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<K, V> CountingMultimap<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key with no values. Returns false if already present.
    pub fn add_key(&mut self, key: K) -> bool {
        if self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, HashSet::new());
        true
    }

    /// Stores a value under a key and returns the new count.
    ///
    /// # Panics
    /// Panics if the value is already stored under the key.
    pub fn add(&mut self, key: K, value: V) -> usize {
        let values = self.map.entry(key.clone()).or_default();
        if !values.insert(value.clone()) {
            panic!("{:?} is already stored under {:?}", value, key);
        }
        values.len()
    }

    /// Removes a value from a key and returns the new count.
    ///
    /// # Panics
    /// Panics if the value is not stored under the key.
    pub fn remove(&mut self, key: &K, value: &V) -> usize {
        let removed = self
            .map
            .get_mut(key)
            .map(|values| (values.remove(value), values.len()));
        match removed {
            Some((true, count)) => count,
            _ => panic!("{:?} is not stored under {:?}", value, key),
        }
    }

    /// Number of values stored under a key; zero for unknown keys.
    pub fn count(&self, key: &K) -> usize {
        self.map.get(key).map_or(0, HashSet::len)
    }

    /// Values stored under a key.
    pub fn values(&self, key: &K) -> impl Iterator<Item = &V> {
        self.map.get(key).into_iter().flatten()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Keys with their counts, in arbitrary order.
    pub fn counts(&self) -> impl Iterator<Item = (&K, usize)> {
        self.map.iter().map(|(key, values)| (key, values.len()))
    }

    /// Number of keys, including keys with no values.
    pub fn keys_count(&self) -> usize {
        self.map.len()
    }
}
