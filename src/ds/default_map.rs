//! Hash map that manufactures a value on first miss.
//!
//! [`DefaultMap::get`] never reports a miss: an absent key is handed to the
//! supplier, the result is stored, and a reference to the stored value is
//! returned. The supplier runs at most once per key.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::DefaultMap;
//!
//! let mut by_area: DefaultMap<&str, Vec<&str>> = DefaultMap::new();
//! by_area.get("forest").push("chest_1");
//! by_area.get("forest").push("chest_2");
//! by_area.get("cave").push("chest_3");
//!
//! assert_eq!(by_area.sorted_keys(), vec!["cave", "forest"]);
//! assert_eq!(by_area.peek("forest").map(Vec::len), Some(2));
//! assert_eq!(by_area.peek("swamp"), None);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Supplier used by [`DefaultMap::new`].
pub type DefaultSupplier<K, V> = fn(&K) -> V;

fn supply_default<K, V: Default>(_: &K) -> V {
    V::default()
}

/// Key → value map with a supplier for missing keys.
pub struct DefaultMap<K, V, F = DefaultSupplier<K, V>> {
    map: FxHashMap<K, V>,
    supplier: F,
}

impl<K, V> DefaultMap<K, V>
where
    K: Eq + Hash,
    V: Default,
{
    /// Creates an empty map that supplies `V::default()` for missing keys.
    pub fn new() -> Self {
        Self::with_supplier(supply_default::<K, V>)
    }
}

impl<K, V> Default for DefaultMap<K, V>
where
    K: Eq + Hash,
    V: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, F> DefaultMap<K, V, F>
where
    K: Eq + Hash,
    F: FnMut(&K) -> V,
{
    /// Creates an empty map that calls `supplier` for missing keys.
    pub fn with_supplier(supplier: F) -> Self {
        Self {
            map: FxHashMap::default(),
            supplier,
        }
    }

    /// Returns the value for `key`, supplying and storing one if absent.
    pub fn get(&mut self, key: K) -> &mut V {
        let supplier = &mut self.supplier;
        self.map.entry(key).or_insert_with_key(|k| supplier(k))
    }

    /// Returns the stored value for `key` without supplying one.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Returns the stored value for `key` mutably, without supplying one.
    pub fn peek_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get_mut(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    /// Removes and returns the stored value for `key`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Returns `true` if a value is stored for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every entry. The supplier is kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates stored entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }

    /// Iterates stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) {
        self.map.retain(keep);
    }

    /// Snapshot of the keys ordered by `cmp`.
    pub fn sorted_keys_by(&self, mut cmp: impl FnMut(&K, &K) -> Ordering) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys: Vec<K> = self.map.keys().cloned().collect();
        keys.sort_by(|a, b| cmp(a, b));
        keys
    }

    /// Snapshot of the keys in ascending order.
    pub fn sorted_keys(&self) -> Vec<K>
    where
        K: Clone + Ord,
    {
        self.sorted_keys_by(K::cmp)
    }

    /// Snapshot of the entries ordered by `cmp`.
    pub fn sorted_entries_by(
        &self,
        mut cmp: impl FnMut((&K, &V), (&K, &V)) -> Ordering,
    ) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut entries: Vec<(&K, &V)> = self.map.iter().collect();
        entries.sort_by(|a, b| cmp(*a, *b));
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Snapshot of the entries in ascending key order.
    pub fn sorted_entries(&self) -> Vec<(K, V)>
    where
        K: Clone + Ord,
        V: Clone,
    {
        self.sorted_entries_by(|a, b| a.0.cmp(b.0))
    }

    pub(crate) fn raw(&self) -> &FxHashMap<K, V> {
        &self.map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, F> fmt::Debug for DefaultMap<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}
