//! Key → set-of-values multimap with revalidating per-key views.
//!
//! The multimap owns one hash set per key and keeps a running total of all
//! values. A key whose set becomes empty is pruned on the spot, so the map
//! never holds an empty set.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                      SetMultimap<K, V>                               │
//!   │                                                                      │
//!   │   map: FxHashMap<K, FxHashSet<V>>        len: usize (running total)  │
//!   │   ┌─────────┬──────────────┐                                         │
//!   │   │ "cave"  │ {1, 4, 9}    │                                         │
//!   │   │ "tower" │ {2}          │            len = 4                      │
//!   │   └─────────┴──────────────┘                                         │
//!   │                                                                      │
//!   │   SetViewMut { owner: &mut SetMultimap, key: "tower" }               │
//!   │      remove(&2) → resolve map["tower"] → remove → len -= 1           │
//!   │                 → set empty → map.remove("tower")                    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Views
//!
//! [`get`](SetMultimap::get) and [`get_mut`](SetMultimap::get_mut) return
//! views that hold only a reference to the owning multimap and the key. Each
//! call on a view looks the backing set up again, so a view never observes a
//! set that has been pruned or replaced: a pruned set is dropped together with
//! its map entry and the next lookup through any view finds the key absent.
//! An absent key behaves as an empty set; inserting through its view creates
//! the entry.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::SetMultimap;
//!
//! let mut exits = SetMultimap::new();
//! exits.insert("cave", 1);
//! exits.insert("cave", 4);
//! exits.insert("tower", 2);
//! assert_eq!(exits.len(), 3);
//!
//! let mut tower = exits.get_mut("tower");
//! assert!(tower.remove(&2));
//! assert!(tower.is_empty());
//! assert!(!tower.contains(&2));
//!
//! assert_eq!(exits.len(), 2);
//! assert_eq!(exits.key_count(), 1);
//! assert!(exits.get(&"tower").is_empty());
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::InvariantError;

/// Map from key to a non-empty set of values, tracking the total value count.
pub struct SetMultimap<K, V> {
    map: FxHashMap<K, FxHashSet<V>>,
    len: usize,
}

impl<K, V> SetMultimap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    /// Creates an empty multimap.
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            len: 0,
        }
    }

    /// Returns the total number of values across all keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of keys with at least one value.
    pub fn key_count(&self) -> usize {
        self.map.len()
    }

    /// Adds `value` under `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Clone,
    {
        self.get_mut(key).insert(value)
    }

    /// Returns `true` if `value` is stored under `key`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).is_some_and(|set| set.contains(value))
    }

    /// Removes `value` from `key`'s set, pruning the key if it empties.
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(set) = self.map.get_mut(key) else {
            return false;
        };
        if !set.remove(value) {
            return false;
        }
        let emptied = set.is_empty();
        self.len -= 1;
        if emptied {
            self.map.remove(key);
            trace!("set multimap pruned emptied key");
        }
        true
    }

    /// Removes `key` and returns its values.
    pub fn remove_key<Q>(&mut self, key: &Q) -> Option<FxHashSet<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let set = self.map.remove(key)?;
        self.len -= set.len();
        Some(set)
    }

    /// Returns a read-only view of `key`'s values.
    ///
    /// `key` may be any borrowed form of `K`, such as `&str` for `String` keys.
    pub fn get<'a, Q>(&'a self, key: &'a Q) -> SetView<'a, K, V, Q>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        SetView { owner: self, key }
    }

    /// Returns a mutable view of `key`'s values.
    pub fn get_mut(&mut self, key: K) -> SetViewMut<'_, K, V> {
        SetViewMut { owner: self, key }
    }

    /// Iterates the keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Iterates every `(key, value)` pair in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map
            .iter()
            .flat_map(|(key, set)| set.iter().map(move |value| (key, value)))
    }

    /// Iterates each key with its backing set.
    pub fn sets(&self) -> impl Iterator<Item = (&K, &FxHashSet<V>)> {
        self.map.iter()
    }

    /// Removes every key and value.
    pub fn clear(&mut self) {
        self.map.clear();
        self.len = 0;
    }

    /// Checks that no set is empty and that the running total is exact.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.values().any(FxHashSet::is_empty) {
            return Err(InvariantError::new("multimap holds an empty set"));
        }
        let total: usize = self.map.values().map(FxHashSet::len).sum();
        if total != self.len {
            return Err(InvariantError::new(format!(
                "multimap total {} does not match stored values {}",
                self.len, total
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

impl<K: Eq + Hash, V: Eq + Hash> Default for SetMultimap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SetMultimap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetMultimap")
            .field("len", &self.len)
            .field("map", &self.map)
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for SetMultimap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SetMultimap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Read-only view of one key's values in a [`SetMultimap`].
///
/// `Q` is the form the key was looked up with; it defaults to `K`.
pub struct SetView<'a, K, V, Q: ?Sized = K> {
    owner: &'a SetMultimap<K, V>,
    key: &'a Q,
}

impl<'a, K, V, Q> SetView<'a, K, V, Q>
where
    K: Eq + Hash + Borrow<Q>,
    V: Eq + Hash,
    Q: Hash + Eq + ?Sized,
{
    fn resolve(&self) -> Option<&'a FxHashSet<V>> {
        self.owner.map.get(self.key)
    }

    /// Returns the key this view resolves.
    pub fn key(&self) -> &Q {
        self.key
    }

    /// Returns `true` if `value` is stored under the key.
    pub fn contains(&self, value: &V) -> bool {
        self.resolve().is_some_and(|set| set.contains(value))
    }

    /// Returns the number of values under the key.
    pub fn len(&self) -> usize {
        self.resolve().map_or(0, FxHashSet::len)
    }

    /// Returns `true` if the key has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the key's values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &'a V> + use<'a, K, V, Q> {
        self.resolve().into_iter().flatten()
    }
}

/// Mutable view of one key's values in a [`SetMultimap`].
///
/// Mutations keep the owner's running total in step and prune the key when
/// its set empties.
pub struct SetViewMut<'a, K, V> {
    owner: &'a mut SetMultimap<K, V>,
    key: K,
}

impl<K, V> SetViewMut<'_, K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    fn resolve(&self) -> Option<&FxHashSet<V>> {
        self.owner.map.get(&self.key)
    }

    /// Returns the key this view resolves.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns `true` if `value` is stored under the key.
    pub fn contains(&self, value: &V) -> bool {
        self.resolve().is_some_and(|set| set.contains(value))
    }

    /// Returns the number of values under the key.
    pub fn len(&self) -> usize {
        self.resolve().map_or(0, FxHashSet::len)
    }

    /// Returns `true` if the key has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the key's values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.resolve().into_iter().flatten()
    }

    /// Adds `value`; returns `false` if it was already present.
    pub fn insert(&mut self, value: V) -> bool
    where
        K: Clone,
    {
        let inserted = match self.owner.map.get_mut(&self.key) {
            Some(set) => set.insert(value),
            None => {
                let mut set = FxHashSet::default();
                set.insert(value);
                self.owner.map.insert(self.key.clone(), set);
                true
            },
        };
        if inserted {
            self.owner.len += 1;
        }
        inserted
    }

    /// Removes `value`; returns `false` if it was absent.
    pub fn remove(&mut self, value: &V) -> bool {
        self.owner.remove(&self.key, value)
    }

    /// Keeps only the values for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&V) -> bool) {
        let Some(set) = self.owner.map.get_mut(&self.key) else {
            return;
        };
        let before = set.len();
        set.retain(keep);
        let after = set.len();
        self.owner.len -= before - after;
        if after == 0 {
            self.owner.map.remove(&self.key);
            trace!("set multimap pruned emptied key");
        }
    }

    /// Removes every value under the key, returning how many there were.
    pub fn clear(&mut self) -> usize {
        self.owner
            .remove_key(&self.key)
            .map_or(0, |set| set.len())
    }
}
