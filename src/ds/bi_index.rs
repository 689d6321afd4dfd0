//! One-to-one map between `usize` indices and values.
//!
//! Keeps a forward (`index → value`) and a reverse (`value → index`) map in
//! lockstep. Inserts that would bind an index or a value twice fail with
//! [`IndexError`] instead of overwriting, so the relation stays bijective.
//!
//! [`intern`](BiIndex::intern) gives interner semantics: it returns the
//! existing index of a value or assigns the next free one. Freed indices are
//! never handed out again; once `usize::MAX` is bound, `push` and `intern`
//! fail with [`IndexError::Exhausted`].
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::BiIndex;
//! use shufflekit::error::IndexError;
//!
//! let mut items = BiIndex::new();
//! let bow = items.intern("bow".to_string())?;
//! let hook = items.intern("hookshot".to_string())?;
//! assert_eq!(items.intern("bow".to_string()), Ok(bow));
//!
//! assert_eq!(items.get(hook).map(String::as_str), Some("hookshot"));
//! assert_eq!(items.index_of("bow"), Ok(bow));
//! assert_eq!(items.insert(bow, "bombs".to_string()), Err(IndexError::DuplicateIndex(bow)));
//! # Ok::<(), IndexError>(())
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{IndexError, InvariantError};

/// Bijective `usize` ↔ `T` index.
#[derive(Debug, Clone)]
pub struct BiIndex<T> {
    by_index: FxHashMap<usize, T>,
    by_value: FxHashMap<T, usize>,
    /// Next index `push`/`intern` assign; `None` once `usize::MAX` is bound.
    next: Option<usize>,
}

impl<T> BiIndex<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            by_index: FxHashMap::default(),
            by_value: FxHashMap::default(),
            next: Some(0),
        }
    }

    /// Binds `value` to the next free index.
    ///
    /// Fails with [`IndexError::DuplicateValue`] if `value` is already bound
    /// and with [`IndexError::Exhausted`] if no index is left.
    pub fn push(&mut self, value: T) -> Result<usize, IndexError> {
        if let Some(&idx) = self.by_value.get(&value) {
            return Err(IndexError::DuplicateValue(idx));
        }
        let idx = self.next.ok_or(IndexError::Exhausted)?;
        self.bind(idx, value);
        Ok(idx)
    }

    /// Binds `value` to `index`.
    ///
    /// Fails if either side is already bound.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexError> {
        if self.by_index.contains_key(&index) {
            return Err(IndexError::DuplicateIndex(index));
        }
        if let Some(&idx) = self.by_value.get(&value) {
            return Err(IndexError::DuplicateValue(idx));
        }
        self.bind(index, value);
        Ok(())
    }

    /// Returns the index of `value`, binding it to the next free index if new.
    ///
    /// Fails with [`IndexError::Exhausted`] only when `value` is new and no
    /// index is left.
    pub fn intern(&mut self, value: T) -> Result<usize, IndexError> {
        if let Some(&idx) = self.by_value.get(&value) {
            return Ok(idx);
        }
        let idx = self.next.ok_or(IndexError::Exhausted)?;
        self.bind(idx, value);
        Ok(idx)
    }

    fn bind(&mut self, index: usize, value: T) {
        self.by_value.insert(value.clone(), index);
        self.by_index.insert(index, value);
        if self.next.is_some_and(|next| index >= next) {
            self.next = index.checked_add(1);
        }
    }

    /// Returns the value bound to `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.by_index.get(&index)
    }

    /// Returns the index bound to `value`.
    pub fn index_of<Q>(&self, value: &Q) -> Result<usize, IndexError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_value.get(value).copied().ok_or(IndexError::Missing)
    }

    /// Returns `true` if `value` is bound.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_value.contains_key(value)
    }

    /// Unbinds `index`, returning its value.
    pub fn remove_index(&mut self, index: usize) -> Option<T> {
        let value = self.by_index.remove(&index)?;
        self.by_value.remove(&value);
        Some(value)
    }

    /// Unbinds `value`, returning its index.
    pub fn remove_value<Q>(&mut self, value: &Q) -> Result<usize, IndexError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.by_value.remove(value).ok_or(IndexError::Missing)?;
        self.by_index.remove(&idx);
        Ok(idx)
    }

    /// Returns the number of bound pairs.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Iterates `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        let mut pairs: Vec<(usize, &T)> = self.by_index.iter().map(|(&i, v)| (i, v)).collect();
        pairs.sort_unstable_by_key(|&(i, _)| i);
        pairs.into_iter()
    }

    /// Checks that both directions agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.by_index.len() != self.by_value.len() {
            return Err(InvariantError::new(format!(
                "forward map has {} entries, reverse map has {}",
                self.by_index.len(),
                self.by_value.len()
            )));
        }
        for (&idx, value) in &self.by_index {
            if self.by_value.get(value) != Some(&idx) {
                return Err(InvariantError::new(format!(
                    "index {idx} is not mirrored in the reverse map"
                )));
            }
            if let Some(next) = self.next
                && idx >= next
            {
                return Err(InvariantError::new(format!(
                    "index {idx} is not below the next free index {next}"
                )));
            }
        }
        Ok(())
    }
}

impl<T: Eq + Hash + Clone> Default for BiIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
