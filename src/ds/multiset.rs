//! Element-count multiset.
//!
//! Built on [`DefaultMap`] with a zero default. Counts that drop to zero are
//! removed from the backing map immediately, so every stored count is
//! positive and [`unique`](CountingMultiset::unique) is just the map length.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::CountingMultiset;
//!
//! let mut drops: CountingMultiset<&str> = ["rupee", "rupee", "heart"].into_iter().collect();
//! assert_eq!(drops.count(&"rupee"), 2);
//! assert_eq!(drops.unique(), 2);
//!
//! drops.delete(&"heart");
//! assert_eq!(drops.count(&"heart"), 0);
//! assert_eq!(drops.unique(), 1);
//! assert_eq!(drops.total(), 2);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::ds::default_map::DefaultMap;
use crate::error::InvariantError;

/// Multiset storing a positive occurrence count per distinct element.
pub struct CountingMultiset<T> {
    counts: DefaultMap<T, usize>,
}

impl<T> CountingMultiset<T>
where
    T: Eq + Hash,
{
    /// Creates an empty multiset.
    pub fn new() -> Self {
        Self {
            counts: DefaultMap::new(),
        }
    }

    /// Adds one occurrence of `elem`, returning its new count.
    pub fn add(&mut self, elem: T) -> usize {
        self.add_many(elem, 1)
    }

    /// Adds `n` occurrences of `elem`, returning its new count.
    ///
    /// Adding zero occurrences never creates an entry.
    pub fn add_many(&mut self, elem: T, n: usize) -> usize {
        if n == 0 {
            return self.count(&elem);
        }
        let count = self.counts.get(elem);
        *count += n;
        *count
    }

    /// Removes one occurrence of `elem`, returning the remaining count.
    ///
    /// The entry is dropped entirely once its count reaches zero; deleting an
    /// absent element is a no-op returning zero.
    pub fn delete<Q>(&mut self, elem: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(count) = self.counts.peek_mut(elem) else {
            return 0;
        };
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(elem);
        }
        remaining
    }

    /// Removes every occurrence of `elem`, returning how many there were.
    pub fn delete_all<Q>(&mut self, elem: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.remove(elem).unwrap_or(0)
    }

    /// Returns the count of `elem`, zero if absent.
    pub fn count<Q>(&self, elem: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.peek(elem).copied().unwrap_or(0)
    }

    /// Returns `true` if `elem` occurs at least once.
    pub fn contains<Q>(&self, elem: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.contains_key(elem)
    }

    /// Returns the number of distinct elements.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, &count)| count).sum()
    }

    /// Returns `true` if no element occurs.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Iterates `(element, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.counts.iter().map(|(elem, &count)| (elem, count))
    }

    /// Elements ordered by descending count; ties keep ascending element order.
    pub fn most_common(&self) -> Vec<(T, usize)>
    where
        T: Clone + Ord,
    {
        self.counts
            .sorted_entries_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
    }

    /// Checks that no zero count is stored.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.counts.raw().values().any(|&count| count == 0) {
            return Err(InvariantError::new("multiset stores a zero count"));
        }
        Ok(())
    }
}

impl<T: Eq + Hash> Default for CountingMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CountingMultiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.counts, f)
    }
}

impl<T: Eq + Hash> FromIterator<T> for CountingMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash> Extend<T> for CountingMultiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.add(elem);
        }
    }
}
