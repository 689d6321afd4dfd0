//! Set of items keyed by a label derived from each item.
//!
//! Items implement [`Labeled`]; at most one item per label is kept and
//! inserting an item whose label is taken replaces (and returns) the old one.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::{LabelSet, Labeled};
//!
//! #[derive(Debug, PartialEq)]
//! struct Check {
//!     name: &'static str,
//!     item: u16,
//! }
//!
//! impl Labeled for Check {
//!     type Label = &'static str;
//!
//!     fn label(&self) -> &'static str {
//!         self.name
//!     }
//! }
//!
//! let mut checks = LabelSet::new();
//! checks.insert(Check { name: "lake", item: 3 });
//! let old = checks.insert(Check { name: "lake", item: 9 });
//!
//! assert_eq!(old, Some(Check { name: "lake", item: 3 }));
//! assert_eq!(checks.get(&"lake").map(|c| c.item), Some(9));
//! assert_eq!(checks.len(), 1);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Items that expose a label used as their identity in a [`LabelSet`].
pub trait Labeled {
    /// Label type.
    type Label: Eq + Hash + Clone;

    /// Returns this item's label.
    fn label(&self) -> Self::Label;
}

/// Set of [`Labeled`] items, unique by label.
pub struct LabelSet<T: Labeled> {
    items: FxHashMap<T::Label, T>,
}

impl<T: Labeled> LabelSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            items: FxHashMap::default(),
        }
    }

    /// Inserts `item`, returning the item previously holding its label.
    pub fn insert(&mut self, item: T) -> Option<T> {
        self.items.insert(item.label(), item)
    }

    /// Returns the item labelled `label`.
    pub fn get(&self, label: &T::Label) -> Option<&T> {
        self.items.get(label)
    }

    /// Returns `true` if an item is labelled `label`.
    pub fn contains(&self, label: &T::Label) -> bool {
        self.items.contains_key(label)
    }

    /// Removes and returns the item labelled `label`.
    pub fn remove(&mut self, label: &T::Label) -> Option<T> {
        self.items.remove(label)
    }

    /// Iterates the labels in arbitrary order.
    pub fn labels(&self) -> impl Iterator<Item = &T::Label> {
        self.items.keys()
    }

    /// Iterates the items in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Labeled> Default for LabelSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LabelSet<T>
where
    T: Labeled + fmt::Debug,
    T::Label: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.items.iter()).finish()
    }
}

impl<T: Labeled + Clone> Clone for LabelSet<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: Labeled> FromIterator<T> for LabelSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}
