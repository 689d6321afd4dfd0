//! Sparse two-dimensional table.
//!
//! Stores only populated `(row, column)` cells as a map of rows, each row a
//! map of columns. Rows whose last cell is removed are pruned, so
//! [`row_count`](SparseTable::row_count) only counts rows with content.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::SparseTable;
//!
//! let mut costs = SparseTable::new();
//! costs.set("forest", "cave", 3);
//! costs.set("forest", "tower", 8);
//!
//! assert_eq!(costs.get(&"forest", &"cave"), Some(&3));
//! assert_eq!(costs.get(&"cave", &"forest"), None);
//! assert_eq!(costs.row(&"forest").count(), 2);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Map from `(row, column)` to value holding only populated cells.
#[derive(Debug, Clone)]
pub struct SparseTable<R, C, V> {
    rows: FxHashMap<R, FxHashMap<C, V>>,
    len: usize,
}

impl<R, C, V> SparseTable<R, C, V>
where
    R: Eq + Hash,
    C: Eq + Hash,
{
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            rows: FxHashMap::default(),
            len: 0,
        }
    }

    /// Stores `value` at `(row, col)`, returning the previous value.
    pub fn set(&mut self, row: R, col: C, value: V) -> Option<V> {
        let previous = self.rows.entry(row).or_default().insert(col, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns the value at `(row, col)`.
    pub fn get(&self, row: &R, col: &C) -> Option<&V> {
        self.rows.get(row)?.get(col)
    }

    /// Returns the value at `(row, col)` mutably.
    pub fn get_mut(&mut self, row: &R, col: &C) -> Option<&mut V> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Returns `true` if `(row, col)` is populated.
    pub fn contains(&self, row: &R, col: &C) -> bool {
        self.get(row, col).is_some()
    }

    /// Removes and returns the value at `(row, col)`, pruning an emptied row.
    pub fn remove(&mut self, row: &R, col: &C) -> Option<V> {
        let cells = self.rows.get_mut(row)?;
        let value = cells.remove(col)?;
        if cells.is_empty() {
            self.rows.remove(row);
        }
        self.len -= 1;
        Some(value)
    }

    /// Iterates `(column, value)` pairs of `row`.
    pub fn row(&self, row: &R) -> impl Iterator<Item = (&C, &V)> {
        self.rows.get(row).into_iter().flatten()
    }

    /// Iterates every populated `(row, column, value)` cell.
    pub fn iter(&self) -> impl Iterator<Item = (&R, &C, &V)> {
        self.rows
            .iter()
            .flat_map(|(r, cells)| cells.iter().map(move |(c, v)| (r, c, v)))
    }

    /// Returns the number of populated cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no cell is populated.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of rows with at least one cell.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Removes every cell.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.len = 0;
    }
}

impl<R: Eq + Hash, C: Eq + Hash, V> Default for SparseTable<R, C, V> {
    fn default() -> Self {
        Self::new()
    }
}
