//! Growable ring-buffer deque with random access and splicing.
//!
//! Stores elements in a power-of-two slot array addressed through a `start`
//! cursor and a length. Both ends support amortized O(1) insertion and
//! removal; the occupied region may wrap past the physical end of the buffer.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          RingDeque<T>                                │
//!   │                                                                      │
//!   │   buf: Vec<Option<T>>  (capacity = mask + 1, power of two, >= 16)    │
//!   │                                                                      │
//!   │   physical:  0    1    2    3    4    5    6    7  ...   14   15     │
//!   │            ┌────┬────┬────┬────┬────┬────┬────┬────┬───┬────┬────┐   │
//!   │            │ d  │ e  │    │    │    │    │    │    │   │ b  │ c  │   │
//!   │            └────┴────┴────┴────┴────┴────┴────┴────┴───┴────┴────┘   │
//!   │              ▲ head fragment                         tail  ▲         │
//!   │                                                   fragment │         │
//!   │   start = 14, len = 4    logical order: b c d e              │       │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Growth
//!
//! ```text
//!   upsize(target) while capacity < target:
//!     1. double the slot array (new upper half is empty)
//!     2. occupied range wraps?
//!          YES → bulk-swap buf[start..old_cap] into buf[old_cap + start..]
//!                and advance start by old_cap
//!          NO  → nothing moves
//! ```
//!
//! Growth moves the tail fragment as one slice swap; element values are
//! never cloned or rewritten one by one. The deque never shrinks.
//!
//! ## Splicing
//!
//! [`splice`](RingDeque::splice) picks one of three strategies:
//!
//! | Edit touches   | Strategy                                         |
//! |----------------|--------------------------------------------------|
//! | head boundary  | pop from the front, move `start` back, write     |
//! | tail boundary  | take from the back, append                       |
//! | interior only  | materialize, `Vec::splice`, rewrite from slot 0  |
//!
//! ## Performance Characteristics
//!
//! | Operation          | Time        | Notes                              |
//! |--------------------|-------------|------------------------------------|
//! | `push_back/front`  | O(1) amort. | Doubling growth                    |
//! | `pop_back/front`   | O(1)        |                                    |
//! | `get`              | O(1)        | Masked index arithmetic            |
//! | `slice`            | O(k)        | Two contiguous copies at most      |
//! | `splice` (ends)    | O(k + m)    | k removed, m inserted              |
//! | `splice` (middle)  | O(n)        | Full rewrite                       |
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::RingDeque;
//!
//! let mut deque = RingDeque::new();
//! deque.push_back(2);
//! deque.push_back(3);
//! deque.push_front(1);
//!
//! assert_eq!(deque.slice(0, None), vec![1, 2, 3]);
//! assert_eq!(deque.slice(-2, None), vec![2, 3]);
//! assert_eq!(deque.get(1), Some(&2));
//!
//! let removed = deque.splice(1, 1, [20, 21]);
//! assert_eq!(removed, vec![2]);
//! assert_eq!(deque.slice(0, None), vec![1, 20, 21, 3]);
//!
//! assert_eq!(deque.pop_front(), Some(1));
//! assert_eq!(deque.pop_back(), Some(3));
//! ```
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use log::debug;

/// Smallest slot array a deque ever allocates.
pub const MIN_CAPACITY: usize = 16;

/// Double-ended, randomly indexable sequence backed by a growable ring buffer.
///
/// Occupied slots are exactly the logical range `[start, start + len)` taken
/// modulo the capacity; every other slot is `None`.
#[derive(Clone)]
pub struct RingDeque<T> {
    buf: Vec<Option<T>>,
    mask: usize,
    start: usize,
    len: usize,
}

impl<T> RingDeque<T> {
    /// Creates an empty deque with the minimum capacity.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty deque able to hold `capacity` elements without growing.
    ///
    /// The capacity is rounded up to a power of two, and to at least
    /// [`MIN_CAPACITY`].
    ///
    /// ```
    /// use shufflekit::ds::RingDeque;
    ///
    /// assert_eq!(RingDeque::<u8>::with_capacity(0).capacity(), 16);
    /// assert_eq!(RingDeque::<u8>::with_capacity(100).capacity(), 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY).next_power_of_two();
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self {
            buf,
            mask: capacity - 1,
            start: 0,
            len: 0,
        }
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn physical(&self, offset: usize) -> usize {
        (self.start + offset) & self.mask
    }

    /// Grows the backing buffer until it can hold `target` elements.
    ///
    /// Each step doubles the slot array. When the occupied range wraps past
    /// the old physical end, the wrapped-around tail fragment is moved into
    /// the new upper half with a single slice swap and `start` advances by
    /// the old capacity, so logical order is preserved.
    pub fn upsize(&mut self, target: usize) {
        while self.capacity() < target {
            let old_cap = self.capacity();
            self.buf.resize_with(old_cap * 2, || None);
            if self.start + self.len > old_cap {
                let (lower, upper) = self.buf.split_at_mut(old_cap);
                lower[self.start..].swap_with_slice(&mut upper[self.start..]);
                self.start += old_cap;
            }
            self.mask = old_cap * 2 - 1;
            debug!(
                "ring deque grew: capacity {} -> {} (len {})",
                old_cap,
                self.capacity(),
                self.len
            );
        }
    }

    /// Appends `value` at the back.
    pub fn push_back(&mut self, value: T) {
        self.upsize(self.len + 1);
        let idx = self.physical(self.len);
        self.buf[idx] = Some(value);
        self.len += 1;
    }

    /// Prepends `value` at the front.
    pub fn push_front(&mut self, value: T) {
        self.upsize(self.len + 1);
        self.start = (self.start + self.mask) & self.mask;
        self.buf[self.start] = Some(value);
        self.len += 1;
    }

    /// Appends every value from `values` at the back, in order.
    pub fn extend_back<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let values = values.into_iter();
        self.upsize(self.len + values.size_hint().0);
        for value in values {
            self.push_back(value);
        }
    }

    /// Prepends every value from `values` at the front, keeping their order.
    ///
    /// ```
    /// use shufflekit::ds::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = [3, 4].into_iter().collect();
    /// deque.extend_front([1, 2]);
    /// assert_eq!(deque.slice(0, None), vec![1, 2, 3, 4]);
    /// ```
    pub fn extend_front<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let values: Vec<T> = values.into_iter().collect();
        let count = values.len();
        if count == 0 {
            return;
        }
        self.upsize(self.len + count);
        self.start = (self.start + self.capacity() - count) & self.mask;
        for (offset, value) in values.into_iter().enumerate() {
            let idx = self.physical(offset);
            self.buf[idx] = Some(value);
        }
        self.len += count;
    }

    /// Removes and returns the back element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let idx = self.physical(self.len);
        self.buf[idx].take()
    }

    /// Removes and returns the front element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.buf[self.start].take();
        self.start = (self.start + 1) & self.mask;
        self.len -= 1;
        value
    }

    /// Returns the front element without removing it.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the back element without removing it.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Returns the element `index` positions from the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.buf[self.physical(index)].as_ref()
    }

    /// Returns a mutable reference to the element `index` positions from the front.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let idx = self.physical(index);
        self.buf[idx].as_mut()
    }

    /// Removes every element. Capacity is kept.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
        self.start = 0;
    }

    /// Resolves a possibly negative logical offset into `[0, len]`.
    fn resolve(&self, offset: isize) -> usize {
        if offset < 0 {
            self.len.saturating_sub(offset.unsigned_abs())
        } else {
            offset.unsigned_abs().min(self.len)
        }
    }

    /// Occupied slots as (tail fragment, head fragment) in logical order.
    fn fragments(&self) -> (&[Option<T>], &[Option<T>]) {
        let end = self.start + self.len;
        if end <= self.capacity() {
            (&self.buf[self.start..end], &self.buf[..0])
        } else {
            (
                &self.buf[self.start..],
                &self.buf[..end - self.capacity()],
            )
        }
    }

    /// Removes `count` elements starting at logical offset `start` and
    /// inserts `values` in their place, returning the removed elements.
    ///
    /// A negative `start` counts from the back. Both `start` and `count` are
    /// clamped to the current contents.
    ///
    /// ```
    /// use shufflekit::ds::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = (0..6).collect();
    /// assert_eq!(deque.splice(-2, 10, []), vec![4, 5]);
    /// assert_eq!(deque.splice(0, 2, [9]), vec![0, 1]);
    /// assert_eq!(deque.slice(0, None), vec![9, 2, 3]);
    /// ```
    pub fn splice<I>(&mut self, start: isize, count: usize, values: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let at = self.resolve(start);
        let count = count.min(self.len - at);
        if at == 0 {
            self.splice_front(count, values)
        } else if at + count == self.len {
            self.splice_back(at, values)
        } else {
            self.splice_interior(at, count, values)
        }
    }

    fn splice_front<I>(&mut self, count: usize, values: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut removed = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(value) = self.pop_front() {
                removed.push(value);
            }
        }
        self.extend_front(values);
        removed
    }

    fn splice_back<I>(&mut self, at: usize, values: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut removed = Vec::with_capacity(self.len - at);
        for offset in at..self.len {
            let idx = self.physical(offset);
            if let Some(value) = self.buf[idx].take() {
                removed.push(value);
            }
        }
        self.len = at;
        self.extend_back(values);
        removed
    }

    fn splice_interior<I>(&mut self, at: usize, count: usize, values: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = Vec::with_capacity(self.len);
        while let Some(value) = self.pop_front() {
            items.push(value);
        }
        let removed: Vec<T> = items.splice(at..at + count, values).collect();

        self.start = 0;
        self.upsize(items.len());
        debug!(
            "ring deque interior splice at {}: removed {}, rewrote {} elements",
            at,
            removed.len(),
            items.len()
        );
        for (idx, value) in items.into_iter().enumerate() {
            self.buf[idx] = Some(value);
            self.len += 1;
        }
        removed
    }

    /// Returns a front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        let (tail, head) = self.fragments();
        Iter {
            slots: tail.iter().chain(head.iter()),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let cap = self.capacity();
        assert!(cap.is_power_of_two());
        assert!(cap >= MIN_CAPACITY);
        assert_eq!(self.buf.len(), cap);
        assert!(self.len <= cap);
        assert!(self.start < cap);

        for offset in 0..cap {
            let slot = &self.buf[self.physical(offset)];
            if offset < self.len {
                assert!(slot.is_some(), "occupied offset {offset} is empty");
            } else {
                assert!(slot.is_none(), "free offset {offset} holds a value");
            }
        }
    }
}

impl<T: Clone> RingDeque<T> {
    /// Copies the logical range `[start, end)` into a new linear `Vec`.
    ///
    /// Negative offsets count from the back (`-1` is the last element);
    /// `end` defaults to the length. Offsets are clamped to the contents and
    /// an empty `Vec` is returned when `end <= start`.
    pub fn slice(&self, start: isize, end: Option<isize>) -> Vec<T> {
        let from = self.resolve(start);
        let to = end.map_or(self.len, |end| self.resolve(end));
        if to <= from {
            return Vec::new();
        }

        let count = to - from;
        let first = self.physical(from);
        let tail_run = count.min(self.capacity() - first);

        let mut out = Vec::with_capacity(count);
        out.extend(self.buf[first..first + tail_run].iter().flatten().cloned());
        out.extend(self.buf[..count - tail_run].iter().flatten().cloned());
        out
    }

    /// Copies every element into a new `Vec`, front to back.
    pub fn to_vec(&self) -> Vec<T> {
        self.slice(0, None)
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingDeque<T> {}

impl<T> Index<usize> for RingDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index} out of bounds for RingDeque of length {len}"),
        }
    }
}

impl<T> IndexMut<usize> for RingDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index} out of bounds for RingDeque of length {len}"),
        }
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend_back(iter);
        deque
    }
}

impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_back(iter);
    }
}

/// Borrowing front-to-back iterator over a [`RingDeque`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    slots: std::iter::Chain<std::slice::Iter<'a, Option<T>>, std::slice::Iter<'a, Option<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.slots.by_ref().find_map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(value) = slot.as_ref() {
                return Some(value);
            }
        }
        None
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning front-to-back iterator over a [`RingDeque`].
#[derive(Debug)]
pub struct IntoIter<T> {
    deque: RingDeque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for RingDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a RingDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
