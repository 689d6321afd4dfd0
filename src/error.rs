//! Error types for the shufflekit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal container invariants are
//!   violated (`check_invariants` methods).
//! - [`IndexError`]: Returned by [`BiIndex`](crate::ds::BiIndex) when a
//!   lookup misses or an insert would break the one-to-one mapping.
//! - [`Cancelled`]: Returned by
//!   [`CancellationToken::throw_if_requested`](crate::cancel::CancellationToken::throw_if_requested)
//!   once cancellation has been requested.
//!
//! Reading an absent element (empty deque, missing key) is not an error; those
//! operations return `Option`.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::BiIndex;
//! use shufflekit::error::IndexError;
//!
//! let mut rooms = BiIndex::new();
//! let id = rooms.push("boss_lair").unwrap();
//!
//! // Duplicate values are rejected instead of overwriting
//! assert_eq!(rooms.push("boss_lair"), Err(IndexError::DuplicateValue(id)));
//!
//! // Reverse lookups of unknown values fail loudly
//! assert_eq!(rooms.index_of(&"shop"), Err(IndexError::Missing));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal container invariants are violated.
///
/// Produced by `check_invariants` methods on container types
/// (e.g. [`SetMultimap::check_invariants`](crate::ds::SetMultimap::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// IndexError
// ---------------------------------------------------------------------------

/// Error returned by bijective index maps.
///
/// `Missing` is a recoverable lookup failure; the `Duplicate*` variants are
/// insert conflicts that would break the one-to-one relationship and carry
/// the index already holding the conflicting entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// The value was never inserted (or has been removed).
    Missing,
    /// The index is already bound to another value.
    DuplicateIndex(usize),
    /// The value is already bound to the contained index.
    DuplicateValue(usize),
    /// Every index up to `usize::MAX` has been handed out.
    Exhausted,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing index for value"),
            Self::DuplicateIndex(idx) => write!(f, "duplicate index {idx}"),
            Self::DuplicateValue(idx) => write!(f, "duplicate value (already at index {idx})"),
            Self::Exhausted => f.write_str("index space exhausted"),
        }
    }
}

impl std::error::Error for IndexError {}

// ---------------------------------------------------------------------------
// Cancelled
// ---------------------------------------------------------------------------

/// Error signalling that cooperative cancellation was requested.
///
/// This is an expected control-flow exit for long-running work, meant to be
/// propagated with `?` up to whoever owns the
/// [`CancellationSource`](crate::cancel::CancellationSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
