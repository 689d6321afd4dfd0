//! shufflekit: small single-threaded containers and utilities.
//!
//! Ring-buffer deque, suffix-keyed trie, default-value map, set multimap with
//! re-resolving views, counting multiset, bijective index and friends, plus
//! cooperative cancellation, identity-keyed memoization and a constrained
//! printf-style formatter. Each group sits behind a Cargo feature; all are on
//! by default.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;

#[cfg(feature = "cancel")]
pub mod cancel;
#[cfg(feature = "format")]
pub mod format;
#[cfg(feature = "memo")]
pub mod memo;

pub mod prelude;
