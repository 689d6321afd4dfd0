#[cfg(feature = "index")]
pub use crate::ds::{BiIndex, LabelSet, Labeled, SparseTable};
#[cfg(feature = "maps")]
pub use crate::ds::{CountingMultiset, DefaultMap, SetMultimap};
#[cfg(feature = "deque")]
pub use crate::ds::RingDeque;
#[cfg(feature = "trie")]
pub use crate::ds::SuffixTrie;

#[cfg(feature = "cancel")]
pub use crate::cancel::{CancellationSource, CancellationToken, Registration};
pub use crate::error::{Cancelled, IndexError, InvariantError};
#[cfg(feature = "format")]
pub use crate::format::FormatArg;
#[cfg(feature = "format")]
pub use crate::mini_format;
#[cfg(feature = "memo")]
pub use crate::memo::{IdentityMemo, memoize};
