#[cfg(feature = "index")]
pub mod bi_index;
#[cfg(feature = "maps")]
pub mod default_map;
#[cfg(feature = "index")]
pub mod label_set;
#[cfg(feature = "maps")]
pub mod multiset;
#[cfg(feature = "deque")]
pub mod ring_deque;
#[cfg(feature = "maps")]
pub mod set_multimap;
#[cfg(feature = "index")]
pub mod sparse_table;
#[cfg(feature = "trie")]
pub mod suffix_trie;

#[cfg(feature = "index")]
pub use bi_index::BiIndex;
#[cfg(feature = "maps")]
pub use default_map::{DefaultMap, DefaultSupplier};
#[cfg(feature = "index")]
pub use label_set::{LabelSet, Labeled};
#[cfg(feature = "maps")]
pub use multiset::CountingMultiset;
#[cfg(feature = "deque")]
pub use ring_deque::{IntoIter, Iter, MIN_CAPACITY, RingDeque};
#[cfg(feature = "maps")]
pub use set_multimap::{SetMultimap, SetView, SetViewMut};
#[cfg(feature = "index")]
pub use sparse_table::SparseTable;
#[cfg(feature = "trie")]
pub use suffix_trie::SuffixTrie;
