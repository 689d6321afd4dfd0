//! Trie keyed by string suffixes.
//!
//! Keys are walked from their last character to their first, so every node
//! stands for one suffix and siblings share their tail. Useful for compact
//! lookup tables keyed by the end of a string (name postfixes, file
//! extensions, flag tails).
//!
//! ## Architecture
//!
//! ```text
//!   set("cat", 1), set("hat", 2), set("at", 3)
//!
//!   root ""
//!    └─ 't' → "t"
//!             └─ 'a' → "at"      value = 3
//!                      ├─ 'c' → "cat"   value = 1
//!                      └─ 'h' → "hat"   value = 2
//! ```
//!
//! Each node stores the suffix it represents for diagnostics; the suffix of a
//! child is its edge character prepended to the parent's suffix.
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::ds::SuffixTrie;
//!
//! let mut trie = SuffixTrie::new();
//! trie.set("_sword", "weapon");
//! trie.set("_shield", "armor");
//!
//! assert_eq!(trie.get("_sword"), Some(&"weapon"));
//! assert_eq!(trie.get("sword"), None);
//!
//! // Deepest stored suffix of a longer key
//! assert_eq!(trie.longest_suffix("iron_sword"), Some(("_sword", &"weapon")));
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Node<V> {
    suffix: String,
    children: FxHashMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new(suffix: String) -> Self {
        Self {
            suffix,
            children: FxHashMap::default(),
            value: None,
        }
    }

    /// Finds or creates the child reached through `c`.
    fn with(&mut self, c: char) -> &mut Node<V> {
        let parent = &self.suffix;
        self.children.entry(c).or_insert_with(|| {
            let mut suffix = String::with_capacity(parent.len() + c.len_utf8());
            suffix.push(c);
            suffix.push_str(parent);
            Node::new(suffix)
        })
    }
}

/// Associative store keyed by string suffixes.
pub struct SuffixTrie<V> {
    root: Node<V>,
    len: usize,
}

impl<V> SuffixTrie<V> {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self {
            root: Node::new(String::new()),
            len: 0,
        }
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Associates `value` with `key`, returning the previous value.
    pub fn set(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;
        for c in key.chars().rev() {
            node = node.with(c);
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        let mut node = &self.root;
        for c in key.chars().rev() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut node = &mut self.root;
        for c in key.chars().rev() {
            node = node.children.get_mut(&c)?;
        }
        Some(node)
    }

    /// Returns the value stored for exactly `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key)?.value.as_ref()
    }

    /// Returns a mutable reference to the value stored for exactly `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find_mut(key)?.value.as_mut()
    }

    /// Returns `true` if a value is stored for exactly `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes and returns the value stored for `key`.
    ///
    /// Intermediate nodes stay in place; only the payload is cleared.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.find_mut(key)?.value.take()?;
        self.len -= 1;
        Some(value)
    }

    /// Returns the longest stored suffix of `key` together with its value.
    pub fn longest_suffix(&self, key: &str) -> Option<(&str, &V)> {
        let mut node = &self.root;
        let mut best = node.value.as_ref().map(|v| (node.suffix.as_str(), v));
        for c in key.chars().rev() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(value) = node.value.as_ref() {
                best = Some((node.suffix.as_str(), value));
            }
        }
        best
    }

    /// Depth-first iterator over every stored value.
    pub fn values(&self) -> Values<'_, V> {
        Values {
            entries: self.entries(),
        }
    }

    /// Depth-first iterator over `(suffix, value)` pairs.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries {
            stack: vec![&self.root],
        }
    }
}

impl<V> Default for SuffixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SuffixTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Iterator over `(suffix, value)` pairs of a [`SuffixTrie`].
pub struct Entries<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children.values());
            if let Some(value) = node.value.as_ref() {
                return Some((node.suffix.as_str(), value));
            }
        }
        None
    }
}

/// Iterator over the values of a [`SuffixTrie`].
pub struct Values<'a, V> {
    entries: Entries<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.entries.next().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_trie_set_and_get() {
        let mut trie = SuffixTrie::new();
        assert_eq!(trie.set("cat", 1), None);
        assert_eq!(trie.set("hat", 2), None);
        assert_eq!(trie.set("at", 3), None);

        assert_eq!(trie.get("cat"), Some(&1));
        assert_eq!(trie.get("hat"), Some(&2));
        assert_eq!(trie.get("at"), Some(&3));
        assert_eq!(trie.get("t"), None);
        assert_eq!(trie.get("bat"), None);
        assert_eq!(trie.get("cats"), None);
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn suffix_trie_keys_are_not_prefix_matched() {
        let mut trie = SuffixTrie::new();
        trie.set("ab", 1);
        assert_eq!(trie.get("ab"), Some(&1));
        assert_eq!(trie.get("ba"), None);
        assert_eq!(trie.get("a"), None);
    }

    #[test]
    fn suffix_trie_overwrite_returns_previous() {
        let mut trie = SuffixTrie::new();
        trie.set("key", 1);
        assert_eq!(trie.set("key", 2), Some(1));
        assert_eq!(trie.get("key"), Some(&2));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn suffix_trie_nodes_track_their_suffix() {
        let mut trie = SuffixTrie::new();
        trie.set("sword", ());
        trie.set("word", ());
        let mut suffixes: Vec<&str> = trie.entries().map(|(suffix, _)| suffix).collect();
        suffixes.sort_unstable();
        assert_eq!(suffixes, vec!["sword", "word"]);
    }

    #[test]
    fn suffix_trie_empty_key_lives_at_root() {
        let mut trie = SuffixTrie::new();
        trie.set("", 0);
        assert_eq!(trie.get(""), Some(&0));
        assert_eq!(trie.longest_suffix("anything"), Some(("", &0)));
    }

    #[test]
    fn suffix_trie_multibyte_keys() {
        let mut trie = SuffixTrie::new();
        trie.set("épée", 1);
        assert_eq!(trie.get("épée"), Some(&1));
        assert_eq!(trie.longest_suffix("grande épée"), Some(("épée", &1)));
    }

    #[test]
    fn suffix_trie_longest_suffix_prefers_deepest() {
        let mut trie = SuffixTrie::new();
        trie.set("d", 1);
        trie.set("rd", 2);
        trie.set("xword", 3);
        assert_eq!(trie.longest_suffix("sword"), Some(("rd", &2)));
        assert_eq!(trie.longest_suffix("xword"), Some(("xword", &3)));
        assert_eq!(trie.longest_suffix("shield"), Some(("d", &1)));
        assert_eq!(trie.longest_suffix("axe"), None);
    }

    #[test]
    fn suffix_trie_values_is_restartable() {
        let mut trie = SuffixTrie::new();
        for (i, key) in ["a", "ba", "cba", "x"].iter().enumerate() {
            trie.set(key, i);
        }
        let mut first: Vec<usize> = trie.values().copied().collect();
        let mut second: Vec<usize> = trie.values().copied().collect();
        first.sort_unstable();
        second.sort_unstable();
        assert_eq!(first, vec![0, 1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn suffix_trie_remove_clears_payload_only() {
        let mut trie = SuffixTrie::new();
        trie.set("at", 1);
        trie.set("cat", 2);
        assert_eq!(trie.remove("at"), Some(1));
        assert_eq!(trie.remove("at"), None);
        assert_eq!(trie.get("cat"), Some(&2));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn suffix_trie_get_mut_updates_value() {
        let mut trie = SuffixTrie::new();
        trie.set("ing", 1);
        if let Some(v) = trie.get_mut("ing") {
            *v += 10;
        }
        assert_eq!(trie.get("ing"), Some(&11));
        assert!(trie.contains_key("ing"));
        assert!(!trie.contains_key("ng"));
    }
}
