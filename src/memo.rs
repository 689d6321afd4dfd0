//! Memoization keyed by argument identity.
//!
//! [`memoize`] wraps a function of one to four `Rc` arguments. Results are
//! cached in a tree with one level per argument, each level keyed by the
//! argument's allocation address. Two structurally equal but distinct `Rc`s
//! are different keys; clones of the same `Rc` hit the same entry.
//!
//! ## Architecture
//!
//! ```text
//!   call(&(a, b))
//!
//!   root
//!    ├─ addr(a) ─► Node { witness: Weak(a) }
//!    │              ├─ addr(b) ─► Node { witness: Weak(b), result: Some(r) }
//!    │              └─ addr(c) ─► Node { witness: Weak(c), result: Some(s) }
//!    └─ addr(d) ─► ...
//! ```
//!
//! Each cache entry holds only a `Weak` witness of its argument, so caching
//! never keeps an argument value alive. The witness does pin the allocation
//! itself, which is what keeps an address from being reused by a different
//! object while the entry exists. Entries of dropped arguments linger until
//! [`purge`](IdentityMemo::purge) releases them; there is no other eviction.
//!
//! ## Example Usage
//!
//! ```
//! use std::rc::Rc;
//!
//! use shufflekit::memo::memoize;
//!
//! let mut weight = memoize(|pool: &Rc<Vec<u32>>| pool.iter().sum::<u32>());
//!
//! let pool = Rc::new(vec![1, 2, 3]);
//! assert_eq!(*weight.call(&pool), 6);
//! assert_eq!(*weight.call(&Rc::clone(&pool)), 6); // cache hit
//! assert_eq!(weight.misses(), 1);
//!
//! let same_contents = Rc::new(vec![1, 2, 3]);
//! weight.call(&same_contents); // distinct identity, computed again
//! assert_eq!(weight.misses(), 2);
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use log::{debug, trace};
use rustc_hash::FxHashMap;

/// Identity of one argument: its allocation address and a weak witness.
pub struct ArgIdentity {
    addr: usize,
    witness: Weak<dyn Any>,
}

impl ArgIdentity {
    /// Captures the identity of `arg` without keeping its value alive.
    pub fn of<T: Any>(arg: &Rc<T>) -> Self {
        let weak: Weak<T> = Rc::downgrade(arg);
        let witness: Weak<dyn Any> = weak;
        Self {
            addr: Rc::as_ptr(arg).addr(),
            witness,
        }
    }
}

/// Argument lists usable with [`IdentityMemo`].
///
/// Implemented for `Rc<T>` and for tuples of one to four `Rc`s.
pub trait MemoArgs {
    /// Identities of the arguments, in position order.
    fn identities(&self) -> Vec<ArgIdentity>;
}

impl<T: Any> MemoArgs for Rc<T> {
    fn identities(&self) -> Vec<ArgIdentity> {
        vec![ArgIdentity::of(self)]
    }
}

macro_rules! impl_memo_args {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Any),+> MemoArgs for ($(Rc<$name>,)+) {
            fn identities(&self) -> Vec<ArgIdentity> {
                vec![$(ArgIdentity::of(&self.$idx)),+]
            }
        }
    };
}

impl_memo_args!(A: 0);
impl_memo_args!(A: 0, B: 1);
impl_memo_args!(A: 0, B: 1, C: 2);
impl_memo_args!(A: 0, B: 1, C: 2, D: 3);

struct Node<R> {
    children: FxHashMap<usize, Child<R>>,
    result: Option<R>,
}

struct Child<R> {
    witness: Weak<dyn Any>,
    node: Node<R>,
}

impl<R> Node<R> {
    fn new() -> Self {
        Self {
            children: FxHashMap::default(),
            result: None,
        }
    }

    fn count_results(&self) -> usize {
        usize::from(self.result.is_some())
            + self
                .children
                .values()
                .map(|child| child.node.count_results())
                .sum::<usize>()
    }

    /// Drops subtrees whose argument is gone; returns the results released.
    fn purge(&mut self) -> usize {
        let mut released = 0;
        self.children.retain(|_, child| {
            if child.witness.strong_count() == 0 {
                released += child.node.count_results();
                return false;
            }
            released += child.node.purge();
            child.node.result.is_some() || !child.node.children.is_empty()
        });
        released
    }
}

fn leaf<R>(root: &mut Node<R>, identities: Vec<ArgIdentity>) -> &mut Node<R> {
    let mut node = root;
    for ArgIdentity { addr, witness } in identities {
        let child = node.children.entry(addr).or_insert_with(|| Child {
            witness,
            node: Node::new(),
        });
        node = &mut child.node;
    }
    node
}

/// A function wrapped with an identity-keyed result cache.
pub struct IdentityMemo<A, R, F> {
    f: F,
    root: Node<R>,
    cached: usize,
    misses: u64,
    _args: PhantomData<fn(&A)>,
}

/// Wraps `f` so that repeated calls with identical arguments reuse the result.
pub fn memoize<A, R, F>(f: F) -> IdentityMemo<A, R, F>
where
    A: MemoArgs,
    F: FnMut(&A) -> R,
{
    IdentityMemo {
        f,
        root: Node::new(),
        cached: 0,
        misses: 0,
        _args: PhantomData,
    }
}

impl<A, R, F> IdentityMemo<A, R, F>
where
    A: MemoArgs,
    F: FnMut(&A) -> R,
{
    /// Returns the cached result for `args`, computing it on first use.
    pub fn call(&mut self, args: &A) -> &R {
        let node = leaf(&mut self.root, args.identities());
        let f = &mut self.f;
        let cached = &mut self.cached;
        let misses = &mut self.misses;
        node.result.get_or_insert_with(|| {
            trace!("identity memo miss");
            *cached += 1;
            *misses += 1;
            f(args)
        })
    }

    /// Returns the number of cached results.
    pub fn cached_len(&self) -> usize {
        self.cached
    }

    /// Returns how many times the wrapped function has been invoked.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Releases entries whose arguments have been dropped.
    ///
    /// Returns the number of cached results released.
    pub fn purge(&mut self) -> usize {
        let released = self.root.purge();
        self.cached -= released;
        if released > 0 {
            debug!("identity memo purged {released} result(s)");
        }
        released
    }

    /// Drops every cached result.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.cached = 0;
    }
}

impl<A, R, F> fmt::Debug for IdentityMemo<A, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityMemo")
            .field("cached", &self.cached)
            .field("misses", &self.misses)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn identity_memo_same_reference_hits_cache() {
        let calls = Cell::new(0);
        let mut len = memoize(|s: &Rc<String>| {
            calls.set(calls.get() + 1);
            s.len()
        });

        let key = Rc::new(String::from("hyrule"));
        assert_eq!(*len.call(&key), 6);
        assert_eq!(*len.call(&key), 6);
        assert_eq!(*len.call(&Rc::clone(&key)), 6);
        assert_eq!(calls.get(), 1);
        assert_eq!(len.cached_len(), 1);
    }

    #[test]
    fn identity_memo_equal_but_distinct_values_miss() {
        let calls = Cell::new(0);
        let mut len = memoize(|s: &Rc<String>| {
            calls.set(calls.get() + 1);
            s.len()
        });

        let a = Rc::new(String::from("same"));
        let b = Rc::new(String::from("same"));
        len.call(&a);
        len.call(&b);
        assert_eq!(calls.get(), 2);
        assert_eq!(len.cached_len(), 2);
    }

    #[test]
    fn identity_memo_multiple_arguments() {
        let mut join = memoize(|(a, b): &(Rc<String>, Rc<String>)| format!("{a}-{b}"));
        let x = Rc::new(String::from("x"));
        let y = Rc::new(String::from("y"));

        assert_eq!(join.call(&(Rc::clone(&x), Rc::clone(&y))), "x-y");
        assert_eq!(join.call(&(Rc::clone(&y), Rc::clone(&x))), "y-x");
        assert_eq!(join.call(&(Rc::clone(&x), Rc::clone(&y))), "x-y");
        assert_eq!(join.misses(), 2);
        assert_eq!(join.cached_len(), 2);
    }

    #[test]
    fn identity_memo_mixed_argument_types() {
        let mut scale = memoize(|(n, factor, label): &(Rc<u32>, Rc<u32>, Rc<String>)| {
            format!("{label}:{}", **n * **factor)
        });
        let n = Rc::new(3);
        let factor = Rc::new(4);
        let label = Rc::new(String::from("score"));
        let args = (n, factor, label);
        assert_eq!(scale.call(&args), "score:12");
        assert_eq!(scale.call(&args), "score:12");
        assert_eq!(scale.misses(), 1);
    }

    #[test]
    fn identity_memo_four_arguments_key_every_position() {
        type Quad = (Rc<u8>, Rc<u8>, Rc<u8>, Rc<u8>);
        let calls = Cell::new(0);
        let mut sum = memoize(|(a, b, c, d): &Quad| {
            calls.set(calls.get() + 1);
            u32::from(**a) + u32::from(**b) + u32::from(**c) + u32::from(**d)
        });

        let base: Vec<Rc<u8>> = (1..=4).map(Rc::new).collect();
        let args = |swap: Option<usize>| -> Quad {
            let pick = |i: usize| match swap {
                Some(pos) if pos == i => Rc::new(*base[i]),
                _ => Rc::clone(&base[i]),
            };
            (pick(0), pick(1), pick(2), pick(3))
        };

        let all = args(None);
        assert_eq!(*sum.call(&all), 10);
        assert_eq!(*sum.call(&args(None)), 10);
        assert_eq!(calls.get(), 1);

        // A fresh but equal value in any single position is a different key.
        let swapped: Vec<Quad> = (0..4).map(|pos| args(Some(pos))).collect();
        for (pos, quad) in swapped.iter().enumerate() {
            assert_eq!(*sum.call(quad), 10);
            assert_eq!(calls.get(), pos + 2);
        }
        for quad in &swapped {
            sum.call(quad);
        }
        assert_eq!(calls.get(), 5);
        assert_eq!(sum.cached_len(), 5);
        assert_eq!(sum.misses(), 5);
    }

    #[test]
    fn identity_memo_does_not_keep_arguments_alive() {
        let mut len = memoize(|v: &Rc<Vec<u8>>| v.len());
        let arg = Rc::new(vec![1, 2, 3]);
        len.call(&arg);
        assert_eq!(Rc::strong_count(&arg), 1);

        drop(arg);
        assert_eq!(len.cached_len(), 1);
        assert_eq!(len.purge(), 1);
        assert_eq!(len.cached_len(), 0);
    }

    #[test]
    fn identity_memo_purge_keeps_live_entries() {
        let mut pair = memoize(|(a, b): &(Rc<u8>, Rc<u8>)| **a + **b);
        let a = Rc::new(1);
        let b = Rc::new(2);
        let c = Rc::new(3);
        pair.call(&(Rc::clone(&a), Rc::clone(&b)));
        pair.call(&(Rc::clone(&a), Rc::clone(&c)));

        drop(c);
        assert_eq!(pair.purge(), 1);
        assert_eq!(pair.cached_len(), 1);
        assert_eq!(*pair.call(&(Rc::clone(&a), Rc::clone(&b))), 3);
        assert_eq!(pair.misses(), 2);
    }

    #[test]
    fn identity_memo_clear_forces_recompute() {
        let mut len = memoize(|s: &Rc<String>| s.len());
        let key = Rc::new(String::from("abc"));
        len.call(&key);
        len.clear();
        assert_eq!(len.cached_len(), 0);
        len.call(&key);
        assert_eq!(len.misses(), 2);
    }
}
