// ==============================================
// CROSS-MODULE BEHAVIOR TESTS (integration)
// ==============================================
//
// Behavioral guarantees exercised through the public API only, one module
// per feature group.

// ==============================================
// RingDeque
// ==============================================

#[cfg(feature = "deque")]
mod ring_deque_behavior {
    use std::collections::VecDeque;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shufflekit::ds::RingDeque;

    #[test]
    fn random_ops_preserve_insertion_order_and_length() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut deque = RingDeque::new();
        let mut model = VecDeque::new();
        let mut pushes = 0usize;
        let mut removals = 0usize;

        for step in 0..5_000u32 {
            match rng.random_range(0..4) {
                0 => {
                    deque.push_back(step);
                    model.push_back(step);
                    pushes += 1;
                },
                1 => {
                    deque.push_front(step);
                    model.push_front(step);
                    pushes += 1;
                },
                2 => {
                    let popped = deque.pop_back();
                    assert_eq!(popped, model.pop_back());
                    removals += usize::from(popped.is_some());
                },
                _ => {
                    let shifted = deque.pop_front();
                    assert_eq!(shifted, model.pop_front());
                    removals += usize::from(shifted.is_some());
                },
            }
            assert_eq!(deque.len(), pushes - removals);
        }

        assert_eq!(deque.slice(0, None), model.iter().copied().collect::<Vec<_>>());
        #[cfg(debug_assertions)]
        deque.debug_validate_invariants();
    }

    #[test]
    fn splice_insert_then_remove_restores_contents() {
        let mut deque: RingDeque<i32> = RingDeque::new();
        for i in 0..12 {
            deque.push_back(i);
        }
        for _ in 0..8 {
            deque.pop_front();
        }
        deque.extend_back(100..110);
        let before = deque.to_vec();

        for i in 0..=before.len() {
            let index = isize::try_from(i).unwrap();
            assert!(deque.splice(index, 0, [-1]).is_empty());
            assert_eq!(deque.len(), before.len() + 1);
            assert_eq!(deque.splice(index, 1, []), vec![-1]);
            assert_eq!(deque.to_vec(), before, "round trip at {i}");
        }
    }

    #[test]
    fn growth_is_transparent() {
        let source: Vec<u32> = (0..1_000).collect();

        let mut incremental = RingDeque::new();
        for &value in &source {
            incremental.push_back(value);
        }
        let collected: RingDeque<u32> = source.iter().copied().collect();

        assert_eq!(incremental.slice(0, Some(1_000)), collected.slice(0, Some(1_000)));
        assert_eq!(incremental.slice(0, Some(1_000)), source);
        assert!(incremental.capacity() >= 1_000);
        assert!(incremental.capacity().is_power_of_two());
    }

    #[test]
    fn empty_deque_reports_absence() {
        let mut deque: RingDeque<&str> = RingDeque::new();
        assert_eq!(deque.pop_back(), None);
        assert_eq!(deque.pop_front(), None);
        assert_eq!(deque.back(), None);
        assert_eq!(deque.front(), None);
        assert_eq!(deque.get(0), None);
        assert!(deque.slice(-3, None).is_empty());
    }
}

// ==============================================
// SuffixTrie
// ==============================================

#[cfg(feature = "trie")]
mod suffix_trie_behavior {
    use shufflekit::ds::SuffixTrie;

    #[test]
    fn keys_sharing_suffixes_stay_distinct() {
        let mut trie = SuffixTrie::new();
        trie.set("stone", 1);
        trie.set("one", 2);
        trie.set("ne", 3);

        assert_eq!(trie.get("stone"), Some(&1));
        assert_eq!(trie.get("one"), Some(&2));
        assert_eq!(trie.get("ne"), Some(&3));
        assert_eq!(trie.get("tone"), None);
        assert_eq!(trie.len(), 3);

        let mut values: Vec<i32> = trie.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3]);
        // Restartable.
        assert_eq!(trie.values().count(), 3);
    }
}

// ==============================================
// DefaultMap / CountingMultiset / SetMultimap
// ==============================================

#[cfg(feature = "maps")]
mod map_behavior {
    use std::cell::Cell;

    use shufflekit::ds::{CountingMultiset, DefaultMap, SetMultimap};

    #[test]
    fn default_map_supplies_once_per_key() {
        let calls = Cell::new(0);
        let mut map = DefaultMap::with_supplier(|key: &&str| {
            calls.set(calls.get() + 1);
            key.len()
        });

        assert_eq!(*map.get("seven"), 5);
        assert_eq!(*map.get("seven"), 5);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn counting_multiset_deletes_at_zero() {
        let mut bag = CountingMultiset::new();
        for _ in 0..3 {
            bag.add("x");
        }
        bag.delete(&"x");
        bag.delete(&"x");
        assert_eq!(bag.count(&"x"), 1);

        bag.delete(&"x");
        assert_eq!(bag.count(&"x"), 0);
        assert_eq!(bag.unique(), 0);
        bag.check_invariants().unwrap();
    }

    #[test]
    fn set_multimap_prunes_and_views_re_resolve() {
        let mut multimap = SetMultimap::new();
        multimap.insert('a', 1);
        multimap.insert('a', 2);
        {
            let view = multimap.get(&'a');
            assert!(view.contains(&1));
            assert_eq!(view.len(), 2);
        }

        {
            let mut view = multimap.get_mut('a');
            assert!(view.remove(&1));
            assert!(view.remove(&2));
            assert!(view.is_empty());
        }

        assert_eq!(multimap.len(), 0);
        assert_eq!(multimap.keys().count(), 0);
        assert!(!multimap.get(&'a').contains(&1));
        multimap.check_invariants().unwrap();

        // A view of a pruned key is an empty set that can be refilled.
        let mut view = multimap.get_mut('a');
        assert!(view.insert(3));
        assert_eq!(multimap.len(), 1);
    }
}

// ==============================================
// Cancellation
// ==============================================

#[cfg(feature = "cancel")]
mod cancel_behavior {
    use std::cell::RefCell;
    use std::rc::Rc;

    use shufflekit::cancel::CancellationSource;
    use shufflekit::error::Cancelled;

    #[test]
    fn callbacks_fire_once_in_order_and_unregister_works() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let source = CancellationSource::new();
        let token = source.token();

        for name in ["a", "b", "c"] {
            let sink = Rc::clone(&fired);
            let handle = token.register(move || sink.borrow_mut().push(name));
            if name == "b" {
                handle.unregister();
            }
        }

        source.cancel();
        source.cancel();
        assert_eq!(*fired.borrow(), vec!["a", "c"]);
        assert_eq!(token.throw_if_requested(), Err(Cancelled));
    }

    #[test]
    fn long_running_loop_stops_at_cancellation() {
        let source = CancellationSource::new();
        let token = source.token();

        let mut done = 0;
        let result: Result<(), Cancelled> = (|| {
            for i in 0..100 {
                token.throw_if_requested()?;
                done += 1;
                if i == 9 {
                    source.cancel();
                }
            }
            Ok(())
        })();

        assert_eq!(result, Err(Cancelled));
        assert_eq!(done, 10);
    }
}

// ==============================================
// Memoization
// ==============================================

#[cfg(feature = "memo")]
mod memo_behavior {
    use std::cell::Cell;
    use std::rc::Rc;

    use shufflekit::memo::memoize;

    #[test]
    fn identity_not_structure_selects_the_cache_entry() {
        let calls = Cell::new(0);
        let mut area = memoize(|rect: &Rc<(u32, u32)>| {
            calls.set(calls.get() + 1);
            rect.0 * rect.1
        });

        let rect = Rc::new((3, 4));
        assert_eq!(*area.call(&rect), 12);
        assert_eq!(*area.call(&rect), 12);
        assert_eq!(calls.get(), 1);

        let twin = Rc::new((3, 4));
        assert_eq!(*area.call(&twin), 12);
        assert_eq!(calls.get(), 2);
    }
}

// ==============================================
// Formatting
// ==============================================

#[cfg(feature = "format")]
mod format_behavior {
    use shufflekit::mini_format;

    #[test]
    fn directive_examples() {
        assert_eq!(mini_format!("%5d", 3), "    3");
        assert_eq!(mini_format!("%-5d", 3), "3    ");
        assert_eq!(mini_format!("%04x", 255), "00ff");
        assert_eq!(mini_format!("%+d", 3), "+3");
    }
}

// ==============================================
// Index structures
// ==============================================

#[cfg(feature = "index")]
mod index_behavior {
    use shufflekit::ds::BiIndex;
    use shufflekit::error::IndexError;

    #[test]
    fn bi_index_stays_one_to_one() {
        let mut index = BiIndex::new();
        for word in ["north", "south", "east", "west"] {
            index.push(word).unwrap();
        }
        assert_eq!(index.push("east"), Err(IndexError::DuplicateValue(2)));
        assert_eq!(index.insert(0, "up"), Err(IndexError::DuplicateIndex(0)));
        assert_eq!(index.index_of(&"down"), Err(IndexError::Missing));

        for (i, word) in index.iter() {
            assert_eq!(index.index_of(word), Ok(i));
        }
        index.check_invariants().unwrap();
    }
}
