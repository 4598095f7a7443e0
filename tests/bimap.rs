//! End-to-end behavior of the bidirectional map
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use treap_bimap::{Bimap, Error};

#[test]
fn default_value_reassignment() {
    // Integer-to-text map where the default integer 0 is already taken
    let mut map: Bimap<i32, String> = Bimap::new();
    map.insert(1, "a".to_string());
    map.insert(2, "b".to_string());
    map.insert(0, "x".to_string());
    assert_eq!(map.at_left(&1), Ok(&"a".to_string()));

    // Asking for "z" steals the default 0 from its current partner "x"
    assert_eq!(*map.at_right_or_default(&"z".to_string()), 0);
    assert_eq!(map.len(), 3);
    assert_eq!(map.at_left(&0), Ok(&"z".to_string()));
    assert!(map.find_right(&"x".to_string()).is_end());
}

#[test]
fn round_trip_inserts() {
    let pairs = [(4, "d"), (1, "a"), (3, "c"), (2, "b"), (5, "e")];
    let mut map = Bimap::new();
    for (l, r) in pairs {
        let it = map.insert(l, r);
        assert_eq!(map.get_left(it), Some(&l));
        assert_eq!(map.get_right(it.flip()), Some(&r));
    }
    for (l, r) in pairs {
        let it = map.find_left(&l);
        assert_eq!(map.get_left(it), Some(&l));
        assert_eq!(map.get_right(it.flip()), Some(&r));
        let back = map.find_right(&r);
        assert_eq!(map.get_left(back.flip()), Some(&l));
    }
}

#[test]
fn sequential_inserts_stay_ordered() {
    // Worst-case insertion order for a plain BST; the treap's random
    // priorities keep it navigable either way
    let mut map = Bimap::new();
    for i in 0..1000 {
        assert!(!map.insert(i, 1000 - i).is_end());
    }
    assert_eq!(map.len(), 1000);

    let mut prev = None;
    for (l, _) in map.iter_left() {
        if let Some(p) = prev {
            assert!(p < *l);
        }
        prev = Some(*l);
    }

    let mut prev = None;
    for (r, _) in map.iter_right() {
        if let Some(p) = prev {
            assert!(p < *r);
        }
        prev = Some(*r);
    }

    assert_eq!(map.at_left(&0), Ok(&1000));
    assert_eq!(map.at_left(&999), Ok(&1));
    assert_eq!(map.at_right(&1000), Ok(&0));
}

#[test]
fn walk_matches_both_directions() {
    let mut map = Bimap::new();
    for i in 0..100 {
        map.insert(i * 7 % 100, i * 13 % 100);
    }

    // Forward walk then backward walk visit the same pairs
    let forward: Vec<i32> = map.iter_left().map(|(l, _)| *l).collect();
    let mut backward = Vec::new();
    let mut it = map.prev_left(map.end_left()).unwrap();
    loop {
        backward.push(*map.get_left(it).unwrap());
        it = map.prev_left(it).unwrap();
        if it.is_end() {
            break;
        }
    }
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn random_ops_match_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut map: Bimap<i32, i32> = Bimap::new();
    let mut forward: BTreeMap<i32, i32> = BTreeMap::new();
    let mut backward: BTreeMap<i32, i32> = BTreeMap::new();

    for step in 0..4000 {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let l = rng.gen_range(0..64);
                let r = rng.gen_range(0..64);
                let it = map.insert(l, r);
                let fresh = !forward.contains_key(&l) && !backward.contains_key(&r);
                assert_eq!(!it.is_end(), fresh);
                if fresh {
                    forward.insert(l, r);
                    backward.insert(r, l);
                }
            }
            2 => {
                let l = rng.gen_range(0..64);
                let erased = map.erase_left_key(&l);
                assert_eq!(erased, forward.contains_key(&l));
                if let Some(r) = forward.remove(&l) {
                    backward.remove(&r);
                }
            }
            _ => {
                let r = rng.gen_range(0..64);
                let erased = map.erase_right_key(&r);
                assert_eq!(erased, backward.contains_key(&r));
                if let Some(l) = backward.remove(&r) {
                    forward.remove(&l);
                }
            }
        }

        assert_eq!(map.len(), forward.len());
        if step % 256 == 0 {
            let got: Vec<(i32, i32)> = map.iter_left().map(|(l, r)| (*l, *r)).collect();
            let want: Vec<(i32, i32)> = forward.iter().map(|(l, r)| (*l, *r)).collect();
            assert_eq!(got, want);
            let got: Vec<(i32, i32)> = map.iter_right().map(|(r, l)| (*r, *l)).collect();
            let want: Vec<(i32, i32)> = backward.iter().map(|(r, l)| (*r, *l)).collect();
            assert_eq!(got, want);
        }
    }

    // Drain what's left through the range erase and re-check emptiness
    let end = map.erase_left_range(map.begin_left(), map.end_left()).unwrap();
    assert!(end.is_end());
    assert!(map.is_empty());
    assert_eq!(map.begin_left(), map.end_left());
}

#[test]
fn bound_queries_match_model() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut map: Bimap<i32, i32> = Bimap::new();
    let mut model: BTreeMap<i32, i32> = BTreeMap::new();
    for _ in 0..300 {
        let l = rng.gen_range(0..1000);
        let r = l + 10_000;
        if !map.insert(l, r).is_end() {
            model.insert(l, r);
        }
    }
    for probe in (0..1100).step_by(13) {
        let want_lower = model.range(probe..).next().map(|(l, _)| *l);
        let got = map.lower_bound_left(&probe);
        assert_eq!(map.get_left(got).copied(), want_lower);

        let want_upper = model.range(probe + 1..).next().map(|(l, _)| *l);
        let got = map.upper_bound_left(&probe);
        assert_eq!(map.get_left(got).copied(), want_upper);
    }
}

#[test]
fn equality_ignores_insertion_order() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut pairs: Vec<(i32, i32)> = (0..100).map(|i| (i, -i)).collect();

    let mut a = Bimap::new();
    for &(l, r) in &pairs {
        a.insert(l, r);
    }

    // Shuffle by repeated random swaps
    for _ in 0..200 {
        let i = rng.gen_range(0..pairs.len());
        let j = rng.gen_range(0..pairs.len());
        pairs.swap(i, j);
    }
    let mut b = Bimap::new();
    for &(l, r) in &pairs {
        b.insert(l, r);
    }

    assert_eq!(a, b);
    assert!(b.erase_left_key(&50));
    assert_ne!(a, b);
}

#[test]
fn erase_keeps_unrelated_cursors_valid() {
    let mut map = Bimap::new();
    for i in 0..50 {
        map.insert(i, i);
    }
    let keep = map.find_left(&25);
    for i in 0..50 {
        if i != 25 {
            assert!(map.erase_left_key(&i));
        }
        assert_eq!(map.get_left(keep), Some(&25));
    }
    assert_eq!(map.len(), 1);
    let end = map.erase_left(keep).unwrap();
    assert!(end.is_end());
    assert_eq!(map.get_left(keep), None);
}

#[test]
fn range_erase_with_unreachable_last_is_reported() {
    let mut map = Bimap::new();
    map.insert(1, 1);
    map.insert(2, 2);
    let last = map.find_left(&1);
    let first = map.find_left(&2);
    // `last` precedes `first`, so the walk falls off the end
    assert_eq!(map.erase_left_range(first, last), Err(Error::BadCursor));
}

#[test]
fn swap_is_total() {
    let mut a = Bimap::new();
    let mut b = Bimap::new();
    for i in 0..10 {
        a.insert(i, i + 100);
        b.insert(-i, i - 100);
    }
    let a_snapshot: Vec<(i32, i32)> = a.iter_left().map(|(l, r)| (*l, *r)).collect();
    let b_snapshot: Vec<(i32, i32)> = b.iter_left().map(|(l, r)| (*l, *r)).collect();

    a.swap(&mut b);
    let a_now: Vec<(i32, i32)> = a.iter_left().map(|(l, r)| (*l, *r)).collect();
    let b_now: Vec<(i32, i32)> = b.iter_left().map(|(l, r)| (*l, *r)).collect();
    assert_eq!(a_now, b_snapshot);
    assert_eq!(b_now, a_snapshot);
    assert_eq!(a.at_left(&-3), Ok(&-103));
    assert_eq!(b.at_left(&3), Ok(&103));
}
