use crate::linear_probing::{LinearProbingMap, ProbeSequence, SipProbe};
use crate::red_black_tree::{Cursor, RankedRedBlackMap, RedBlackMap};
use crate::union_find::{SetRef, UnionFind};

use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u64),
    Delete(u16),
    Get(u16),
    Select(usize),
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // a narrow key range makes replacements and misses common
    let key = 0u16..512;
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Delete),
        10 => key.clone().prop_map(Op::Get),
        9 => (0usize..600).prop_map(Op::Select),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=1500)
}

fn clustered_probe(key: &u16, offset: usize, capacity: usize) -> usize {
    (*key as usize / 7 + offset) % capacity
}

fn check_linear_probing<P>(
    mut t: LinearProbingMap<u16, u64, P>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    P: ProbeSequence<u16>,
{
    let mut m = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                prop_assert_eq!(t.put(key, value).unwrap(), m.insert(key, value));
            }
            Op::Delete(key) => {
                prop_assert_eq!(t.remove(&key), m.remove(&key));
            }
            Op::Get(key) => {
                prop_assert_eq!(t.get(&key), m.get(&key));
                prop_assert_eq!(t.contains_key(&key), m.contains_key(&key));
            }
            Op::Select(_) => {
                t.assert_valid();
            }
            Op::Clear => {
                t.clear();
                m.clear();
            }
        }
        prop_assert_eq!(t.len(), m.len());
    }

    t.assert_valid();
    let mut got: Vec<(u16, u64)> = t.iter().map(|(k, v)| (*k, *v)).collect();
    let mut expected: Vec<(u16, u64)> = m.into_iter().collect();
    got.sort();
    expected.sort();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_red_black_map_equivalence(ops in ops_strategy()) {
        let mut t = RedBlackMap::new();
        let mut m = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(t.insert(key, value), m.insert(key, value));
                }
                Op::Delete(key) => {
                    prop_assert_eq!(t.delete(&key).ok(), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.retrieve(&key), m.get(&key));
                }
                Op::Select(_) => {
                    prop_assert_eq!(t.min(), m.iter().next());
                    prop_assert_eq!(t.max(), m.iter().next_back());
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        t.assert_valid();
        prop_assert!(t.iter().eq(m.iter()));
        prop_assert!(t.iter().rev().eq(m.iter().rev()));
    }

    #[test]
    fn prop_ranked_map_equivalence(ops in ops_strategy()) {
        let mut t = RankedRedBlackMap::new();
        let mut m = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(t.insert(key, value), m.insert(key, value));
                }
                Op::Delete(key) => {
                    prop_assert_eq!(t.delete(&key).ok(), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.retrieve(&key), m.get(&key));
                    prop_assert_eq!(t.index_of(&key), m.keys().position(|k| *k == key));
                }
                Op::Select(index) => {
                    prop_assert_eq!(t.select(index).ok(), m.iter().nth(index));
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }
            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.min(), m.iter().next());
            prop_assert_eq!(t.max(), m.iter().next_back());
        }

        t.assert_valid();
        prop_assert!(t.iter().eq(m.iter()));
    }

    #[test]
    fn prop_cursor_removal(keys in prop::collection::btree_set(any::<u32>(), 0..300), modulus in 1u32..5) {
        let mut t: RankedRedBlackMap<u32, ()> = keys.iter().map(|key| (*key, ())).collect();
        let mut cursor = Cursor::back(&t);
        while let Some((key, _)) = cursor.prev(&t).unwrap() {
            if key % modulus == 0 {
                cursor.remove(&mut t).unwrap();
            }
        }

        t.assert_valid();
        let expected: Vec<u32> = keys.into_iter().filter(|key| key % modulus != 0).collect();
        prop_assert!(t.keys().cloned().eq(expected));
    }

    #[test]
    fn prop_linear_probing_equivalence(ops in ops_strategy()) {
        check_linear_probing(LinearProbingMap::with_probe(SipProbe::with_keys(0, 1)), ops)?;
    }

    #[test]
    fn prop_linear_probing_clustered(ops in ops_strategy()) {
        check_linear_probing(LinearProbingMap::with_probe(clustered_probe), ops)?;
    }

    #[test]
    fn prop_union_find_partition(
        size in 1usize..100,
        unions in prop::collection::vec((0usize..100, 0usize..100), 0..200),
    ) {
        let mut sets = UnionFind::new();
        let handles: Vec<SetRef> = (0..size).map(|value| sets.make_set(value)).collect();
        let mut labels: Vec<usize> = (0..size).collect();

        for (a, b) in unions {
            let (a, b) = (a % size, b % size);
            sets.union(handles[a], handles[b]);
            let (from, to) = (labels[a], labels[b]);
            for label in labels.iter_mut() {
                if *label == from {
                    *label = to;
                }
            }
        }

        for a in 0..size {
            for b in 0..size {
                prop_assert_eq!(
                    sets.is_same_set(handles[a], handles[b]),
                    labels[a] == labels[b]
                );
            }
        }
        let mut distinct = labels;
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(sets.set_count(), distinct.len());
    }
}
