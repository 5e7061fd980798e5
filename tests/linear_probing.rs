use algo_collections::error::Error;
use algo_collections::linear_probing::{LinearProbingMap, SipProbe};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_map() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut map = LinearProbingMap::new();
    let mut expected = HashMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0..NUM_OF_OPERATIONS as u32 / 4);
        let val = rng.gen::<u32>();

        match rng.gen_range(0..4) {
            0 => assert_eq!(map.remove(&key), expected.remove(&key)),
            1 => assert_eq!(map.get(&key), expected.get(&key)),
            _ => assert_eq!(map.put(key, val), Ok(expected.insert(key, val))),
        }
    }

    assert_eq!(map.len(), expected.len());
    assert!(map.len() < map.capacity());
    for (key, value) in &expected {
        assert_eq!(map[key], *value);
    }
    assert_eq!(
        map.keys().cloned().collect::<HashSet<u32>>(),
        expected.keys().cloned().collect::<HashSet<u32>>(),
    );
}

#[test]
fn int_test_empty_table() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut map = LinearProbingMap::with_probe(SipProbe::with_keys(7, 11));
    let mut keys = HashSet::new();

    while keys.len() < NUM_OF_OPERATIONS / 10 {
        let key = rng.gen_range(1..i32::MAX);
        if keys.insert(key) {
            assert_eq!(map.put(key, key), Ok(None));
        }
    }
    assert_eq!(map.len(), keys.len());

    for key in &keys {
        assert_eq!(map.remove(key), Some(*key));
    }
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 8);
}

#[test]
fn int_test_contains_value() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut map = LinearProbingMap::new();
    let mut keys = Vec::new();

    for _ in 0..1000 {
        if keys.is_empty() || rng.gen_range(0..4) != 0 {
            let key = rng.gen_range(1..i32::MAX - 1000);
            if map.put(key, key + 567).unwrap().is_none() {
                keys.push(key);
            }
        } else {
            let key = keys.swap_remove(rng.gen_range(0..keys.len()));
            assert_eq!(map.remove(&key), Some(key + 567));
        }
    }

    for key in &keys {
        assert!(map.contains_key(key));
        assert!(map.contains_value(&(key + 567)));
    }
}

#[test]
fn int_test_capacity_ceiling() {
    let mut map = LinearProbingMap::with_probe_and_max_capacity(SipProbe::new(), 2000);
    let mut inserted = 0;
    let error = loop {
        match map.put(inserted, inserted) {
            Ok(_) => inserted += 1,
            Err(error) => break error,
        }
    };

    assert_eq!(error, Error::CapacityExhausted { capacity: 2000 });
    assert_eq!(map.capacity(), 2000);
    assert_eq!(map.len(), 1601);
    for key in 0..inserted {
        assert_eq!(map.get(&key), Some(&key));
    }
}
