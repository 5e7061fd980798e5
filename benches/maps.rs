use algo_collections::linear_probing::LinearProbingMap;
use algo_collections::red_black_tree::{RankedRedBlackMap, RedBlackMap};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap, HashSet};

const NUM_OF_OPERATIONS: usize = 1000;

fn random_pairs() -> Vec<(u32, u32)> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..NUM_OF_OPERATIONS).map(|_| (rng.gen(), rng.gen())).collect()
}

macro_rules! map_benches {
    ($($bench_name:ident: $type_name:ident, $insert:ident, $get:ident;)*) => {
        $(
            mod $bench_name {
                use super::*;

                pub fn bench_insert(c: &mut Criterion) {
                    let pairs = random_pairs();
                    c.bench_function(&format!("bench {} insert", stringify!($bench_name)), |b| {
                        b.iter(|| {
                            let mut map = $type_name::new();
                            for &(key, val) in &pairs {
                                black_box(map.$insert(key, val));
                            }
                        })
                    });
                }

                pub fn bench_get(c: &mut Criterion) {
                    let pairs = random_pairs();
                    let mut map = $type_name::new();
                    for &(key, val) in &pairs {
                        black_box(map.$insert(key, val));
                    }
                    let distinct = pairs.iter().map(|(key, _)| key).collect::<HashSet<_>>().len();
                    assert_eq!(map.len(), distinct, "every insertion must land before timing lookups");
                    c.bench_function(&format!("bench {} get", stringify!($bench_name)), move |b| {
                        b.iter(|| {
                            for (key, _) in &pairs {
                                black_box(map.$get(key));
                            }
                        })
                    });
                }
            }
        )*

        criterion_group!(
            benches,
            $(
                $bench_name::bench_insert,
                $bench_name::bench_get,
            )*
            bench_ranked_select,
        );
    }
}

fn bench_ranked_select(c: &mut Criterion) {
    let map: RankedRedBlackMap<u32, u32> = random_pairs().into_iter().collect();
    let len = map.len();
    c.bench_function("bench ranked_red_black_map select", move |b| {
        b.iter(|| {
            for index in 0..len {
                black_box(map.select(index).ok());
            }
        })
    });
}

map_benches!(
    btree_map: BTreeMap, insert, get;
    red_black_map: RedBlackMap, insert, retrieve;
    ranked_red_black_map: RankedRedBlackMap, insert, retrieve;
    hash_map: HashMap, insert, get;
    linear_probing_map: LinearProbingMap, put, get;
);

criterion_main!(benches);
