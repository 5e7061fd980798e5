//! Self-balancing binary search trees that use a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! `RedBlackMap` is a plain ordered map. `RankedRedBlackMap` additionally records subtree sizes
//! in every node so that entries can be looked up by their position in key order. Both maps hand
//! out `NodeRef` handles that survive unrelated insertions and deletions, and both can be walked
//! and edited through a `Cursor`.

// Trait impls shared by both maps. Each map provides `new`, `insert`, `retrieve`, and `iter`.
macro_rules! ordered_map_impls {
    ($map:ident, $augment:ty) => {
        impl<K, V> Default for $map<K, V> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<'a, K, V> IntoIterator for &'a $map<K, V> {
            type IntoIter = $crate::red_black_tree::iter::Iter<'a, K, V, $augment>;
            type Item = (&'a K, &'a V);

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<K, V> Extend<(K, V)> for $map<K, V>
        where
            K: Ord,
        {
            fn extend<I>(&mut self, iter: I)
            where
                I: IntoIterator<Item = (K, V)>,
            {
                for (key, value) in iter {
                    self.insert(key, value);
                }
            }
        }

        impl<K, V> std::iter::FromIterator<(K, V)> for $map<K, V>
        where
            K: Ord,
        {
            fn from_iter<I>(iter: I) -> Self
            where
                I: IntoIterator<Item = (K, V)>,
            {
                let mut map = $map::new();
                map.extend(iter);
                map
            }
        }

        impl<K, V, Q> std::ops::Index<&Q> for $map<K, V>
        where
            K: std::borrow::Borrow<Q>,
            Q: Ord + ?Sized,
        {
            type Output = V;

            fn index(&self, key: &Q) -> &Self::Output {
                self.retrieve(key).expect("Error: key does not exist.")
            }
        }
    };
}

mod augment;
mod cursor;
mod iter;
mod map;
mod node;
mod ranked;
mod tree;

pub use self::augment::{Augment, Rank};
pub use self::cursor::{Cursor, OrderedNodes};
pub use self::iter::{Iter, Keys, Values};
pub use self::map::RedBlackMap;
pub use self::node::{MapId, NodeRef};
pub use self::ranked::RankedRedBlackMap;
