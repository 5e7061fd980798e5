use crate::arena::Handle;
use crate::error::{Error, Result};
use crate::red_black_tree::augment::Rank;
use crate::red_black_tree::cursor::OrderedNodes;
use crate::red_black_tree::iter::{Iter, Keys, Values};
use crate::red_black_tree::node::{MapId, NodeRef};
use crate::red_black_tree::tree::RawTree;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// An ordered map implemented using a red black tree augmented with subtree sizes.
///
/// Every node records the sizes of its left and right subtrees, which lets the map find the
/// entry at a particular position in `O(log N)` time. The nodes holding the minimum and maximum
/// keys are cached and updated on every insertion and deletion, and positional lookups start
/// from whichever end is closer to the requested index.
///
/// # Examples
///
/// ```
/// use algo_collections::red_black_tree::RankedRedBlackMap;
///
/// let mut map = RankedRedBlackMap::new();
/// map.insert(7, "c");
/// map.insert(1, "a");
/// map.insert(4, "b");
///
/// assert_eq!(map.select(0), Ok((&1, &"a")));
/// assert_eq!(map.select(2), Ok((&7, &"c")));
/// assert_eq!(map.index_of(&4), Some(1));
/// assert!(map.select(3).is_err());
///
/// assert_eq!(map.min(), Some((&1, &"a")));
/// assert_eq!(map.delete_at(0), Ok((1, "a")));
/// assert_eq!(map.min(), Some((&4, &"b")));
/// ```
pub struct RankedRedBlackMap<K, V> {
    tree: RawTree<K, V, Rank>,
    min: Option<Handle>,
    max: Option<Handle>,
}

impl<K, V> RankedRedBlackMap<K, V> {
    /// Constructs a new, empty `RankedRedBlackMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RankedRedBlackMap;
    ///
    /// let map: RankedRedBlackMap<u32, u32> = RankedRedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RankedRedBlackMap {
            tree: RawTree::new(),
            min: None,
            max: None,
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its node is
    /// deleted, a new node is inserted, and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RankedRedBlackMap;
    ///
    /// let mut map = RankedRedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.retrieve(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let previous = self
            .tree
            .find(&key)
            .map(|id| self.remove_id(id).1);

        let becomes_min = self
            .min
            .map_or(true, |min| key < self.tree.node(min).entry.key);
        let becomes_max = self
            .max
            .map_or(true, |max| key > self.tree.node(max).entry.key);
        let id = self.tree.attach(key, value);

        // a new extreme is always one step away from the old one
        if becomes_min {
            self.min = match self.min {
                None => Some(id),
                Some(min) => self.tree.predecessor(min),
            };
        }
        if becomes_max {
            self.max = match self.max {
                None => Some(id),
                Some(max) => self.tree.successor(max),
            };
        }
        debug_assert!(!becomes_min || self.min == Some(id));
        debug_assert!(!becomes_max || self.max == Some(id));
        previous
    }

    // Advances the cached extremes past the node before unlinking it.
    fn remove_id(&mut self, id: Handle) -> (K, V) {
        if self.min == Some(id) {
            self.min = self.tree.successor(id);
        }
        if self.max == Some(id) {
            self.max = self.tree.predecessor(id);
        }
        self.tree.remove(id).into_pair()
    }

    /// Deletes a key from the map and returns its value.
    ///
    /// # Errors
    ///
    /// Fails with `Error::KeyNotFound` if the key is not in the map.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.find(key).ok_or(Error::KeyNotFound)?;
        Ok(self.remove_id(id).1)
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if such a key does not exist.
    pub fn retrieve<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.value(key)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    pub fn retrieve_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.value_mut(key)
    }

    /// Checks if a key exists in the map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values. Every node handle becomes stale.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.min = None;
        self.max = None;
    }

    /// Returns the minimum key of the map and its value in constant time. Returns `None` if the
    /// map is empty.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.min.map(|id| self.tree.entry_at(id))
    }

    /// Returns the maximum key of the map and its value in constant time. Returns `None` if the
    /// map is empty.
    pub fn max(&self) -> Option<(&K, &V)> {
        self.max.map(|id| self.tree.entry_at(id))
    }

    fn size(&self, id: Handle) -> usize {
        self.tree.node(id).augment.size()
    }

    fn select_id(&self, index: usize) -> Result<Handle> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        if index <= len - 1 - index {
            let min = self.min.expect("Expected a cached minimum in a non-empty map.");
            Ok(self.select_from_min(min, index))
        } else {
            let max = self.max.expect("Expected a cached maximum in a non-empty map.");
            Ok(self.select_from_max(max, index))
        }
    }

    // Every ancestor of the minimum covers the positions `[0, size)`.
    fn select_from_min(&self, mut id: Handle, index: usize) -> Handle {
        while self.size(id) <= index {
            id = self.tree.node(id).parent.expect("Expected root to cover every index.");
        }

        let mut before = 0;
        loop {
            let node = self.tree.node(id);
            let position = before + node.augment.left;
            match position.cmp(&index) {
                Ordering::Less => {
                    before = position + 1;
                    id = node.right.expect("Expected right subtree to cover the index.");
                },
                Ordering::Greater => {
                    id = node.left.expect("Expected left subtree to cover the index.");
                },
                Ordering::Equal => return id,
            }
        }
    }

    // Every ancestor of the maximum covers the positions `[len - size, len)`.
    fn select_from_max(&self, mut id: Handle, index: usize) -> Handle {
        let len = self.len();
        while len - self.size(id) > index {
            id = self.tree.node(id).parent.expect("Expected root to cover every index.");
        }

        let mut last = len - 1;
        loop {
            let node = self.tree.node(id);
            let position = last - node.augment.right;
            match position.cmp(&index) {
                Ordering::Greater => {
                    last = position - 1;
                    id = node.left.expect("Expected left subtree to cover the index.");
                },
                Ordering::Less => {
                    id = node.right.expect("Expected right subtree to cover the index.");
                },
                Ordering::Equal => return id,
            }
        }
    }

    /// Returns the key-value pair at a particular position in ascending key order.
    ///
    /// # Errors
    ///
    /// Fails with `Error::IndexOutOfRange` if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::error::Error;
    /// use algo_collections::red_black_tree::RankedRedBlackMap;
    ///
    /// let mut map = RankedRedBlackMap::new();
    /// map.insert(10, 1);
    /// map.insert(20, 2);
    /// assert_eq!(map.select(1), Ok((&20, &2)));
    /// assert_eq!(map.select(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn select(&self, index: usize) -> Result<(&K, &V)> {
        let id = self.select_id(index)?;
        Ok(self.tree.entry_at(id))
    }

    /// Returns a handle to the node at a particular position in ascending key order.
    pub fn select_node(&self, index: usize) -> Result<NodeRef> {
        self.select_id(index).map(|id| self.tree.node_ref(id))
    }

    /// Returns a mutable reference to the value at a particular position in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RankedRedBlackMap;
    ///
    /// let mut map = RankedRedBlackMap::new();
    /// map.insert(10, 1);
    /// *map.select_mut(0).unwrap() = 5;
    /// assert_eq!(map.retrieve(&10), Some(&5));
    /// ```
    pub fn select_mut(&mut self, index: usize) -> Result<&mut V> {
        let id = self.select_id(index)?;
        Ok(&mut self.tree.node_mut(id).entry.value)
    }

    /// Deletes the entry at a particular position in ascending key order and returns it.
    pub fn delete_at(&mut self, index: usize) -> Result<(K, V)> {
        let id = self.select_id(index)?;
        Ok(self.remove_id(id))
    }

    /// Returns the position of a key in ascending key order. Returns `None` if such a key does
    /// not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RankedRedBlackMap;
    ///
    /// let mut map = RankedRedBlackMap::new();
    /// map.insert(10, 1);
    /// map.insert(5, 2);
    /// assert_eq!(map.index_of(&10), Some(1));
    /// assert_eq!(map.index_of(&7), None);
    /// ```
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.tree.root();
        let mut before = 0;
        while let Some(id) = curr {
            let node = self.tree.node(id);
            match key.cmp(node.entry.key.borrow()) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => {
                    before += node.augment.left + 1;
                    curr = node.right;
                },
                Ordering::Equal => return Some(before + node.augment.left),
            }
        }
        None
    }

    /// Returns an iterator over the entries at positions `[start, end)` in ascending key order.
    ///
    /// # Errors
    ///
    /// Fails with `Error::IndexOutOfRange` if `end > len` or `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RankedRedBlackMap;
    ///
    /// let map: RankedRedBlackMap<u32, u32> = (0..10).map(|key| (key * 2, key)).collect();
    /// let keys: Vec<&u32> = map.slice(2, 5).unwrap().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&4, &6, &8]);
    /// ```
    pub fn slice(&self, start: usize, end: usize) -> Result<Iter<'_, K, V, Rank>> {
        let len = self.len();
        if end > len {
            return Err(Error::IndexOutOfRange { index: end, len });
        }
        if start > end {
            return Err(Error::IndexOutOfRange { index: start, len });
        }
        if start == end {
            return Ok(Iter::range(&self.tree, None, None, 0));
        }
        let front = self.select_id(start)?;
        let back = self.select_id(end - 1)?;
        Ok(Iter::range(&self.tree, Some(front), Some(back), end - start))
    }

    /// Returns a handle to the node holding a particular key. Returns `None` if such a key does
    /// not exist.
    pub fn find_node<Q>(&self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).map(|id| self.tree.node_ref(id))
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs in ascending
    /// key order.
    pub fn iter(&self) -> Iter<'_, K, V, Rank> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over the keys of the map in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, Rank> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map in ascending key order.
    pub fn values(&self) -> Values<'_, K, V, Rank> {
        Values { inner: self.iter() }
    }

    #[cfg(test)]
    pub(crate) fn assert_valid(&self)
    where
        K: Ord,
    {
        self.tree.assert_valid();
        assert_eq!(self.min, self.tree.first(), "stale cached minimum");
        assert_eq!(self.max, self.tree.last(), "stale cached maximum");
        if let Some(root) = self.tree.root() {
            assert_eq!(self.size(root), self.len());
        }
    }
}

impl<K, V> OrderedNodes for RankedRedBlackMap<K, V> {
    type Key = K;
    type Value = V;

    fn map_id(&self) -> MapId {
        self.tree.id()
    }

    fn modifications(&self) -> u64 {
        self.tree.modifications()
    }

    fn first_node(&self) -> Option<NodeRef> {
        self.min.map(|id| self.tree.node_ref(id))
    }

    fn last_node(&self) -> Option<NodeRef> {
        self.max.map(|id| self.tree.node_ref(id))
    }

    fn successor(&self, node: NodeRef) -> Result<NodeRef> {
        self.tree.next_ref(node)
    }

    fn predecessor(&self, node: NodeRef) -> Result<NodeRef> {
        self.tree.prev_ref(node)
    }

    fn entry(&self, node: NodeRef) -> Result<(&K, &V)> {
        self.tree.entry_of(node)
    }

    fn remove_node(&mut self, node: NodeRef) -> Result<(K, V)> {
        let id = self.tree.resolve(node)?;
        Ok(self.remove_id(id))
    }
}

ordered_map_impls!(RankedRedBlackMap, Rank);
