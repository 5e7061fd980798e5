use crate::error::{Error, Result};
use crate::red_black_tree::cursor::OrderedNodes;
use crate::red_black_tree::iter::{Iter, Keys, Values};
use crate::red_black_tree::node::{MapId, NodeRef};
use crate::red_black_tree::tree::RawTree;
use std::borrow::Borrow;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black. The root is black, no red node has a red child, and every path from a node down to a
/// missing child passes through the same number of black nodes. Together these keep the height
/// of the tree within twice the logarithm of the number of keys, so retrieval, insertion, and
/// deletion all take `O(log N)` time.
///
/// Inserting a key that is already present removes the old node and inserts a fresh one, so
/// node handles to the old entry become stale. Deleting an absent key is a caller error.
///
/// # Examples
///
/// ```
/// use algo_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.retrieve(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some((&0, &1)));
///
/// assert_eq!(map.delete(&0), Ok(1));
/// assert!(map.delete(&1).is_err());
/// ```
pub struct RedBlackMap<K, V> {
    tree: RawTree<K, V, ()>,
}

impl<K, V> RedBlackMap<K, V> {
    /// Constructs a new, empty `RedBlackMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            tree: RawTree::new(),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its node is
    /// deleted, a new node is inserted, and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.retrieve(&1), Some(&1));
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
            .map(|id| self.tree.remove(id).value);
        self.tree.attach(key, value);
        previous
    }

    /// Deletes a key from the map and returns its value.
    ///
    /// # Errors
    ///
    /// Fails with `Error::KeyNotFound` if the key is not in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::error::Error;
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.delete(&1), Ok(1));
    /// assert_eq!(map.delete(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.find(key).ok_or(Error::KeyNotFound)?;
        Ok(self.tree.remove(id).value)
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.retrieve(&0), None);
    /// assert_eq!(map.retrieve(&1), Some(&1));
    /// ```
    pub fn retrieve<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.value(key)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.retrieve_mut(&1).unwrap() = 2;
    /// assert_eq!(map.retrieve(&1), Some(&2));
    /// ```
    pub fn retrieve_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.value_mut(key)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
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
    }

    /// Returns the minimum key of the map and its value. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some((&1, &1)));
    /// ```
    pub fn min(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|id| self.tree.entry_at(id))
    }

    /// Returns the maximum key of the map and its value. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some((&3, &3)));
    /// ```
    pub fn max(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|id| self.tree.entry_at(id))
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
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over the keys of the map in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.values().collect::<Vec<_>>(), vec![&"a", &"b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    #[cfg(test)]
    pub(crate) fn assert_valid(&self)
    where
        K: Ord,
    {
        self.tree.assert_valid();
    }
}

impl<K, V> OrderedNodes for RedBlackMap<K, V> {
    type Key = K;
    type Value = V;

    fn map_id(&self) -> MapId {
        self.tree.id()
    }

    fn modifications(&self) -> u64 {
        self.tree.modifications()
    }

    fn first_node(&self) -> Option<NodeRef> {
        self.tree.first().map(|id| self.tree.node_ref(id))
    }

    fn last_node(&self) -> Option<NodeRef> {
        self.tree.last().map(|id| self.tree.node_ref(id))
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
        Ok(self.tree.remove(id).into_pair())
    }
}

ordered_map_impls!(RedBlackMap, ());
