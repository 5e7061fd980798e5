//! Disjoint-set forest with path compression and union by rank.

use log::trace;
use std::cmp::Ordering;

/// A handle to an element of a `UnionFind`.
///
/// Handles are plain indexes into the forest that created them. Using a handle with a different
/// forest is a caller error and panics if the index is out of range.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SetRef(usize);

struct Node<T> {
    payload: T,
    parent: usize,
    rank: u32,
}

/// A collection of disjoint sets that can be merged but never split.
///
/// Every set is a tree whose root is the representative of the set. `find` repoints every node
/// it visits directly at the root, and `union` hangs the root of lower rank under the root of
/// higher rank, so any sequence of operations runs in nearly constant amortized time per
/// operation.
///
/// # Examples
///
/// ```
/// use algo_collections::union_find::UnionFind;
///
/// let mut sets = UnionFind::new();
/// let a = sets.make_set("a");
/// let b = sets.make_set("b");
/// let c = sets.make_set("c");
///
/// assert!(!sets.is_same_set(a, b));
/// sets.union(a, b);
/// assert!(sets.is_same_set(a, b));
/// assert!(!sets.is_same_set(b, c));
/// assert_eq!(sets.set_count(), 2);
/// assert_eq!(sets[c], "c");
/// ```
pub struct UnionFind<T> {
    nodes: Vec<Node<T>>,
    set_count: usize,
}

impl<T> UnionFind<T> {
    /// Constructs a new, empty `UnionFind<T>`.
    pub fn new() -> Self {
        UnionFind {
            nodes: Vec::new(),
            set_count: 0,
        }
    }

    /// Adds `payload` to the forest as a new singleton set and returns a handle to it.
    pub fn make_set(&mut self, payload: T) -> SetRef {
        let index = self.nodes.len();
        self.nodes.push(Node {
            payload,
            parent: index,
            rank: 0,
        });
        self.set_count += 1;
        SetRef(index)
    }

    /// Returns the representative of the set containing `set`. Every node on the path to the
    /// representative is repointed directly at it.
    ///
    /// # Panics
    ///
    /// Panics if `set` does not belong to this forest.
    pub fn find(&mut self, set: SetRef) -> SetRef {
        let parent = self.nodes[set.0].parent;
        if parent == set.0 {
            return set;
        }
        let root = self.find(SetRef(parent));
        self.nodes[set.0].parent = root.0;
        root
    }

    /// Merges the sets containing `a` and `b` and returns the representative of the merged set.
    ///
    /// The root of lower rank is attached under the root of higher rank. On a tie, the root of
    /// `a`'s set is attached under the root of `b`'s set, whose rank grows by one.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::union_find::UnionFind;
    ///
    /// let mut sets = UnionFind::new();
    /// let a = sets.make_set(1);
    /// let b = sets.make_set(2);
    /// let root = sets.union(a, b);
    /// assert_eq!(sets.find(a), root);
    /// assert_eq!(sets.find(b), root);
    /// ```
    pub fn union(&mut self, a: SetRef, b: SetRef) -> SetRef {
        let a = self.find(a);
        let b = self.find(b);
        if a == b {
            return a;
        }

        self.set_count -= 1;
        let (child, root) = match self.nodes[a.0].rank.cmp(&self.nodes[b.0].rank) {
            Ordering::Greater => (b, a),
            Ordering::Less => (a, b),
            Ordering::Equal => {
                self.nodes[b.0].rank += 1;
                (a, b)
            },
        };
        trace!("linking set {} under set {}", child.0, root.0);
        self.nodes[child.0].parent = root.0;
        root
    }

    /// Checks if `a` and `b` belong to the same set.
    pub fn is_same_set(&mut self, a: SetRef, b: SetRef) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns an immutable reference to the payload of `set`.
    pub fn get(&self, set: SetRef) -> &T {
        &self.nodes[set.0].payload
    }

    /// Returns a mutable reference to the payload of `set`.
    pub fn get_mut(&mut self, set: SetRef) -> &mut T {
        &mut self.nodes[set.0].payload
    }

    /// Returns the number of elements in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the forest has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of disjoint sets in the forest.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    #[cfg(test)]
    fn rank(&self, set: SetRef) -> u32 {
        self.nodes[set.0].rank
    }
}

impl<T> Default for UnionFind<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<SetRef> for UnionFind<T> {
    type Output = T;

    fn index(&self, set: SetRef) -> &Self::Output {
        self.get(set)
    }
}

impl<T> std::ops::IndexMut<SetRef> for UnionFind<T> {
    fn index_mut(&mut self, set: SetRef) -> &mut Self::Output {
        self.get_mut(set)
    }
}
