use crate::arena::{Handle, TypedArena};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::augment::Augment;
use crate::red_black_tree::node::{Color, MapId, Node, NodeRef};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicU64};

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(0);

/// The parent-linked red black tree shared by `RedBlackMap` and `RankedRedBlackMap`.
///
/// Every change to a child link goes through `set_left`, `set_right`, or `transplant`, which
/// refresh the augmentation of the affected node and its ancestors.
pub struct RawTree<K, V, A> {
    id: MapId,
    arena: TypedArena<Node<K, V, A>>,
    root: Option<Handle>,
    modifications: u64,
}

impl<K, V, A> RawTree<K, V, A>
where
    A: Augment,
{
    pub fn new() -> Self {
        RawTree {
            id: MapId(NEXT_MAP_ID.fetch_add(1, atomic::Ordering::Relaxed)),
            arena: TypedArena::new(),
            root: None,
            modifications: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    /// The number of structural changes made to the tree so far.
    pub fn modifications(&self) -> u64 {
        self.modifications
    }

    pub fn node(&self, id: Handle) -> &Node<K, V, A> {
        &self.arena[id]
    }

    pub fn node_mut(&mut self, id: Handle) -> &mut Node<K, V, A> {
        &mut self.arena[id]
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn node_ref(&self, handle: Handle) -> NodeRef {
        NodeRef {
            map: self.id,
            handle,
        }
    }

    /// Maps a node handle back to a live node of this tree.
    pub fn resolve(&self, node: NodeRef) -> Result<Handle> {
        if node.map != self.id {
            return Err(Error::ForeignHandle);
        }
        self.arena
            .get(node.handle)
            .map(|_| node.handle)
            .ok_or(Error::StaleHandle)
    }

    pub fn entry_of(&self, node: NodeRef) -> Result<(&K, &V)> {
        let id = self.resolve(node)?;
        Ok(self.arena[id].entry.as_pair())
    }

    pub fn next_ref(&self, node: NodeRef) -> Result<NodeRef> {
        let id = self.resolve(node)?;
        self.successor(id)
            .map(|next| self.node_ref(next))
            .ok_or(Error::NoSuchElement)
    }

    pub fn prev_ref(&self, node: NodeRef) -> Result<NodeRef> {
        let id = self.resolve(node)?;
        self.predecessor(id)
            .map(|prev| self.node_ref(prev))
            .ok_or(Error::NoSuchElement)
    }

    pub fn value<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| &self.arena[id].entry.value)
    }

    pub fn value_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        Some(&mut self.arena[id].entry.value)
    }

    pub fn entry_at(&self, id: Handle) -> (&K, &V) {
        self.arena[id].entry.as_pair()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.modifications += 1;
    }

    pub fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Some((id, Ordering::Equal)) => Some(id),
            _ => None,
        }
    }

    // Returns the node holding the key, or the node the key would be attached to along with the
    // side it would be attached on.
    fn locate<Q>(&self, key: &Q) -> Option<(Handle, Ordering)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root?;
        loop {
            let node = &self.arena[curr];
            let ordering = key.cmp(node.entry.key.borrow());
            let next = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some((curr, ordering)),
            };
            match next {
                Some(child) => curr = child,
                None => return Some((curr, ordering)),
            }
        }
    }

    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    fn leftmost(&self, mut id: Handle) -> Handle {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: Handle) -> Handle {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }

    pub fn successor(&self, id: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[id].right {
            return Some(self.leftmost(right));
        }
        let mut curr = id;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].left == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    pub fn predecessor(&self, id: Handle) -> Option<Handle> {
        if let Some(left) = self.arena[id].left {
            return Some(self.rightmost(left));
        }
        let mut curr = id;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].right == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Attaches a new node for a key that is not yet in the tree and rebalances.
    ///
    /// # Panics
    ///
    /// Panics if the key is already present.
    pub fn attach(&mut self, key: K, value: V) -> Handle
    where
        K: Ord,
    {
        let location = self.locate(&key);
        if let Some((_, Ordering::Equal)) = location {
            panic!("Error: attaching a key that is already in the tree.");
        }

        let id = self.arena.allocate(Node::new(key, value));
        match location {
            None => {
                self.root = Some(id);
                self.set_color(id, Color::Black);
            },
            Some((parent, Ordering::Less)) => {
                self.set_left(parent, Some(id));
                self.insert_fixup(id);
            },
            Some((parent, _)) => {
                self.set_right(parent, Some(id));
                self.insert_fixup(id);
            },
        }
        self.modifications += 1;
        id
    }

    /// Unlinks a node from the tree, rebalances, and returns its entry.
    ///
    /// A node with two children is replaced by its in-order successor, which is relinked into
    /// the removed node's position. Handles to every other node stay valid.
    pub fn remove(&mut self, id: Handle) -> Entry<K, V> {
        let (left, right, parent) = {
            let node = &self.arena[id];
            (node.left, node.right, node.parent)
        };
        let mut removed_color = self.arena[id].color;

        let (fix_node, fix_parent) = match (left, right) {
            (None, _) => {
                self.transplant(id, right);
                (right, parent)
            },
            (_, None) => {
                self.transplant(id, left);
                (left, parent)
            },
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                removed_color = self.arena[successor].color;
                let successor_right = self.arena[successor].right;
                let mut fix_parent = Some(successor);
                if self.arena[successor].parent != Some(id) {
                    fix_parent = self.arena[successor].parent;
                    self.transplant(successor, successor_right);
                    self.set_right(successor, Some(right));
                }
                self.transplant(id, Some(successor));
                self.set_left(successor, Some(left));
                let color = self.arena[id].color;
                self.set_color(successor, color);
                (successor_right, fix_parent)
            },
        };

        if removed_color == Color::Black {
            self.delete_fixup(fix_node, fix_parent);
        }
        self.modifications += 1;
        self.arena.free(id).entry
    }

    fn is_red(&self, id: Option<Handle>) -> bool {
        id.map_or(false, |id| self.arena[id].is_red())
    }

    fn set_color(&mut self, id: Handle, color: Color) {
        self.arena[id].color = color;
    }

    fn parent_of(&self, id: Handle) -> Handle {
        self.arena[id]
            .parent
            .expect("Expected node to have a parent.")
    }

    fn is_right_child(&self, parent: Handle, child: Option<Handle>) -> bool {
        let node = &self.arena[parent];
        if node.right == child {
            true
        } else if node.left == child {
            false
        } else {
            panic!("Error: parent does not reference its child.");
        }
    }

    // Recomputes the augmentation of a node; returns whether it changed.
    fn refresh(&mut self, id: Handle) -> bool {
        let (left, right) = {
            let node = &self.arena[id];
            (
                node.left.map(|left| self.arena[left].augment.clone()),
                node.right.map(|right| self.arena[right].augment.clone()),
            )
        };
        self.arena[id].augment.refresh(left.as_ref(), right.as_ref())
    }

    fn refresh_upward(&mut self, mut id: Handle) {
        while self.refresh(id) {
            match self.arena[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }

    fn set_left(&mut self, parent: Handle, child: Option<Handle>) {
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
        self.arena[parent].left = child;
        self.refresh_upward(parent);
    }

    fn set_right(&mut self, parent: Handle, child: Option<Handle>) {
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
        self.arena[parent].right = child;
        self.refresh_upward(parent);
    }

    // Puts `new` in the position of `old`, leaving `old` detached from its parent.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        match self.arena[old].parent {
            None => {
                self.root = new;
                if let Some(new) = new {
                    self.arena[new].parent = None;
                }
            },
            Some(parent) => {
                if self.is_right_child(parent, Some(old)) {
                    self.set_right(parent, new);
                } else {
                    self.set_left(parent, new);
                }
            },
        }
        self.arena[old].parent = None;
    }

    fn rotate_left(&mut self, id: Handle) {
        trace!("rotating left around {:?}", id);
        let pivot = self.arena[id]
            .right
            .expect("Expected right child node to be `Some`.");
        self.transplant(id, Some(pivot));
        let inner = self.arena[pivot].left;
        self.set_right(id, inner);
        self.set_left(pivot, Some(id));
    }

    fn rotate_right(&mut self, id: Handle) {
        trace!("rotating right around {:?}", id);
        let pivot = self.arena[id]
            .left
            .expect("Expected left child node to be `Some`.");
        self.transplant(id, Some(pivot));
        let inner = self.arena[pivot].right;
        self.set_left(id, inner);
        self.set_right(pivot, Some(id));
    }

    fn insert_fixup(&mut self, mut id: Handle) {
        while let Some(parent) = self.arena[id].parent {
            if !self.arena[parent].is_red() {
                break;
            }
            let grandparent = self.parent_of(parent);
            id = if self.is_right_child(grandparent, Some(parent)) {
                self.fix_red_right_parent(id)
            } else {
                self.fix_red_left_parent(id)
            };
        }
        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    fn fix_red_left_parent(&mut self, mut id: Handle) -> Handle {
        let parent = self.parent_of(id);
        let grandparent = self.parent_of(parent);
        let uncle = self.arena[grandparent].right;
        if let Some(uncle) = uncle.filter(|uncle| self.arena[*uncle].is_red()) {
            self.set_color(uncle, Color::Black);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            return grandparent;
        }

        if self.is_right_child(parent, Some(id)) {
            id = parent;
            self.rotate_left(id);
        }
        let parent = self.parent_of(id);
        self.set_color(parent, Color::Black);
        let grandparent = self.parent_of(parent);
        self.set_color(grandparent, Color::Red);
        self.rotate_right(grandparent);
        id
    }

    fn fix_red_right_parent(&mut self, mut id: Handle) -> Handle {
        let parent = self.parent_of(id);
        let grandparent = self.parent_of(parent);
        let uncle = self.arena[grandparent].left;
        if let Some(uncle) = uncle.filter(|uncle| self.arena[*uncle].is_red()) {
            self.set_color(uncle, Color::Black);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            return grandparent;
        }

        if !self.is_right_child(parent, Some(id)) {
            id = parent;
            self.rotate_right(id);
        }
        let parent = self.parent_of(id);
        self.set_color(parent, Color::Black);
        let grandparent = self.parent_of(parent);
        self.set_color(grandparent, Color::Red);
        self.rotate_left(grandparent);
        id
    }

    // `node` carries an extra black; `parent` is its parent even when `node` is `None`.
    fn delete_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let curr_parent = parent.expect("Expected a non-root node to have a parent.");
            let next = if self.is_right_child(curr_parent, node) {
                self.fix_right_deficit(curr_parent)
            } else {
                self.fix_left_deficit(curr_parent)
            };
            node = Some(next);
            parent = self.arena[next].parent;
        }
        if let Some(id) = node {
            self.set_color(id, Color::Black);
        }
    }

    fn fix_right_deficit(&mut self, parent: Handle) -> Handle {
        let mut sibling = self.arena[parent]
            .left
            .expect("Expected a doubly black node to have a sibling.");
        if self.arena[sibling].is_red() {
            self.set_color(sibling, Color::Black);
            self.set_color(parent, Color::Red);
            self.rotate_right(parent);
            sibling = self.arena[parent]
                .left
                .expect("Expected a doubly black node to have a sibling.");
        }

        let (far, near) = (self.arena[sibling].left, self.arena[sibling].right);
        if !self.is_red(far) && !self.is_red(near) {
            self.set_color(sibling, Color::Red);
            return parent;
        }

        if !self.is_red(far) {
            if let Some(near) = near {
                self.set_color(near, Color::Black);
            }
            self.set_color(sibling, Color::Red);
            self.rotate_left(sibling);
            sibling = self.arena[parent]
                .left
                .expect("Expected a doubly black node to have a sibling.");
        }
        let color = self.arena[parent].color;
        self.set_color(sibling, color);
        self.set_color(parent, Color::Black);
        if let Some(far) = self.arena[sibling].left {
            self.set_color(far, Color::Black);
        }
        self.rotate_right(parent);
        self.root.expect("Expected a non-empty tree.")
    }

    fn fix_left_deficit(&mut self, parent: Handle) -> Handle {
        let mut sibling = self.arena[parent]
            .right
            .expect("Expected a doubly black node to have a sibling.");
        if self.arena[sibling].is_red() {
            self.set_color(sibling, Color::Black);
            self.set_color(parent, Color::Red);
            self.rotate_left(parent);
            sibling = self.arena[parent]
                .right
                .expect("Expected a doubly black node to have a sibling.");
        }

        let (near, far) = (self.arena[sibling].left, self.arena[sibling].right);
        if !self.is_red(far) && !self.is_red(near) {
            self.set_color(sibling, Color::Red);
            return parent;
        }

        if !self.is_red(far) {
            if let Some(near) = near {
                self.set_color(near, Color::Black);
            }
            self.set_color(sibling, Color::Red);
            self.rotate_right(sibling);
            sibling = self.arena[parent]
                .right
                .expect("Expected a doubly black node to have a sibling.");
        }
        let color = self.arena[parent].color;
        self.set_color(sibling, color);
        self.set_color(parent, Color::Black);
        if let Some(far) = self.arena[sibling].right {
            self.set_color(far, Color::Black);
        }
        self.rotate_left(parent);
        self.root.expect("Expected a non-empty tree.")
    }
}

#[cfg(test)]
impl<K, V, A> RawTree<K, V, A>
where
    K: Ord,
    A: Augment + PartialEq + std::fmt::Debug,
{
    /// Checks every structural invariant of the tree and panics on the first violation.
    pub fn assert_valid(&self) {
        match self.root {
            None => assert_eq!(self.len(), 0),
            Some(root) => {
                assert_eq!(self.arena[root].color, Color::Black, "root must be black");
                assert_eq!(self.arena[root].parent, None, "root must have no parent");
                let mut count = 0;
                self.assert_subtree(root, None, None, &mut count);
                assert_eq!(count, self.len(), "reachable nodes must match length");
            },
        }
    }

    // Returns the black height of the subtree.
    fn assert_subtree(
        &self,
        id: Handle,
        lower: Option<&K>,
        upper: Option<&K>,
        count: &mut usize,
    ) -> usize {
        let node = &self.arena[id];
        *count += 1;
        if let Some(lower) = lower {
            assert!(lower < &node.entry.key, "keys must be strictly ascending");
        }
        if let Some(upper) = upper {
            assert!(&node.entry.key < upper, "keys must be strictly ascending");
        }

        let mut expected = node.augment.clone();
        expected.refresh(
            node.left.map(|left| &self.arena[left].augment),
            node.right.map(|right| &self.arena[right].augment),
        );
        assert_eq!(expected, node.augment, "stale augmentation");

        let mut heights = [0; 2];
        for child in &[node.left, node.right] {
            if let Some(child) = *child {
                assert_eq!(self.arena[child].parent, Some(id), "broken parent link");
                assert!(
                    !(node.is_red() && self.arena[child].is_red()),
                    "red node with red child",
                );
            }
        }
        if let Some(left) = node.left {
            heights[0] = self.assert_subtree(left, lower, Some(&node.entry.key), count);
        }
        if let Some(right) = node.right {
            heights[1] = self.assert_subtree(right, Some(&node.entry.key), upper, count);
        }
        assert_eq!(heights[0], heights[1], "unequal black height");
        heights[0] + if node.is_red() { 0 } else { 1 }
    }
}
