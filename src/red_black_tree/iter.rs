use crate::arena::Handle;
use crate::red_black_tree::augment::Augment;
use crate::red_black_tree::tree::RawTree;

/// An iterator over the entries of a red black tree in ascending key order.
///
/// The iterator borrows the map, so the map cannot be modified while it is alive.
pub struct Iter<'a, K, V, A = ()> {
    tree: &'a RawTree<K, V, A>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V, A> Iter<'a, K, V, A>
where
    A: Augment,
{
    pub(crate) fn new(tree: &'a RawTree<K, V, A>) -> Self {
        Iter {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }

    // Iterates over the `len` consecutive nodes from `front` to `back`.
    pub(crate) fn range(
        tree: &'a RawTree<K, V, A>,
        front: Option<Handle>,
        back: Option<Handle>,
        len: usize,
    ) -> Self {
        Iter {
            tree,
            front,
            back,
            remaining: len,
        }
    }
}

impl<'a, K, V, A> Iterator for Iter<'a, K, V, A>
where
    A: Augment,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let id = self.front?;
        self.remaining -= 1;
        self.front = tree.successor(id);
        Some(tree.node(id).entry.as_pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, A> DoubleEndedIterator for Iter<'a, K, V, A>
where
    A: Augment,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let id = self.back?;
        self.remaining -= 1;
        self.back = tree.predecessor(id);
        Some(tree.node(id).entry.as_pair())
    }
}

impl<'a, K, V, A> ExactSizeIterator for Iter<'a, K, V, A> where A: Augment {}

/// An iterator over the keys of a red black tree in ascending order.
pub struct Keys<'a, K, V, A = ()> {
    pub(crate) inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A> Iterator for Keys<'a, K, V, A>
where
    A: Augment,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, A> DoubleEndedIterator for Keys<'a, K, V, A>
where
    A: Augment,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

/// An iterator over the values of a red black tree in ascending key order.
pub struct Values<'a, K, V, A = ()> {
    pub(crate) inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A> Iterator for Values<'a, K, V, A>
where
    A: Augment,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, A> DoubleEndedIterator for Values<'a, K, V, A>
where
    A: Augment,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}
