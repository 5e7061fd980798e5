/// A summary stored in every node of a red black tree and derived from the node's children.
///
/// The tree calls `refresh` on a node whenever one of its child links changes, including the
/// three links touched by a rotation. When `refresh` reports a change, the tree refreshes the
/// parent as well and keeps climbing until a node's summary is already correct.
pub trait Augment: Clone + Default {
    /// Recomputes the summary of a node from the summaries of its children. Returns `true` if
    /// the stored summary changed.
    fn refresh(&mut self, left: Option<&Self>, right: Option<&Self>) -> bool;
}

/// The plain red black tree carries no summary.
impl Augment for () {
    fn refresh(&mut self, _left: Option<&Self>, _right: Option<&Self>) -> bool {
        false
    }
}

/// Subtree sizes used for order statistics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Rank {
    pub left: usize,
    pub right: usize,
}

impl Rank {
    /// The number of nodes in the subtree rooted at the node.
    pub fn size(&self) -> usize {
        self.left + 1 + self.right
    }
}

impl Augment for Rank {
    fn refresh(&mut self, left: Option<&Self>, right: Option<&Self>) -> bool {
        let old_size = self.size();
        self.left = left.map_or(0, Rank::size);
        self.right = right.map_or(0, Rank::size);
        self.size() != old_size
    }
}
