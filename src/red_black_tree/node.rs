use crate::arena::Handle;
use crate::entry::Entry;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// The arena owns every node; `parent`, `left`, and `right` are plain handles and never imply
/// ownership.
pub struct Node<K, V, A> {
    pub entry: Entry<K, V>,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub augment: A,
}

impl<K, V, A> Node<K, V, A>
where
    A: Default,
{
    pub fn new(key: K, value: V) -> Self {
        Node {
            entry: Entry::new(key, value),
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
            augment: A::default(),
        }
    }
}

impl<K, V, A> Node<K, V, A> {
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// An identity stamped on every red black tree when it is constructed.
///
/// Node handles and cursors record the identity of the map that issued them, so using them with
/// a different map fails with `Error::ForeignHandle` instead of reading an unrelated node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MapId(pub(crate) u64);

/// A handle to a node of a `RedBlackMap` or `RankedRedBlackMap`.
///
/// Node handles do not borrow the map, so they can be held across calls to `successor` and
/// `predecessor`. A handle is invalidated when its node is removed, including when an existing
/// key is inserted again: using it afterwards fails with `Error::StaleHandle`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeRef {
    pub(crate) map: MapId,
    pub(crate) handle: Handle,
}
