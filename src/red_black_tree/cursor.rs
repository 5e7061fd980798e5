use crate::error::{Error, Result};
use crate::red_black_tree::node::{MapId, NodeRef};

/// Node-handle navigation shared by `RedBlackMap` and `RankedRedBlackMap`.
///
/// This is the surface that iteration protocols are built on: handles do not borrow the map, so
/// a protocol can hold its position across calls and remove through it.
pub trait OrderedNodes {
    /// The key type of the map.
    type Key;
    /// The value type of the map.
    type Value;

    /// Returns the identity of the map, which every handle it issues carries.
    fn map_id(&self) -> MapId;

    /// Returns the number of structural modifications made to the map so far.
    fn modifications(&self) -> u64;

    /// Returns a handle to the node with the minimum key, or `None` if the map is empty.
    fn first_node(&self) -> Option<NodeRef>;

    /// Returns a handle to the node with the maximum key, or `None` if the map is empty.
    fn last_node(&self) -> Option<NodeRef>;

    /// Returns a handle to the node that follows `node` in key order.
    ///
    /// Fails with `Error::NoSuchElement` if `node` is the last node and with
    /// `Error::StaleHandle` if `node` has been removed.
    fn successor(&self, node: NodeRef) -> Result<NodeRef>;

    /// Returns a handle to the node that precedes `node` in key order.
    ///
    /// Fails with `Error::NoSuchElement` if `node` is the first node and with
    /// `Error::StaleHandle` if `node` has been removed.
    fn predecessor(&self, node: NodeRef) -> Result<NodeRef>;

    /// Returns the key and value stored at `node`.
    ///
    /// Every method taking a handle fails with `Error::ForeignHandle` if `node` was issued by a
    /// different map.
    fn entry(&self, node: NodeRef) -> Result<(&Self::Key, &Self::Value)>;

    /// Removes `node` from the map and returns its key and value.
    fn remove_node(&mut self, node: NodeRef) -> Result<(Self::Key, Self::Value)>;
}

fn neighbor(step: Result<NodeRef>) -> Result<Option<NodeRef>> {
    match step {
        Ok(node) => Ok(Some(node)),
        Err(Error::NoSuchElement) => Ok(None),
        Err(error) => Err(error),
    }
}

/// A bidirectional position in a `RedBlackMap` or `RankedRedBlackMap`.
///
/// A cursor sits between two entries. `next` and `prev` return the entry they step over, and
/// `remove` deletes the entry returned last. A cursor does not borrow the map; any structural
/// change made to the map other than through the cursor's own `remove` invalidates it, and every
/// later call fails with `Error::ConcurrentModification`. A cursor stays bound to the map it was
/// created from, and passing any other map fails with `Error::ForeignHandle`.
///
/// # Examples
///
/// ```
/// use algo_collections::red_black_tree::{Cursor, RedBlackMap};
///
/// let mut map = RedBlackMap::new();
/// for key in 0..5 {
///     map.insert(key, key * 10);
/// }
///
/// let mut cursor = Cursor::front(&map);
/// while let Some((key, _)) = cursor.next(&map).unwrap() {
///     if key % 2 == 0 {
///         cursor.remove(&mut map).unwrap();
///     }
/// }
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&1, &3]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    map: MapId,
    next: Option<NodeRef>,
    prev: Option<NodeRef>,
    last: Option<NodeRef>,
    modifications: u64,
}

impl Cursor {
    /// Constructs a cursor positioned before the first entry of the map.
    pub fn front<M>(map: &M) -> Self
    where
        M: OrderedNodes,
    {
        Cursor {
            map: map.map_id(),
            next: map.first_node(),
            prev: None,
            last: None,
            modifications: map.modifications(),
        }
    }

    /// Constructs a cursor positioned after the last entry of the map.
    pub fn back<M>(map: &M) -> Self
    where
        M: OrderedNodes,
    {
        Cursor {
            map: map.map_id(),
            next: None,
            prev: map.last_node(),
            last: None,
            modifications: map.modifications(),
        }
    }

    fn check<M>(&self, map: &M) -> Result<()>
    where
        M: OrderedNodes,
    {
        if map.map_id() != self.map {
            Err(Error::ForeignHandle)
        } else if map.modifications() == self.modifications {
            Ok(())
        } else {
            Err(Error::ConcurrentModification)
        }
    }

    /// Returns `true` if a call to `next` would return an entry.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` if a call to `prev` would return an entry.
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    /// Moves the cursor forward and returns the entry it stepped over, or `None` at the end.
    pub fn next<'a, M>(&mut self, map: &'a M) -> Result<Option<(&'a M::Key, &'a M::Value)>>
    where
        M: OrderedNodes,
    {
        self.check(map)?;
        let node = match self.next {
            Some(node) => node,
            None => return Ok(None),
        };
        let entry = map.entry(node)?;
        self.next = neighbor(map.successor(node))?;
        self.prev = Some(node);
        self.last = Some(node);
        Ok(Some(entry))
    }

    /// Moves the cursor backward and returns the entry it stepped over, or `None` at the start.
    pub fn prev<'a, M>(&mut self, map: &'a M) -> Result<Option<(&'a M::Key, &'a M::Value)>>
    where
        M: OrderedNodes,
    {
        self.check(map)?;
        let node = match self.prev {
            Some(node) => node,
            None => return Ok(None),
        };
        let entry = map.entry(node)?;
        self.prev = neighbor(map.predecessor(node))?;
        self.next = Some(node);
        self.last = Some(node);
        Ok(Some(entry))
    }

    /// Removes the entry returned by the last call to `next` or `prev`.
    ///
    /// Fails with `Error::NoSuchElement` if no entry has been returned since the cursor was
    /// created or since the last removal.
    pub fn remove<M>(&mut self, map: &mut M) -> Result<(M::Key, M::Value)>
    where
        M: OrderedNodes,
    {
        self.check(map)?;
        let node = self.last.take().ok_or(Error::NoSuchElement)?;
        if self.prev == Some(node) {
            self.prev = neighbor(map.predecessor(node))?;
        }
        if self.next == Some(node) {
            self.next = neighbor(map.successor(node))?;
        }
        let entry = map.remove_node(node)?;
        self.modifications = map.modifications();
        Ok(entry)
    }
}
