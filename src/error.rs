//! Errors shared by every collection in the crate.

use thiserror::Error;

/// An enum representing the ways an operation on a collection can fail.
///
/// Lookups that simply miss are not errors: `retrieve`, `get`, and `remove` return `None`. Only
/// operations with a precondition (deleting a key that must exist, positional access, following
/// a node handle) report failures through this type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A key that must be present in the collection was not found.
    #[error("key not found")]
    KeyNotFound,
    /// Navigation moved past the first or last element.
    #[error("no such element")]
    NoSuchElement,
    /// A positional access was outside of `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// The hash table is at its capacity ceiling and cannot grow.
    #[error("hash table cannot grow beyond {capacity} slots")]
    CapacityExhausted { capacity: usize },
    /// The collection was structurally modified after a cursor was positioned.
    #[error("collection was modified while a cursor was in use")]
    ConcurrentModification,
    /// A node handle refers to a node that has since been removed.
    #[error("node handle refers to a removed node")]
    StaleHandle,
    /// A node handle or cursor was issued by a different map.
    #[error("node handle belongs to a different map")]
    ForeignHandle,
}

/// A specialized `Result` type for collection operations.
pub type Result<T> = std::result::Result<T, Error>;
