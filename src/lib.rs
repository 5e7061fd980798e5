//! Associative data structures that keep their invariants across every operation.
//!
//! - `red_black_tree::RedBlackMap`: an ordered map backed by a red black tree.
//! - `red_black_tree::RankedRedBlackMap`: a red black tree augmented with subtree sizes, which
//!   supports lookups by position in key order.
//! - `linear_probing::LinearProbingMap`: a hash map using open addressing and linear probing
//!   with backward-shift deletion.
//! - `union_find::UnionFind`: a disjoint-set forest with path compression and union by rank.
//!
//! The tree maps store their nodes in an `arena::TypedArena`, so node handles stay valid across
//! unrelated insertions and deletions and can drive a `red_black_tree::Cursor`.

mod entry;
pub mod arena;
pub mod error;
pub mod linear_probing;
pub mod red_black_tree;
pub mod union_find;

#[cfg(test)]
mod proptests;
