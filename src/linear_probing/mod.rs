//! Hash map that resolves collisions with open addressing and linear probing.

mod map;
mod probe;

pub use self::map::{Iter, IterMut, Keys, LinearProbingMap, Values};
pub use self::probe::{ProbeSequence, SipProbe};
