use rand::Rng;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

/// A probe sequence used by `LinearProbingMap` to place keys.
///
/// `slot(key, offset, capacity)` returns the slot to examine at step `offset` of the search for
/// `key` in a table with `capacity` slots. An implementation must be deterministic and linear:
/// for a fixed key and capacity, `slot(key, i, c)` must equal `(slot(key, 0, c) + i) % c`. Removal
/// relies on this when it shifts entries backward, and an implementation that never reaches a
/// vacant slot causes the map to panic.
///
/// Any closure of type `Fn(&K, usize, usize) -> usize` is a probe sequence.
///
/// # Examples
///
/// ```
/// use algo_collections::linear_probing::{LinearProbingMap, ProbeSequence};
///
/// let probe = |key: &u32, offset: usize, capacity: usize| (*key as usize + offset) % capacity;
/// assert_eq!(probe.slot(&6, 3, 8), 1);
///
/// let mut map = LinearProbingMap::with_probe(probe);
/// map.put(6, "six").unwrap();
/// assert_eq!(map.get(&6), Some(&"six"));
/// ```
pub trait ProbeSequence<K: ?Sized> {
    /// Returns the slot examined at step `offset` for `key` in a table of `capacity` slots.
    fn slot(&self, key: &K, offset: usize, capacity: usize) -> usize;
}

impl<K, F> ProbeSequence<K> for F
where
    K: ?Sized,
    F: Fn(&K, usize, usize) -> usize,
{
    fn slot(&self, key: &K, offset: usize, capacity: usize) -> usize {
        self(key, offset, capacity)
    }
}

/// The default probe sequence, which starts at a SipHash-1-3 digest of the key.
#[derive(Clone, Debug)]
pub struct SipProbe {
    k0: u64,
    k1: u64,
}

impl SipProbe {
    /// Constructs a `SipProbe` with randomly drawn keys.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        SipProbe {
            k0: rng.gen(),
            k1: rng.gen(),
        }
    }

    /// Constructs a `SipProbe` with fixed keys, so that placement is reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::linear_probing::{ProbeSequence, SipProbe};
    ///
    /// let probe = SipProbe::with_keys(1, 2);
    /// let home = probe.slot(&"key", 0, 16);
    /// assert_eq!(probe.slot(&"key", 1, 16), (home + 1) % 16);
    /// ```
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        SipProbe { k0, k1 }
    }

    fn hash<K>(&self, key: &K) -> u64
    where
        K: Hash + ?Sized,
    {
        let mut hasher = SipHasher13::new_with_keys(self.k0, self.k1);
        key.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for SipProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ProbeSequence<K> for SipProbe
where
    K: Hash + ?Sized,
{
    fn slot(&self, key: &K, offset: usize, capacity: usize) -> usize {
        let home = (self.hash(key) % capacity as u64) as usize;
        (home + offset % capacity) % capacity
    }
}

#[cfg(test)]
pub(crate) fn assert_linear<K, P>(probe: &P, key: &K, capacity: usize)
where
    K: ?Sized,
    P: ProbeSequence<K>,
{
    let home = probe.slot(key, 0, capacity);
    let mut seen = vec![false; capacity];
    for offset in 0..capacity {
        let slot = probe.slot(key, offset, capacity);
        assert_eq!(slot, (home + offset) % capacity, "probe sequence is not linear");
        assert!(!seen[slot], "probe sequence revisits slot {}", slot);
        seen[slot] = true;
    }
}
