use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::linear_probing::probe::{ProbeSequence, SipProbe};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp;
use std::hash::Hash;
use std::mem;
use std::ops::Index;
use std::slice;

const MIN_CAPACITY: usize = 8;
const DOUBLING_LIMIT: usize = 1024;
const GROWTH_INCREMENT: usize = 1024;

/// A hash map implemented using open addressing with linear probing.
///
/// Entries live directly in a table of slots. A key is stored at the first vacant slot of its
/// probe sequence, and no vacant slot ever separates a key from the start of its sequence, so a
/// lookup can stop at the first vacant slot it meets. Removal keeps that invariant by shifting
/// later entries backward into the vacated slot instead of leaving a tombstone.
///
/// The table grows before an insertion once more than 80% of its slots are occupied, doubling
/// while it has fewer than 1024 slots and growing by 1024 slots afterwards. It shrinks by half
/// after a removal leaves fewer than 10% of its slots occupied, but never below 8 slots.
///
/// Lookups accept any borrowed form `Q` of the key. The probe sequence must place a borrowed key
/// in the same slots as the owned key, which `SipProbe` does for types whose `Borrow` impls hash
/// consistently.
///
/// # Examples
///
/// ```
/// use algo_collections::linear_probing::LinearProbingMap;
///
/// let mut map = LinearProbingMap::new();
/// map.put("a", 1).unwrap();
/// map.put("b", 2).unwrap();
///
/// assert_eq!(map[&"a"], 1);
/// assert_eq!(map.get(&"c"), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.remove(&"a"), Some(1));
/// assert_eq!(map.remove(&"a"), None);
/// ```
pub struct LinearProbingMap<K, V, P = SipProbe> {
    slots: Vec<Option<Entry<K, V>>>,
    len: usize,
    max_capacity: usize,
    probe: P,
}

fn vacant_slots<K, V>(capacity: usize) -> Vec<Option<Entry<K, V>>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

impl<K, V> LinearProbingMap<K, V>
where
    K: Hash + Eq,
{
    /// Constructs a new, empty `LinearProbingMap<K, V>` that hashes keys with randomly keyed
    /// SipHash.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::linear_probing::LinearProbingMap;
    ///
    /// let map: LinearProbingMap<u32, u32> = LinearProbingMap::new();
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_probe(SipProbe::new())
    }
}

impl<K, V, P> LinearProbingMap<K, V, P>
where
    K: Eq,
    P: ProbeSequence<K>,
{
    /// Constructs a new, empty `LinearProbingMap<K, V, P>` that places keys with `probe`.
    pub fn with_probe(probe: P) -> Self {
        Self::with_probe_and_max_capacity(probe, isize::MAX as usize)
    }

    /// Constructs a new, empty `LinearProbingMap<K, V, P>` that places keys with `probe` and
    /// never grows beyond `max_capacity` slots. A ceiling below the minimum capacity of 8 slots is
    /// raised to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::error::Error;
    /// use algo_collections::linear_probing::{LinearProbingMap, SipProbe};
    ///
    /// let mut map = LinearProbingMap::with_probe_and_max_capacity(SipProbe::new(), 8);
    /// for key in 0..7 {
    ///     map.put(key, key).unwrap();
    /// }
    /// assert_eq!(map.put(7, 7), Err(Error::CapacityExhausted { capacity: 8 }));
    /// ```
    pub fn with_probe_and_max_capacity(probe: P, max_capacity: usize) -> Self {
        LinearProbingMap {
            slots: vacant_slots(MIN_CAPACITY),
            len: 0,
            max_capacity: cmp::max(max_capacity, MIN_CAPACITY),
            probe,
        }
    }

    // Walks the probe sequence of `key`. Returns `Ok` with the slot holding the key, or `Err` with
    // the first vacant slot.
    fn locate<Q>(&self, key: &Q) -> std::result::Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        P: ProbeSequence<Q>,
    {
        let capacity = self.capacity();
        for offset in 0..capacity {
            let index = <P as ProbeSequence<Q>>::slot(&self.probe, key, offset, capacity);
            match &self.slots[index] {
                None => return Err(index),
                Some(entry) if entry.key.borrow() == key => return Ok(index),
                Some(_) => {},
            }
        }
        panic!("Error: probe sequence visited every slot without reaching a vacancy.");
    }

    fn rehash(&mut self, capacity: usize) {
        let old_slots = mem::replace(&mut self.slots, vacant_slots(capacity));
        for entry in old_slots.into_iter().flatten() {
            match self.locate(&entry.key) {
                Err(index) => self.slots[index] = Some(entry),
                Ok(_) => panic!("Error: duplicate key found while rehashing."),
            }
        }
    }

    fn grow(&mut self) -> Result<()> {
        let capacity = self.capacity();
        if capacity >= self.max_capacity {
            return Err(Error::CapacityExhausted { capacity });
        }
        let new_capacity = if capacity < DOUBLING_LIMIT {
            capacity * 2
        } else {
            capacity.saturating_add(GROWTH_INCREMENT)
        };
        let new_capacity = cmp::min(new_capacity, self.max_capacity);
        debug!("growing hash table from {} to {} slots", capacity, new_capacity);
        self.rehash(new_capacity);
        Ok(())
    }

    fn shrink(&mut self) {
        let capacity = self.capacity();
        let new_capacity = cmp::max(capacity / 2, MIN_CAPACITY);
        debug!("shrinking hash table from {} to {} slots", capacity, new_capacity);
        self.rehash(new_capacity);
    }

    // Fills `hole` with the next entry whose probe sequence passes through it, repeating from the
    // slot that entry vacated until a vacant slot ends the cluster.
    fn shift_backward(&mut self, mut hole: usize) {
        let capacity = self.capacity();
        let mut index = (hole + 1) % capacity;
        while let Some(entry) = &self.slots[index] {
            let home = self.probe.slot(&entry.key, 0, capacity);
            if (index + capacity - home) % capacity >= (index + capacity - hole) % capacity {
                trace!("shifting entry from slot {} to slot {}", index, hole);
                self.slots[hole] = self.slots[index].take();
                hole = index;
            }
            index = (index + 1) % capacity;
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned.
    ///
    /// # Errors
    ///
    /// Fails with `Error::CapacityExhausted` if the map needs to grow but already has its maximum
    /// number of slots.
    ///
    /// # Panics
    ///
    /// Panics if the probe sequence misses every vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::linear_probing::LinearProbingMap;
    ///
    /// let mut map = LinearProbingMap::new();
    /// assert_eq!(map.put(1, 1), Ok(None));
    /// assert_eq!(map.put(1, 2), Ok(Some(1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        if self.len * 5 > self.capacity() * 4 {
            self.grow()?;
        }
        match self.locate(&key) {
            Ok(index) => {
                let entry = self.slots[index]
                    .as_mut()
                    .expect("Expected an entry in the located slot.");
                Ok(Some(mem::replace(&mut entry.value, value)))
            },
            Err(index) => {
                self.slots[index] = Some(Entry::new(key, value));
                self.len += 1;
                Ok(None)
            },
        }
    }

    /// Inserts every key-value pair of an iterator into the map, stopping at the first failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::linear_probing::LinearProbingMap;
    ///
    /// let mut map = LinearProbingMap::new();
    /// map.put_all((0..100).map(|key| (key, key * 2))).unwrap();
    /// assert_eq!(map.len(), 100);
    /// assert_eq!(map.get(&50), Some(&100));
    /// ```
    pub fn put_all<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.put(key, value)?;
        }
        Ok(())
    }

    /// Removes a key from the map and returns its value. Returns `None` if such a key does not
    /// exist.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        P: ProbeSequence<Q>,
    {
        let index = self.locate(key).ok()?;
        let entry = self.slots[index]
            .take()
            .expect("Expected an entry in the located slot.");
        self.len -= 1;

        let capacity = self.capacity();
        if capacity > MIN_CAPACITY && self.len * 10 < capacity {
            self.shrink();
        } else {
            self.shift_backward(index);
        }
        Some(entry.value)
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if such a key does not exist.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        P: ProbeSequence<Q>,
    {
        let index = self.locate(key).ok()?;
        self.slots[index].as_ref().map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        P: ProbeSequence<Q>,
    {
        let index = self.locate(key).ok()?;
        self.slots[index].as_mut().map(|entry| &mut entry.value)
    }

    /// Checks if a key exists in the map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        P: ProbeSequence<Q>,
    {
        self.locate(key).is_ok()
    }
}

impl<K, V, P> LinearProbingMap<K, V, P> {
    /// Checks if a value exists in the map. This scans every slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::linear_probing::LinearProbingMap;
    ///
    /// let mut map = LinearProbingMap::new();
    /// map.put(1, "one").unwrap();
    /// assert!(map.contains_value(&"one"));
    /// assert!(!map.contains_value(&"two"));
    /// ```
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == value)
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the map.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Clears the map, removing all values and returning to the minimum capacity.
    pub fn clear(&mut self) {
        debug!("clearing hash table of {} slots", self.capacity());
        self.slots = vacant_slots(MIN_CAPACITY);
        self.len = 0;
    }

    /// Returns an iterator over the map. The iterator yields key-value pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Returns a mutable iterator over the map. The iterator yields keys with mutable references
    /// to their values in slot order.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::linear_probing::LinearProbingMap;
    ///
    /// let mut map = LinearProbingMap::new();
    /// map.put_all((0..10).map(|key| (key, key))).unwrap();
    /// for (key, value) in map.iter_mut() {
    ///     *value += key;
    /// }
    /// assert_eq!(map.get(&4), Some(&8));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys of the map in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

#[cfg(test)]
impl<K, V, P> LinearProbingMap<K, V, P>
where
    K: Eq,
    P: ProbeSequence<K>,
{
    /// Checks that the element count matches the table and that no vacant slot separates an
    /// entry from the start of its probe sequence.
    pub(crate) fn assert_valid(&self) {
        let capacity = self.capacity();
        assert!(capacity >= MIN_CAPACITY);
        assert!(capacity <= self.max_capacity);
        assert!(self.len < capacity, "table must keep a vacant slot");
        assert_eq!(self.slots.iter().flatten().count(), self.len);
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = slot {
                let mut slot = self.probe.slot(&entry.key, 0, capacity);
                while slot != index {
                    assert!(self.slots[slot].is_some(), "gap at slot {} before {}", slot, index);
                    slot = (slot + 1) % capacity;
                }
                assert_eq!(self.locate(&entry.key), Ok(index));
            }
        }
    }
}

impl<K, V> Default for LinearProbingMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, P> IntoIterator for &'a LinearProbingMap<K, V, P> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, P> IntoIterator for &'a mut LinearProbingMap<K, V, P> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, P, Q> Index<&Q> for LinearProbingMap<K, V, P>
where
    K: Eq + Borrow<Q>,
    Q: Eq + ?Sized,
    P: ProbeSequence<K> + ProbeSequence<Q>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

/// An iterator over the entries of a `LinearProbingMap` in slot order.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Option<Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in &mut self.slots {
            if let Some(entry) = slot {
                self.remaining -= 1;
                return Some(entry.as_pair());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// A mutable iterator over the entries of a `LinearProbingMap` in slot order.
pub struct IterMut<'a, K, V> {
    slots: slice::IterMut<'a, Option<Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in &mut self.slots {
            if let Some(entry) = slot {
                self.remaining -= 1;
                return Some((&entry.key, &mut entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the keys of a `LinearProbingMap` in slot order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the values of a `LinearProbingMap` in slot order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::LinearProbingMap;
    use crate::error::Error;
    use crate::linear_probing::probe::{assert_linear, SipProbe};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn same_home(_: &u32, offset: usize, capacity: usize) -> usize {
        offset % capacity
    }

    fn identity(key: &u32, offset: usize, capacity: usize) -> usize {
        (*key as usize + offset) % capacity
    }

    #[test]
    fn test_len_empty() {
        let map: LinearProbingMap<u32, u32> = LinearProbingMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 8);
        map.assert_valid();
    }

    #[test]
    fn test_put() {
        let mut map = LinearProbingMap::new();
        assert_eq!(map.put(1, 1), Ok(None));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_put_replace() {
        let mut map = LinearProbingMap::new();
        assert_eq!(map.put(1, 1), Ok(None));
        assert_eq!(map.put(1, 3), Ok(Some(1)));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = LinearProbingMap::new();
        map.put(1, 1).unwrap();
        assert_eq!(map.remove(&1), Some(1));
        assert!(!map.contains_key(&1));
        assert_eq!(map.remove(&1), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut map = LinearProbingMap::new();
        map.put(1, 1).unwrap();
        {
            let value = map.get_mut(&1).unwrap();
            *value = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_growth_schedule() {
        let mut map = LinearProbingMap::with_probe(SipProbe::with_keys(0, 0));
        for key in 0..7u32 {
            map.put(key, key).unwrap();
        }
        assert_eq!(map.capacity(), 8);
        map.put(7, 7).unwrap();
        assert_eq!(map.capacity(), 16);

        for key in 8..1639u32 {
            map.put(key, key).unwrap();
        }
        assert_eq!(map.capacity(), 2048);
        map.put(1639, 1639).unwrap();
        assert_eq!(map.capacity(), 3072);
        map.assert_valid();
    }

    #[test]
    fn test_shrink() {
        let mut map = LinearProbingMap::new();
        map.put_all((0..8u32).map(|key| (key, key))).unwrap();
        assert_eq!(map.capacity(), 16);
        for key in 0..6 {
            assert_eq!(map.remove(&key), Some(key));
        }
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.remove(&6), Some(6));
        assert_eq!(map.capacity(), 8);
        assert_eq!(map.get(&7), Some(&7));
        map.assert_valid();
    }

    #[test]
    fn test_clear() {
        let mut map = LinearProbingMap::new();
        map.put_all((0..100u32).map(|key| (key, key))).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 8);
        assert_eq!(map.get(&1), None);
        map.assert_valid();
    }

    #[test]
    fn test_capacity_exhausted() {
        let mut map = LinearProbingMap::with_probe_and_max_capacity(SipProbe::new(), 12);
        map.put_all((0..8u32).map(|key| (key, key))).unwrap();
        assert_eq!(map.capacity(), 12);
        map.put_all((8..10u32).map(|key| (key, key))).unwrap();
        assert_eq!(map.put(10, 10), Err(Error::CapacityExhausted { capacity: 12 }));
        assert_eq!(map.len(), 10);
        map.assert_valid();
    }

    #[test]
    fn test_contains_value() {
        let mut map = LinearProbingMap::new();
        map.put_all((0..50u32).map(|key| (key, key + 567))).unwrap();
        for key in 0..50 {
            assert!(map.contains_value(&(key + 567)));
        }
        assert!(!map.contains_value(&0));
    }

    #[test]
    fn test_backward_shift_single_cluster() {
        let mut map = LinearProbingMap::with_probe(same_home);
        for key in 1..=3u32 {
            map.put(key, key).unwrap();
        }
        assert_eq!(map.remove(&2), Some(2));
        map.assert_valid();
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.get(&3), Some(&3));
        assert_eq!(map.remove(&1), Some(1));
        assert_eq!(map.get(&3), Some(&3));
        map.assert_valid();
    }

    #[test]
    fn test_backward_shift_mixed_homes() {
        let mut map = LinearProbingMap::with_probe(identity);
        // 0 and 8 share slot 0, pushing 1 out of its home into slot 2
        map.put(0, 0).unwrap();
        map.put(8, 8).unwrap();
        map.put(1, 1).unwrap();
        map.put(3, 3).unwrap();
        map.assert_valid();

        assert_eq!(map.remove(&0), Some(0));
        map.assert_valid();
        for key in &[8, 1, 3] {
            assert_eq!(map.get(key), Some(key));
        }
        assert_eq!(map.remove(&0), None);
    }

    #[test]
    fn test_backward_shift_wraps_around() {
        let mut map = LinearProbingMap::with_probe(identity);
        map.put(7, 7).unwrap();
        map.put(15, 15).unwrap();
        map.put(23, 23).unwrap();
        map.put(2, 2).unwrap();
        map.assert_valid();

        assert_eq!(map.remove(&7), Some(7));
        map.assert_valid();
        for key in &[15, 23, 2] {
            assert_eq!(map.get(key), Some(key));
        }
    }

    #[test]
    #[should_panic(expected = "visited every slot without reaching a vacancy")]
    fn test_sequence_never_leaves_home() {
        let mut map = LinearProbingMap::with_probe(|_: &u32, _: usize, _: usize| 0);
        map.put(1, 1).unwrap();
        map.put(2, 2).unwrap();
    }

    #[test]
    #[should_panic(expected = "visited every slot without reaching a vacancy")]
    fn test_sequence_collapses_after_growth() {
        // linear at 8 slots, stuck on slot 0 once the table grows
        let placement = |key: &u32, offset: usize, capacity: usize| {
            if capacity == 8 {
                (*key as usize + offset) % capacity
            } else {
                0
            }
        };
        let mut map = LinearProbingMap::with_probe(placement);
        for key in 0..7u32 {
            map.put(key, key).unwrap();
        }
        assert_eq!(map.capacity(), 8);
        map.put(7, 7).unwrap();
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = LinearProbingMap::new();
        for key in 0..100u32 {
            map.put(key.to_string(), key).unwrap();
        }
        assert_eq!(map.get("42"), Some(&42));
        assert!(map.contains_key("99"));
        assert!(!map.contains_key("100"));
        *map.get_mut("7").unwrap() = 70;
        assert_eq!(map["7"], 70);
        assert_eq!(map.remove("0"), Some(0));
        assert_eq!(map.get("0"), None);
        map.assert_valid();
    }

    #[test]
    fn test_probe_contract() {
        for &capacity in &[8, 16, 1024] {
            assert_linear(&same_home, &5u32, capacity);
            assert_linear(&identity, &5u32, capacity);
        }
    }

    #[test]
    fn test_iter() {
        let mut map = LinearProbingMap::new();
        map.put_all((0..20u32).map(|key| (key, key * 2))).unwrap();
        assert_eq!(map.iter().len(), 20);

        let mut pairs: Vec<(u32, u32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
        pairs.sort();
        assert_eq!(pairs, (0..20).map(|key| (key, key * 2)).collect::<Vec<_>>());

        let keys: HashSet<u32> = map.keys().cloned().collect();
        assert_eq!(keys, (0..20).collect::<HashSet<u32>>());
        assert_eq!(map.values().sum::<u32>(), (0..20).map(|key| key * 2).sum::<u32>());
    }

    #[test]
    fn test_iter_mut() {
        let mut map = LinearProbingMap::new();
        map.put_all((0..20u32).map(|key| (key, key))).unwrap();
        for (_, value) in &mut map {
            *value = 0;
        }
        assert!(map.values().all(|value| *value == 0));
    }

    #[test]
    fn test_random_operations() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut map = LinearProbingMap::new();
        let mut keys = Vec::new();
        for _ in 0..2000 {
            if keys.is_empty() || rng.gen_range(0..4) != 0 {
                let key = rng.gen_range(1..i32::MAX);
                if map.put(key, key).unwrap().is_none() {
                    keys.push(key);
                }
            } else {
                let index = rng.gen_range(0..keys.len());
                let key = keys.swap_remove(index);
                assert_eq!(map.remove(&key), Some(key));
            }
        }
        map.assert_valid();
        assert_eq!(map.len(), keys.len());
        for key in &keys {
            assert!(map.contains_key(key));
        }
        for key in keys {
            assert_eq!(map.remove(&key), Some(key));
        }
        assert!(map.is_empty());
        map.assert_valid();
    }
}
