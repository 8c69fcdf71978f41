use std::{
    borrow::Borrow,
    hash::Hash,
    iter::{self, FusedIterator},
    mem, slice,
};

use crate::{
    error::TableError,
    prime::next_prime,
    probe::ProbeSequence,
};

/// Number of slots in a table created with `new`
pub const DEFAULT_CAPACITY: usize = 31;

/// Load factor above which a table created with `new` grows
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.7;

/// Smallest slot count a table can probe over
const MIN_CAPACITY: usize = 2;

/// A single position in the slot array
#[derive(Debug, Clone)]
enum Slot<K, V> {
    /// Never held an entry since the last rebuild; ends every probe sequence through it
    Empty,
    /// Holds a live key-value pair
    Occupied {
        /// The stored key
        key: K,
        /// The value associated with the key
        value: V,
    },
    /// Tombstone left by `remove`; probing continues past it and insertion may reuse it
    Deleted,
}

/// Outcome of walking a key's probe sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// The key is live in this slot
    Found(usize),
    /// The key is absent and this is the first reusable slot on its sequence
    Vacant(usize),
    /// The key is absent and every slot on its sequence holds another live key
    Exhausted,
}

/// A hash table using open addressing with double hashing.
///
/// Slots live in one contiguous array whose length is always prime, so every probe sequence
/// visits every slot before repeating. Removal leaves a tombstone. Once committing a new key
/// would push the load factor above the threshold, the table first grows to the smallest prime
/// at least twice its capacity.
///
/// Lookups report a missing key as `None`; `Err` is reserved for invalid parameters and
/// exhausted probe cycles.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it between threads.
#[derive(Debug, Clone)]
pub struct ProbingHashTable<K, V> {
    /// The slot array, its length is the capacity
    slots: Vec<Slot<K, V>>,
    /// Number of occupied slots
    live: usize,
    /// Number of tombstones
    deleted: usize,
    /// Load factor above which the table grows, in (0, 1)
    load_factor_threshold: f64,
}

impl<K, V> Default for ProbingHashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// Returns true if `count` entries in `capacity` slots would exceed `threshold`
#[allow(clippy::cast_precision_loss)]
fn exceeds_threshold(count: usize, capacity: usize, threshold: f64) -> bool {
    count as f64 > threshold * capacity as f64
}

/// Smallest prime at least twice `capacity`
fn grown_capacity(capacity: usize) -> Result<usize, TableError> {
    capacity
        .checked_mul(2)
        .and_then(next_prime)
        .ok_or(TableError::CapacityOverflow { capacity })
}

/// Checks that `threshold` lies in the open interval (0, 1)
fn validate_threshold(threshold: f64) -> Result<f64, TableError> {
    if threshold.is_finite() && threshold > 0.0 && threshold < 1.0 {
        Ok(threshold)
    } else {
        Err(TableError::InvalidLoadFactor { threshold })
    }
}

impl<K, V> ProbingHashTable<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty table with `DEFAULT_CAPACITY` slots and the default threshold
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            live: 0,
            deleted: 0,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }

    /// Creates an empty table with at least `capacity` slots, rounded up to a prime
    ///
    /// # Errors
    ///
    /// `InvalidCapacity` if `capacity` is below 2, `CapacityOverflow` if no prime at least
    /// `capacity` fits in a `usize`.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_threshold(capacity, DEFAULT_LOAD_FACTOR_THRESHOLD)
    }

    /// Creates an empty table with at least `capacity` slots and the given load factor threshold
    ///
    /// # Errors
    ///
    /// As `with_capacity`, plus `InvalidLoadFactor` if `threshold` is outside (0, 1).
    pub fn with_capacity_and_threshold(
        capacity: usize,
        threshold: f64,
    ) -> Result<Self, TableError> {
        if capacity < MIN_CAPACITY {
            return Err(TableError::InvalidCapacity { requested: capacity });
        }
        let load_factor_threshold = validate_threshold(threshold)?;
        let capacity = next_prime(capacity).ok_or(TableError::CapacityOverflow { capacity })?;

        Ok(Self { slots: empty_slots(capacity), live: 0, deleted: 0, load_factor_threshold })
    }

    /// Returns the probe sequence `key` follows in the current slot array
    #[must_use]
    pub fn probe_sequence<Q>(&self, key: &Q) -> ProbeSequence
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        ProbeSequence::new(key, self.capacity())
    }

    /// Slot index of the `i`-th probe for `key`
    #[must_use]
    pub fn probe<Q>(&self, key: &Q, i: usize) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.probe_sequence(key).nth_index(i)
    }

    /// Walks the probe sequence of `key` until it finds the key or an empty slot
    fn locate<Q>(&self, key: &Q) -> Lookup
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut first_deleted = None;

        for index in self.probe_sequence(key) {
            match self.slots.get(index) {
                Some(Slot::Empty) => return Lookup::Vacant(first_deleted.unwrap_or(index)),
                Some(Slot::Deleted) => {
                    first_deleted = first_deleted.or(Some(index));
                }
                Some(Slot::Occupied { key: existing, .. }) if existing.borrow() == key => {
                    return Lookup::Found(index);
                }
                Some(Slot::Occupied { .. }) | None => {}
            }
        }

        first_deleted.map_or(Lookup::Exhausted, Lookup::Vacant)
    }

    /// Writes a new entry into a free slot and updates the counters
    fn occupy(&mut self, index: usize, key: K, value: V) -> Result<(), TableError> {
        let capacity = self.capacity();
        let Some(slot) = self.slots.get_mut(index) else {
            return Err(TableError::CapacityExhausted { capacity });
        };

        match slot {
            Slot::Empty => {}
            Slot::Deleted => self.deleted = self.deleted.saturating_sub(1),
            Slot::Occupied { .. } => return Err(TableError::CapacityExhausted { capacity }),
        }
        *slot = Slot::Occupied { key, value };
        self.live = self.live.saturating_add(1);
        Ok(())
    }

    /// Places a key known to be absent into the first free slot of its sequence.
    ///
    /// Never checks the load factor, so re-inserting during a rebuild cannot start another one.
    fn claim(&mut self, key: K, value: V) -> Result<(), TableError> {
        let vacancy = self
            .probe_sequence(&key)
            .find(|&index| matches!(self.slots.get(index), Some(Slot::Empty | Slot::Deleted)));

        match vacancy {
            Some(index) => self.occupy(index, key, value),
            None => Err(TableError::CapacityExhausted { capacity: self.capacity() }),
        }
    }

    /// Replaces the slot array with `capacity` empty slots and re-inserts every live entry
    ///
    /// Fails before touching the table if the live entries cannot fit. Past that check every
    /// `claim` succeeds, since a prime capacity gives each key a full probe cycle.
    fn rebuild(&mut self, capacity: usize) -> Result<(), TableError> {
        if self.live > capacity {
            return Err(TableError::CapacityExhausted { capacity });
        }
        debug_assert!(crate::prime::is_prime(capacity), "rebuild capacity {capacity} is not prime");

        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.live = 0;
        self.deleted = 0;

        for slot in old_slots {
            if let Slot::Occupied { key, value } = slot {
                self.claim(key, value)?;
            }
        }
        Ok(())
    }

    /// Grows until `count` entries fit under `threshold`
    fn grow_to_fit(&mut self, count: usize, threshold: f64) -> Result<(), TableError> {
        let mut capacity = self.capacity();
        while exceeds_threshold(count, capacity, threshold) {
            capacity = grown_capacity(capacity)?;
        }
        self.rebuild(capacity)
    }

    /// Inserts a key-value pair, returning the previous value if the key was live
    ///
    /// # Errors
    ///
    /// `CapacityOverflow` if the table has to grow past the largest representable prime, or
    /// `CapacityExhausted` if no free slot is found after growing.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        let lookup = self.locate(&key);

        if let Lookup::Found(index) = lookup {
            if let Some(existing) = self.value_mut_at(index) {
                return Ok(Some(mem::replace(existing, value)));
            }
        }

        let count = self.live.saturating_add(1);
        match lookup {
            Lookup::Vacant(index)
                if !exceeds_threshold(count, self.capacity(), self.load_factor_threshold) =>
            {
                self.occupy(index, key, value)?;
            }
            _ => {
                self.grow_to_fit(count, self.load_factor_threshold)?;
                self.claim(key, value)?;
            }
        }
        Ok(None)
    }

    /// Retrieves the value for a key, or `None` if the key is not live
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.locate(key) {
            Lookup::Found(index) => self.value_at(index),
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Retrieves a mutable reference to the value for a key
    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.locate(key) {
            Lookup::Found(index) => self.value_mut_at(index),
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Returns true if the key is live in the table
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        matches!(self.locate(key), Lookup::Found(_))
    }

    /// Removes a key, leaving a tombstone in its slot, and returns its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Lookup::Found(index) = self.locate(key) else {
            return None;
        };
        let slot = self.slots.get_mut(index)?;

        match mem::replace(slot, Slot::Deleted) {
            Slot::Occupied { value, .. } => {
                self.live = self.live.saturating_sub(1);
                self.deleted = self.deleted.saturating_add(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Grows to the smallest prime at least twice the capacity, dropping all tombstones
    ///
    /// # Errors
    ///
    /// `CapacityOverflow` if the grown capacity does not fit in a `usize`.
    pub fn rehash(&mut self) -> Result<(), TableError> {
        let capacity = grown_capacity(self.capacity())?;
        self.rebuild(capacity)
    }

    /// Sets the load factor threshold, growing at once if the table is already above it
    ///
    /// # Errors
    ///
    /// `InvalidLoadFactor` if `threshold` is outside (0, 1), or `CapacityOverflow` if the
    /// required growth overflows.
    pub fn set_load_factor_threshold(&mut self, threshold: f64) -> Result<(), TableError> {
        let threshold = validate_threshold(threshold)?;
        if exceeds_threshold(self.live, self.capacity(), threshold) {
            self.grow_to_fit(self.live, threshold)?;
        }
        self.load_factor_threshold = threshold;
        Ok(())
    }

    /// Number of slots `search` inspects before finding `key` or giving up
    #[must_use]
    pub fn probe_count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inspected: usize = 0;
        for index in self.probe_sequence(key) {
            inspected = inspected.saturating_add(1);
            match self.slots.get(index) {
                Some(Slot::Occupied { key: existing, .. }) if existing.borrow() != key => {}
                Some(Slot::Deleted) => {}
                _ => break,
            }
        }
        inspected
    }
}

impl<K, V> ProbingHashTable<K, V> {
    /// The value stored at `index`, if that slot is occupied
    fn value_at(&self, index: usize) -> Option<&V> {
        match self.slots.get(index) {
            Some(Slot::Occupied { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Mutable access to the value stored at `index`, if that slot is occupied
    fn value_mut_at(&mut self, index: usize) -> Option<&mut V> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if the table holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of slots, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstones left by `remove` since the last rebuild
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted
    }

    /// Returns the current load factor, live entries over capacity
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.live as f64 / self.capacity() as f64
    }

    /// Returns the load factor above which the table grows
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Removes every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.live = 0;
        self.deleted = 0;
    }

    /// Returns an iterator over the live key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter(), remaining: self.live }
    }

    /// Copies every live key-value pair out of the table, in slot order
    #[must_use]
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}

impl<K> ProbingHashTable<K, u64>
where
    K: Eq + Hash,
{
    /// Adds one to the count for `key`, starting it at 1 when absent, and returns the new count
    ///
    /// # Errors
    ///
    /// As `insert`, when the key is new and the table has to grow.
    pub fn increment(&mut self, key: K) -> Result<u64, TableError> {
        if let Some(count) = self.search_mut(&key) {
            *count = count.saturating_add(1);
            return Ok(*count);
        }
        self.insert(key, 1)?;
        Ok(1)
    }
}

/// Iterator over the live key-value pairs of a `ProbingHashTable`
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not yet visited
    slots: slice::Iter<'a, Slot<K, V>>,
    /// Live entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key, value)),
            Slot::Empty | Slot::Deleted => None,
        })?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a ProbingHashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> ProbingHashTable<K, V> {
    /// Returns true if the slot count is prime and the counters match the slots
    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let live = self.slots.iter().filter(|slot| matches!(slot, Slot::Occupied { .. })).count();
        let deleted = self.slots.iter().filter(|slot| matches!(slot, Slot::Deleted)).count();
        crate::prime::is_prime(self.capacity()) && live == self.live && deleted == self.deleted
    }
}
