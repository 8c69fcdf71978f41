//! Double hashing probe sequences
//!
//! A key's sequence is `probe(key, i) = (h1 + i * h2) mod capacity` where `h1` is the home slot
//! and `h2` is a stride in `1..capacity`. With a prime capacity the stride is coprime to it, so
//! the sequence visits every slot exactly once before repeating.

use std::{
    hash::{DefaultHasher, Hash, Hasher},
    iter::FusedIterator,
};

/// Seed written ahead of the key so the stride hash is independent of the home hash
const STRIDE_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Hashes the key for its home slot
fn home_hash<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Hashes the key for its stride
fn stride_hash<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    STRIDE_SEED.hash(&mut hasher);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Reduces a hash into `0..modulus`. `modulus` must be non-zero.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn reduce(hash: u64, modulus: usize) -> usize {
    // the remainder is below `modulus`, so narrowing back to `usize` is lossless
    (hash % modulus as u64) as usize
}

/// The sequence of slot indices visited while probing for one key
///
/// Yields exactly `capacity` indices, then stops.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    /// The home slot `h1`
    home: usize,
    /// Index yielded next
    next_index: usize,
    /// Distance between consecutive indices, in `1..capacity`
    stride: usize,
    /// Number of slots in the table being probed
    capacity: usize,
    /// Indices left before the cycle closes
    remaining: usize,
}

impl ProbeSequence {
    /// Starts the probe sequence of `key` over `capacity` slots. `capacity` must be at least 2.
    pub(crate) fn new<Q: Hash + ?Sized>(key: &Q, capacity: usize) -> Self {
        debug_assert!(capacity >= 2, "probing needs at least 2 slots");
        let home = reduce(home_hash(key), capacity);
        Self {
            home,
            next_index: home,
            stride: reduce(stride_hash(key), capacity.saturating_sub(1)).saturating_add(1),
            capacity,
            remaining: capacity,
        }
    }

    /// Slot index of the `i`-th probe, `(h1 + i * h2) mod capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn nth_index(&self, i: usize) -> usize {
        let offset = (i as u128 * self.stride as u128) % self.capacity as u128;
        ((self.home as u128 + offset) % self.capacity as u128) as usize
    }

    /// The home slot `h1`, where the sequence started
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.home
    }

    /// The stride `h2` between consecutive probes
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let index = self.next_index;
        // both terms are below `capacity`, so the sum cannot overflow for any allocatable table
        self.next_index = (self.next_index + self.stride) % self.capacity;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}
