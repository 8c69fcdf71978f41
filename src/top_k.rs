//! Bounded top-K selection over `(key, count)` pairs
//!
//! Pairs are ranked by count, highest first. Equal counts rank by key, the lexicographically
//! smaller key first, so the result does not depend on the order pairs arrive in.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

/// Number of entries a visit report keeps
pub const DEFAULT_K: usize = 10;

/// A pair ordered by rank, the greater value ranks higher
#[derive(Debug, PartialEq, Eq)]
struct Ranked<K, V> {
    /// The key being ranked
    key: K,
    /// The count it is ranked by
    count: V,
}

impl<K: Ord, V: Ord> Ord for Ranked<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count.cmp(&other.count).then_with(|| other.key.cmp(&self.key))
    }
}

impl<K: Ord, V: Ord> PartialOrd for Ranked<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `k` highest ranked pairs pushed into it
///
/// Backed by a min-heap of at most `k` entries: once a push takes it past `k`, the lowest ranked
/// entry is evicted.
#[derive(Debug)]
pub struct TopK<K, V> {
    /// Min-heap of the entries kept so far
    heap: BinaryHeap<Reverse<Ranked<K, V>>>,
    /// Maximum number of entries kept
    k: usize,
}

impl<K: Ord, V: Ord> TopK<K, V> {
    /// Creates an empty selector keeping at most `k` entries
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(k.saturating_add(1)), k }
    }

    /// Offers a pair, evicting the lowest ranked entry if more than `k` are held
    pub fn push(&mut self, key: K, count: V) {
        if self.k == 0 {
            return;
        }
        self.heap.push(Reverse(Ranked { key, count }));
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    /// Number of entries currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing has been kept
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the selector, returning the kept pairs highest ranked first
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<(K, V)> {
        // ascending `Reverse` order is descending rank
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked { key, count })| (key, count))
            .collect()
    }
}

impl<K: Ord, V: Ord> Extend<(K, V)> for TopK<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, count) in iter {
            self.push(key, count);
        }
    }
}

/// Returns the `k` pairs with the largest counts, sorted by descending count
///
/// Ties go to the lexicographically smaller key.
#[must_use]
pub fn top_k<K, V, I>(pairs: I, k: usize) -> Vec<(K, V)>
where
    K: Ord,
    V: Ord,
    I: IntoIterator<Item = (K, V)>,
{
    let mut selector = TopK::new(k);
    selector.extend(pairs);
    selector.into_sorted_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_three() {
        let pairs = [("a", 5), ("b", 3), ("c", 10), ("d", 1), ("e", 7)];
        assert_eq!(top_k(pairs, 3), vec![("c", 10), ("e", 7), ("a", 5)]);
    }

    #[test]
    fn test_fewer_than_k() {
        let pairs = [("x", 2), ("y", 9), ("z", 4)];
        assert_eq!(top_k(pairs, DEFAULT_K), vec![("y", 9), ("z", 4), ("x", 2)]);
    }

    #[test]
    fn test_ties_prefer_smaller_key() {
        let pairs = [("b", 2), ("d", 1), ("c", 2), ("a", 2)];
        assert_eq!(top_k(pairs, 2), vec![("a", 2), ("b", 2)]);
        assert_eq!(top_k(pairs, 4), vec![("a", 2), ("b", 2), ("c", 2), ("d", 1)]);
    }

    #[test]
    fn test_order_of_arrival_does_not_matter() {
        let forward: Vec<(String, u64)> =
            (0..50_u64).map(|i| (format!("k{i:02}"), i % 7)).collect();
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(top_k(forward, DEFAULT_K), top_k(backward, DEFAULT_K));
    }

    #[test]
    fn test_zero_k() {
        let mut selector = TopK::new(0);
        selector.push("a", 1);
        assert!(selector.is_empty());
        assert!(selector.into_sorted_vec().is_empty());
    }

    #[test]
    fn test_heap_stays_bounded() {
        let mut selector = TopK::new(3);
        for i in 0..100 {
            selector.push(i, i);
            assert!(selector.len() <= 3);
        }
        assert_eq!(selector.into_sorted_vec(), vec![(99, 99), (98, 98), (97, 97)]);
    }
}
