//! Utility functions and traits for `ProbingHashTable`

use crate::{ProbingHashTable, TableError, top_k};
use std::hash::Hash;

/// Extension trait for tables that provides additional utility methods
pub trait TableExtensions<K, V> {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns the `k` entries with the largest values, largest first, ties by smaller key
    fn top(&self, k: usize) -> Vec<(K, V)>
    where
        K: Ord,
        V: Ord;
}

impl<K, V> TableExtensions<K, V> for ProbingHashTable<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn top(&self, k: usize) -> Vec<(K, V)>
    where
        K: Ord,
        V: Ord,
    {
        top_k(self.iter().map(|(key, value)| (key.clone(), value.clone())), k)
    }
}

/// Creates a `ProbingHashTable` from an iterator of key-value pairs, later pairs overwriting
/// earlier ones
///
/// # Errors
///
/// Propagates the first error returned by `insert`.
pub fn from_pairs<K, V, I>(iter: I) -> Result<ProbingHashTable<K, V>, TableError>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = ProbingHashTable::new();

    for (key, value) in iter {
        table.insert(key, value)?;
    }

    Ok(table)
}

/// Counts the occurrences of every key in `keys`
///
/// # Errors
///
/// Propagates the first error returned by `increment`.
pub fn tally<K, I>(keys: I) -> Result<ProbingHashTable<K, u64>, TableError>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut table = ProbingHashTable::new();

    for key in keys {
        table.increment(key)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)];

        let table = from_pairs(data).unwrap();

        assert_eq!(table.search("a"), Some(&3));
        assert_eq!(table.search("b"), Some(&2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = ProbingHashTable::new();
        table.insert("a".to_string(), 1).unwrap();
        table.insert("b".to_string(), 2).unwrap();
        table.insert("c".to_string(), 3).unwrap();

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_tally_and_top() {
        let table =
            tally(["index.html", "index.html", "a.gif", "index.html", "b.gif", "a.gif"]).unwrap();

        assert_eq!(table.search("index.html"), Some(&3));
        assert_eq!(table.search("a.gif"), Some(&2));
        assert_eq!(table.search("b.gif"), Some(&1));
        assert_eq!(table.top(2), vec![("index.html", 3), ("a.gif", 2)]);
    }

    #[test]
    fn test_tally_grows_past_default_capacity() {
        let table = tally((0..1_000_u32).map(|i| i % 250)).unwrap();

        assert_eq!(table.len(), 250);
        assert!(table.values().iter().all(|&count| count == 4));
        assert!(table.capacity() > 250);
    }
}
