//! # probemap
//!
//! A hash table built from scratch on open addressing with double hashing, and the small log
//! analysis it was written for: count visits per requested file in a web server access log and
//! report the most visited ones.
//!
//! - `ProbingHashTable`: slots in one prime-sized array, probed with
//!   `(h1 + i * h2) mod capacity`. Removal leaves tombstones. The table grows to the next prime
//!   at least twice its size before its load factor would pass the threshold (0.7 by default).
//! - `top_k` / `TopK`: bounded min-heap selection of the largest counts. Ties go to the
//!   lexicographically smaller key.
//! - `tally_visits`: feeds the filenames of `GET` requests from a log into a table of counts.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probemap::ProbingHashTable;
//!
//! // Create a new table
//! let mut table = ProbingHashTable::new();
//!
//! // Insert values
//! table.insert("apple".to_string(), 1)?;
//! table.insert("banana".to_string(), 2)?;
//!
//! // Retrieve values
//! assert_eq!(table.search("apple"), Some(&1));
//!
//! // Update values
//! table.insert("apple".to_string(), 10)?;
//! assert_eq!(table.search("apple"), Some(&10));
//!
//! // Remove values
//! table.remove("apple");
//! assert_eq!(table.search("apple"), None);
//! # Ok::<(), probemap::TableError>(())
//! ```
//!
//! ## Counting Visits
//!
//! ```rust
//! use probemap::{ProbingHashTable, top_k};
//!
//! let mut visits = ProbingHashTable::new();
//! for file in ["index.html", "index.html", "a.gif", "index.html", "b.gif", "a.gif"] {
//!     visits.increment(file.to_string())?;
//! }
//!
//! let top = top_k(visits.snapshot(), 2);
//! assert_eq!(top, vec![("index.html".to_string(), 3), ("a.gif".to_string(), 2)]);
//! # Ok::<(), probemap::TableError>(())
//! ```

/// Module extracting requested filenames from access logs and tallying them
mod access_log;
/// Module defining the error types
mod error;
/// Module with the prime helpers used for sizing
mod prime;
/// Module computing double hashing probe sequences
mod probe;
/// Module implementing the open addressing hash table
mod probing_table;
/// Module implementing bounded top-K selection
mod top_k;
/// Utility functions and traits for the hash table
mod utils;

pub use access_log::{parse_filename, tally_visits};
pub use error::{TableError, TallyError};
pub use prime::{is_prime, next_prime};
pub use probe::ProbeSequence;
pub use probing_table::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD, Iter, ProbingHashTable};
pub use top_k::{DEFAULT_K, TopK, top_k};
pub use utils::{TableExtensions, from_pairs, tally};
