//! Error types for table construction, growth and log tallying

use std::io;

use thiserror::Error;

/// Failures reported by `ProbingHashTable`
///
/// A missing key is never an error: lookups return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TableError {
    /// The requested initial capacity is below the minimum of 2 slots
    #[error("invalid capacity {requested}: a table needs at least 2 slots")]
    InvalidCapacity {
        /// Capacity passed by the caller
        requested: usize,
    },
    /// The load factor threshold is not inside the open interval (0, 1)
    #[error("invalid load factor threshold {threshold}: expected a value in (0, 1)")]
    InvalidLoadFactor {
        /// Threshold passed by the caller
        threshold: f64,
    },
    /// A full probe cycle found neither the key nor a free slot
    #[error("probe cycle over {capacity} slots found no free slot")]
    CapacityExhausted {
        /// Capacity of the table when probing gave up
        capacity: usize,
    },
    /// The next prime capacity does not fit in a `usize`
    #[error("cannot grow past capacity {capacity}: next prime overflows usize")]
    CapacityOverflow {
        /// Capacity the table was growing from
        capacity: usize,
    },
}

/// Failures reported while tallying an access log
#[derive(Debug, Error)]
pub enum TallyError {
    /// Reading the log failed
    #[error("failed to read access log: {0}")]
    Io(#[from] io::Error),
    /// The visit table rejected an update
    #[error("failed to record visit: {0}")]
    Table(#[from] TableError),
}
