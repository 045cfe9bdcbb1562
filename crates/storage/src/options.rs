//! Sizing options for the in-memory store
//!
//! Use the builder methods to configure options:
//!
//! ```
//! use storekit_storage::InMemOptions;
//!
//! let opts = InMemOptions::new().table_capacity(10_000).index_capacity(1_000);
//! assert_eq!(opts.table_capacity, 10_000);
//! ```

use crate::index::{DEFAULT_GROWTH_CHUNK, DEFAULT_GROWTH_SLACK, DEFAULT_INDEX_CAPACITY};
use serde::{Deserialize, Serialize};

/// Default initial record table capacity
pub const DEFAULT_TABLE_CAPACITY: usize = 1000;

/// Default initial number of namespaces with a time index
pub const DEFAULT_NAMESPACE_CAPACITY: usize = 10;

/// Options for an [`InMemStore`](crate::InMemStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemOptions {
    /// Initial record table capacity
    pub table_capacity: usize,
    /// Initial time index registry capacity
    pub namespace_capacity: usize,
    /// Initial bucket capacity of each ordered index
    pub index_capacity: usize,
    /// Spare bucket capacity under which an index grows
    pub index_growth_slack: usize,
    /// Buckets reserved per growth step
    pub index_growth_chunk: usize,
}

impl InMemOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial record table capacity
    pub fn table_capacity(mut self, capacity: usize) -> Self {
        self.table_capacity = capacity;
        self
    }

    /// Set the initial time index registry capacity
    pub fn namespace_capacity(mut self, capacity: usize) -> Self {
        self.namespace_capacity = capacity;
        self
    }

    /// Set the initial bucket capacity of each ordered index
    pub fn index_capacity(mut self, capacity: usize) -> Self {
        self.index_capacity = capacity;
        self
    }

    /// Set the index growth threshold and step
    pub fn index_growth(mut self, slack: usize, chunk: usize) -> Self {
        self.index_growth_slack = slack;
        self.index_growth_chunk = chunk;
        self
    }
}

impl Default for InMemOptions {
    fn default() -> Self {
        Self {
            table_capacity: DEFAULT_TABLE_CAPACITY,
            namespace_capacity: DEFAULT_NAMESPACE_CAPACITY,
            index_capacity: DEFAULT_INDEX_CAPACITY,
            index_growth_slack: DEFAULT_GROWTH_SLACK,
            index_growth_chunk: DEFAULT_GROWTH_CHUNK,
        }
    }
}
