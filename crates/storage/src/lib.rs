//! In-memory storage backend for storekit
//!
//! This crate provides:
//! - `InMemStore`: a `Store` backed by a hash table plus per-namespace time indexes
//! - `OrderedIndex`: timestamp-sorted buckets of keys
//! - `TimeIndex` / `TimeIndexRegistry`: created/updated index pairs per namespace
//! - `RecordTable`: composite key → record bytes
//! - `Clock`: timestamp source (`SystemClock`, `ManualClock` for tests)
//! - `InMemOptions`: sizing knobs

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod index;
pub mod inmem;
pub mod options;
mod query;
pub mod table;
pub mod time_index;

pub use clock::{Clock, ManualClock, SystemClock};
pub use index::{Bucket, Keys, OrderedIndex};
pub use inmem::InMemStore;
pub use options::InMemOptions;
pub use table::RecordTable;
pub use time_index::{TimeIndex, TimeIndexRegistry};
