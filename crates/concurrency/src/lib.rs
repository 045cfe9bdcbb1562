//! Concurrency wrappers for storekit
//!
//! - `SyncStore`: serializes writers against readers around any `Store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sync_store;

pub use sync_store::SyncStore;
