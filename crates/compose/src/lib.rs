//! Store composition for storekit
//!
//! - `PrefixStore` / `Mount`: route operations to stores by namespace prefix
//! - `TracedStore`: one tracing span per operation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod prefix;
pub mod traced;

pub use prefix::{Mount, PrefixStore};
pub use traced::TracedStore;
