//! Core contract for storekit
//!
//! This crate defines the types every backend and wrapper shares:
//! - `Item`, `IdSetter`, `TimeTracker`: what a storable record looks like
//! - `Store`: the create/read/update/delete/list contract
//! - `ListOpt`, `Sort`, `ItemFilter`, `Factory`: List parameters
//! - `ListEntry`, `ListStream`: streamed List results
//! - `Encoding`: serde-backed helpers for marshalling records
//! - `Error`: the shared error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod item;
pub mod key;
pub mod list;
pub mod store;
pub mod stream;

pub use codec::Encoding;
pub use error::{BoxError, Error, Result};
pub use item::{AsAny, IdSetter, Item, TimeTracker};
pub use key::{composite_key, item_key, namespace_prefix};
pub use list::{factory, Factory, ItemFilter, ListOpt, Sort};
pub use store::Store;
pub use stream::{ListEntry, ListSender, ListStream, STREAM_CAPACITY};

pub use tokio_util::sync::CancellationToken;
