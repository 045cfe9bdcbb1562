//! storekit: a uniform create/read/update/delete/list contract over
//! pluggable record stores
//!
//! This crate re-exports the workspace members behind one import:
//! - Contract types (`Store`, `Item`, `ListOpt`, `ListStream`, `Error`) from `storekit-core`
//! - The in-memory backend (`InMemStore`) from `storekit-storage`
//! - Wrappers: `SyncStore` (`storekit-concurrency`), `PrefixStore` and
//!   `TracedStore` (`storekit-compose`)
//!
//! # Example
//!
//! ```ignore
//! use storekit::{CancellationToken, InMemStore, ListOpt, Sort, Store, SyncStore};
//!
//! let store = SyncStore::new(InMemStore::new());
//! store.create(&mut note).await?;
//!
//! let stream = store
//!     .list(CancellationToken::new(), factory(Note::default), ListOpt::new().sort(Sort::CreatedDesc))
//!     .await?;
//! let notes: Vec<Note> = stream.try_collect().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use storekit_core::{
    composite_key, factory, item_key, namespace_prefix, AsAny, BoxError, CancellationToken,
    Encoding, Error, Factory, IdSetter, Item, ItemFilter, ListEntry, ListOpt, ListStream, Result,
    Sort, Store, TimeTracker,
};

pub use storekit_storage::{Clock, InMemOptions, InMemStore, ManualClock, SystemClock};

pub use storekit_concurrency::SyncStore;

pub use storekit_compose::{Mount, PrefixStore, TracedStore};
