//! The Store contract
//!
//! Every backend and every wrapper implements [`Store`]. Wrappers hold the
//! stores they delegate to as `Arc<dyn Store>`, so the trait stays
//! object-safe.
//!
//! ## Error Handling
//!
//! | Operation | Condition | Error |
//! |-----------|-----------|-------|
//! | `create` | key already stored | `AlreadyExists` |
//! | `read` | key absent | `NotFound` |
//! | `update` | time-tracked item, namespace never indexed | `IndexNotFound` |
//! | `delete` | key absent | none, silent success |
//! | `list` | time-sorted on a namespace never indexed | `IndexNotFound` |
//! | any | codec failure | `Codec` |

use crate::error::Result;
use crate::item::Item;
use crate::list::{Factory, ListOpt};
use crate::stream::ListStream;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Uniform create/read/update/delete/list contract
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new record.
    ///
    /// Items with an [`IdSetter`](crate::IdSetter) receive a store-assigned id
    /// first. Items with a [`TimeTracker`](crate::TimeTracker) get both stamps
    /// set to the current time.
    async fn create(&self, item: &mut dyn Item) -> Result<()>;

    /// Load the stored record into `item`
    async fn read(&self, item: &mut dyn Item) -> Result<()>;

    /// Overwrite the stored record with `item`.
    ///
    /// Time-tracked items get a fresh updated stamp. The previous stamp is
    /// taken from `item` itself, so the caller should hold a value obtained
    /// from a prior read or create.
    async fn update(&self, item: &mut dyn Item) -> Result<()>;

    /// Remove the record; removing an absent record succeeds
    async fn delete(&self, item: &mut dyn Item) -> Result<()>;

    /// Stream the records of the factory's namespace.
    ///
    /// Setup failures are returned directly; decode failures arrive inline
    /// on the stream. The stream closes when `opts` is satisfied, the source
    /// is exhausted, or `cancel` fires.
    async fn list(
        &self,
        cancel: CancellationToken,
        factory: Factory,
        opts: ListOpt,
    ) -> Result<ListStream>;

    /// Release resources held by the store
    async fn close(&self) -> Result<()>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn create(&self, item: &mut dyn Item) -> Result<()> {
        (**self).create(item).await
    }

    async fn read(&self, item: &mut dyn Item) -> Result<()> {
        (**self).read(item).await
    }

    async fn update(&self, item: &mut dyn Item) -> Result<()> {
        (**self).update(item).await
    }

    async fn delete(&self, item: &mut dyn Item) -> Result<()> {
        (**self).delete(item).await
    }

    async fn list(
        &self,
        cancel: CancellationToken,
        factory: Factory,
        opts: ListOpt,
    ) -> Result<ListStream> {
        (**self).list(cancel, factory, opts).await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}
