//! Reader/writer serialization around any Store
//!
//! # Design
//!
//! - Create, Update and Delete hold the write side for the whole call
//! - Read holds the read side
//! - List holds the read side only while the inner store sets the stream up;
//!   consuming the stream happens outside the lock
//! - Close is forwarded without locking
//!
//! The lock is `tokio::sync::RwLock`, so waiting callers yield instead of
//! blocking a worker thread.

use async_trait::async_trait;
use std::fmt;
use storekit_core::{CancellationToken, Factory, Item, ListOpt, ListStream, Result, Store};
use tokio::sync::RwLock;

/// Store wrapper that serializes writers against readers
pub struct SyncStore<S> {
    inner: S,
    lock: RwLock<()>,
}

impl<S: Store> SyncStore<S> {
    /// Wrap `inner`
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lock: RwLock::new(()),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap into the inner store
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for SyncStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncStore")
            .field("inner", &self.inner)
            .finish()
    }
}

#[async_trait]
impl<S: Store> Store for SyncStore<S> {
    async fn create(&self, item: &mut dyn Item) -> Result<()> {
        let _guard = self.lock.write().await;
        self.inner.create(item).await
    }

    async fn read(&self, item: &mut dyn Item) -> Result<()> {
        let _guard = self.lock.read().await;
        self.inner.read(item).await
    }

    async fn update(&self, item: &mut dyn Item) -> Result<()> {
        let _guard = self.lock.write().await;
        self.inner.update(item).await
    }

    async fn delete(&self, item: &mut dyn Item) -> Result<()> {
        let _guard = self.lock.write().await;
        self.inner.delete(item).await
    }

    async fn list(
        &self,
        cancel: CancellationToken,
        factory: Factory,
        opts: ListOpt,
    ) -> Result<ListStream> {
        let _guard = self.lock.read().await;
        self.inner.list(cancel, factory, opts).await
    }

    async fn close(&self) -> Result<()> {
        self.inner.close().await
    }
}
