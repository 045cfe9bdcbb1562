//! Tracing spans around any Store
//!
//! Every operation runs inside a span named after it (`store.create`,
//! `store.read`, ...) carrying the item's namespace and id. Failures are
//! logged as error events inside the span.
//!
//! List keeps its span open until the forwarded stream closes: entries are
//! pumped from the inner stream through a fresh capacity-1 channel by a task
//! instrumented with the span, so per-entry decode failures are logged
//! against the List that produced them.

use async_trait::async_trait;
use std::fmt;
use storekit_core::{CancellationToken, Factory, Item, ListOpt, ListStream, Result, Store};
use tracing::{field, instrument, Instrument};

/// Store wrapper emitting a span per operation
pub struct TracedStore<S> {
    inner: S,
}

impl<S: Store> TracedStore<S> {
    /// Wrap `inner`
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for TracedStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedStore")
            .field("inner", &self.inner)
            .finish()
    }
}

#[async_trait]
impl<S: Store> Store for TracedStore<S> {
    #[instrument(
        name = "store.create",
        skip_all,
        fields(namespace = %item.namespace(), id = %item.id()),
        err(Display)
    )]
    async fn create(&self, item: &mut dyn Item) -> Result<()> {
        self.inner.create(item).await
    }

    #[instrument(
        name = "store.read",
        skip_all,
        fields(namespace = %item.namespace(), id = %item.id()),
        err(Display)
    )]
    async fn read(&self, item: &mut dyn Item) -> Result<()> {
        self.inner.read(item).await
    }

    #[instrument(
        name = "store.update",
        skip_all,
        fields(namespace = %item.namespace(), id = %item.id()),
        err(Display)
    )]
    async fn update(&self, item: &mut dyn Item) -> Result<()> {
        self.inner.update(item).await
    }

    #[instrument(
        name = "store.delete",
        skip_all,
        fields(namespace = %item.namespace(), id = %item.id()),
        err(Display)
    )]
    async fn delete(&self, item: &mut dyn Item) -> Result<()> {
        self.inner.delete(item).await
    }

    async fn list(
        &self,
        cancel: CancellationToken,
        factory: Factory,
        opts: ListOpt,
    ) -> Result<ListStream> {
        let span = tracing::info_span!(
            "store.list",
            namespace = %factory().namespace(),
            sort = ?opts.sort,
            page = opts.page,
            limit = opts.limit,
            entries = field::Empty,
            failed = field::Empty,
        );

        let mut inner = match self
            .inner
            .list(cancel.clone(), factory, opts)
            .instrument(span.clone())
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                span.in_scope(|| tracing::error!(error = %e, "list setup failed"));
                return Err(e);
            }
        };

        let (tx, shadow) = ListStream::channel();
        let pump = async move {
            let mut entries = 0u64;
            let mut failed = 0u64;
            loop {
                let entry = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    entry = inner.next() => match entry {
                        Some(entry) => entry,
                        None => break,
                    },
                };

                entries += 1;
                if let Some(e) = &entry.error {
                    failed += 1;
                    tracing::error!(error = %e, "list entry failed");
                }

                let delivered = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => false,
                    sent = tx.send(entry) => sent.is_ok(),
                };
                if !delivered {
                    break;
                }
            }
            let span = tracing::Span::current();
            span.record("entries", entries);
            span.record("failed", failed);
            tracing::debug!("list stream closed");
        };
        tokio::spawn(pump.instrument(span));
        Ok(shadow)
    }

    #[instrument(name = "store.close", skip_all, err(Display))]
    async fn close(&self) -> Result<()> {
        self.inner.close().await
    }
}
