//! Namespace-prefix routing across several stores
//!
//! Each operation goes to the mounted store whose prefix the item's namespace
//! (the factory's, for List) starts with. When several prefixes match, the
//! longest one wins. A namespace no mount covers fails with
//! [`Error::StoreNotConfigured`].

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use storekit_core::{CancellationToken, Error, Factory, Item, ListOpt, ListStream, Result, Store};

/// A store attached under a namespace prefix
#[derive(Clone)]
pub struct Mount {
    /// Namespace prefix routed to `store`
    pub prefix: String,
    /// Target store
    pub store: Arc<dyn Store>,
}

impl Mount {
    /// Attach `store` under `prefix`
    pub fn new(prefix: impl Into<String>, store: Arc<dyn Store>) -> Self {
        Self {
            prefix: prefix.into(),
            store,
        }
    }
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Store routing by namespace prefix
pub struct PrefixStore {
    /// Longest prefix first
    mounts: Vec<Mount>,
}

impl PrefixStore {
    /// Build from `mounts`; a repeated prefix keeps the last mount given
    pub fn new(mounts: impl IntoIterator<Item = Mount>) -> Self {
        let mut deduped: Vec<Mount> = Vec::new();
        for mount in mounts {
            match deduped.iter_mut().find(|m| m.prefix == mount.prefix) {
                Some(existing) => *existing = mount,
                None => deduped.push(mount),
            }
        }
        deduped.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { mounts: deduped }
    }

    /// Mounted prefixes, longest first
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.mounts.iter().map(|m| m.prefix.as_str())
    }

    fn route(&self, namespace: &str) -> Result<&dyn Store> {
        self.mounts
            .iter()
            .find(|m| namespace.starts_with(&m.prefix))
            .map(|m| m.store.as_ref())
            .ok_or_else(|| {
                tracing::debug!(target: "storekit::prefix", namespace, "no mount for namespace");
                Error::store_not_configured(namespace)
            })
    }
}

impl fmt::Debug for PrefixStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixStore")
            .field("mounts", &self.mounts)
            .finish()
    }
}

#[async_trait]
impl Store for PrefixStore {
    async fn create(&self, item: &mut dyn Item) -> Result<()> {
        self.route(item.namespace())?.create(item).await
    }

    async fn read(&self, item: &mut dyn Item) -> Result<()> {
        self.route(item.namespace())?.read(item).await
    }

    async fn update(&self, item: &mut dyn Item) -> Result<()> {
        self.route(item.namespace())?.update(item).await
    }

    async fn delete(&self, item: &mut dyn Item) -> Result<()> {
        self.route(item.namespace())?.delete(item).await
    }

    async fn list(
        &self,
        cancel: CancellationToken,
        factory: Factory,
        opts: ListOpt,
    ) -> Result<ListStream> {
        let namespace = factory().namespace().to_string();
        self.route(&namespace)?.list(cancel, factory, opts).await
    }

    async fn close(&self) -> Result<()> {
        let mut errors = Vec::new();
        for mount in &self.mounts {
            if let Err(e) = mount.store.close().await {
                tracing::warn!(
                    target: "storekit::prefix",
                    prefix = %mount.prefix,
                    error = %e,
                    "mounted store failed to close"
                );
                errors.push(e);
            }
        }
        Error::aggregate(errors)
    }
}
