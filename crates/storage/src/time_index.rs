//! Per-namespace created/updated index pairs
//!
//! A namespace gets its [`TimeIndex`] on the first time-tracked create and
//! keeps it for the life of the store.

use crate::index::{Keys, OrderedIndex};
use crate::options::InMemOptions;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use storekit_core::Sort;

/// Created and updated indexes of one namespace
#[derive(Debug)]
pub struct TimeIndex {
    created: OrderedIndex,
    updated: OrderedIndex,
}

impl TimeIndex {
    /// Create an empty pair sized from `options`
    pub fn new(options: &InMemOptions) -> Self {
        let build = || {
            OrderedIndex::with_growth(
                options.index_capacity,
                options.index_growth_slack,
                options.index_growth_chunk,
            )
        };
        Self {
            created: build(),
            updated: build(),
        }
    }

    /// Index keyed by creation time
    pub fn created(&self) -> &OrderedIndex {
        &self.created
    }

    /// Index keyed by last update time
    pub fn updated(&self) -> &OrderedIndex {
        &self.updated
    }

    /// Key order for a time-sorted mode; `None` for [`Sort::Natural`]
    pub fn keys(&self, sort: Sort) -> Option<Keys> {
        match sort {
            Sort::Natural => None,
            Sort::CreatedAsc => Some(self.created.ascending()),
            Sort::CreatedDesc => Some(self.created.descending()),
            Sort::UpdatedAsc => Some(self.updated.ascending()),
            Sort::UpdatedDesc => Some(self.updated.descending()),
        }
    }
}

/// Namespace → [`TimeIndex`] registry
#[derive(Debug)]
pub struct TimeIndexRegistry {
    by_namespace: FxHashMap<String, Arc<TimeIndex>>,
    options: InMemOptions,
}

impl TimeIndexRegistry {
    /// Create an empty registry
    pub fn new(options: InMemOptions) -> Self {
        Self {
            by_namespace: FxHashMap::with_capacity_and_hasher(
                options.namespace_capacity,
                Default::default(),
            ),
            options,
        }
    }

    /// Index pair of `namespace`, if one was ever created
    pub fn get(&self, namespace: &str) -> Option<Arc<TimeIndex>> {
        self.by_namespace.get(namespace).cloned()
    }

    /// Index pair of `namespace`, creating it on first use
    pub fn get_or_create(&mut self, namespace: &str) -> Arc<TimeIndex> {
        if let Some(index) = self.by_namespace.get(namespace) {
            return Arc::clone(index);
        }
        tracing::debug!(target: "storekit::inmem", namespace, "creating time index");
        let index = Arc::new(TimeIndex::new(&self.options));
        self.by_namespace
            .insert(namespace.to_string(), Arc::clone(&index));
        index
    }

    /// Number of namespaces with a time index
    pub fn len(&self) -> usize {
        self.by_namespace.len()
    }

    /// True if no namespace has a time index
    pub fn is_empty(&self) -> bool {
        self.by_namespace.is_empty()
    }
}
