//! In-memory Store backend
//!
//! Records live in a [`RecordTable`]; namespaces holding time-tracked items
//! additionally get a created/updated [`TimeIndex`] pair that is kept in
//! lockstep with the table.
//!
//! # Design
//!
//! - One store-wide mutex serializes create/read/update/delete, so the table
//!   and the indexes are never observed half-updated
//! - Each ordered index has its own lock, always taken after the store lock
//! - List never holds the store lock while waiting on its consumer; it takes
//!   the lock once to snapshot keys and once per record looked up
//! - Update of an absent time-tracked record upserts it into the table and
//!   the `updated` index only, so Updated-sorted Lists can contain keys that
//!   Created-sorted Lists do not
//! - Ids handed to [`IdSetter`](storekit_core::IdSetter) items come from a
//!   process-local counter starting at 1; it is not persisted
//!
//! # Example
//!
//! ```ignore
//! use storekit_storage::InMemStore;
//!
//! let store = InMemStore::new();
//! store.create(&mut record).await?;
//! let mut stream = store
//!     .list(CancellationToken::new(), factory(Record::default), ListOpt::new().limit(10))
//!     .await?;
//! ```

use crate::clock::{Clock, SystemClock};
use crate::options::InMemOptions;
use crate::query::{KeySource, Producer};
use crate::table::RecordTable;
use crate::time_index::{TimeIndex, TimeIndexRegistry};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use storekit_core::{
    item_key, CancellationToken, Error, Factory, Item, ListOpt, ListStream, Result, Sort, Store,
};
use tokio::runtime::Handle;

const TARGET: &str = "storekit::inmem";

/// Table and indexes guarded by the store lock
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) table: RecordTable,
    pub(crate) indexes: TimeIndexRegistry,
}

/// In-memory implementation of [`Store`]
///
/// # Thread Safety
///
/// `InMemStore` is Send + Sync. CRUD calls are mutually exclusive. List
/// producers take the store lock only briefly per record, so an undrained
/// stream never keeps writers out.
pub struct InMemStore {
    state: Arc<Mutex<State>>,
    nonce: AtomicU64,
    clock: Arc<dyn Clock>,
    options: InMemOptions,
}

impl InMemStore {
    /// Create a store with default options and the system clock
    pub fn new() -> Self {
        Self::with_options(InMemOptions::default())
    }

    /// Create a store with explicit options and the system clock
    pub fn with_options(options: InMemOptions) -> Self {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    /// Create a store stamping items from `clock`
    pub fn with_clock(options: InMemOptions, clock: Arc<dyn Clock>) -> Self {
        let state = State {
            table: RecordTable::with_capacity(options.table_capacity),
            indexes: TimeIndexRegistry::new(options),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            nonce: AtomicU64::new(0),
            clock,
            options,
        }
    }

    /// Options the store was built with
    pub fn options(&self) -> &InMemOptions {
        &self.options
    }

    /// Number of stored records across all namespaces
    pub fn len(&self) -> usize {
        self.state.lock().table.len()
    }

    /// True if no record is stored
    pub fn is_empty(&self) -> bool {
        self.state.lock().table.is_empty()
    }

    /// Time index pair of `namespace`, if it has one
    pub fn time_index(&self, namespace: &str) -> Option<Arc<TimeIndex>> {
        self.state.lock().indexes.get(namespace)
    }

    /// Next store-assigned id
    fn next_id(&self) -> String {
        (self.nonce.fetch_add(1, Ordering::AcqRel) + 1).to_string()
    }
}

impl Default for InMemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("InMemStore")
            .field("records", &state.table.len())
            .field("time_indexes", &state.indexes.len())
            .field("nonce", &self.nonce.load(Ordering::Acquire))
            .field("clock", &self.clock)
            .finish()
    }
}

#[async_trait]
impl Store for InMemStore {
    async fn create(&self, item: &mut dyn Item) -> Result<()> {
        let mut state = self.state.lock();

        if let Some(setter) = item.id_setter() {
            setter.set_id(self.next_id());
        }

        let key = item_key(item);
        if state.table.contains(&key) {
            tracing::debug!(target: TARGET, key = %key, "create rejected, key exists");
            return Err(Error::AlreadyExists);
        }

        let stamp = item.time_tracker_mut().map(|tt| {
            let now = self.clock.now_nanos();
            tt.set_created(now);
            tt.set_updated(now);
            now
        });

        // Encode before touching the indexes so a codec failure leaves no trace
        let buf = item.marshal()?;

        if let Some(ts) = stamp {
            let index = state.indexes.get_or_create(item.namespace());
            index.created().insert(key.clone(), ts);
            index.updated().insert(key.clone(), ts);
        }
        tracing::debug!(target: TARGET, key = %key, bytes = buf.len(), "record created");
        state.table.put(key, buf);
        Ok(())
    }

    async fn read(&self, item: &mut dyn Item) -> Result<()> {
        let state = self.state.lock();
        let key = item_key(item);
        match state.table.get(&key) {
            Some(buf) => item.unmarshal(buf),
            None => Err(Error::NotFound),
        }
    }

    async fn update(&self, item: &mut dyn Item) -> Result<()> {
        let mut state = self.state.lock();
        let key = item_key(item);
        let namespace = item.namespace().to_string();

        let restamp = match item.time_tracker_mut() {
            Some(tt) => {
                let index = state
                    .indexes
                    .get(&namespace)
                    .ok_or_else(|| Error::index_not_found(namespace.as_str()))?;
                let previous = tt.updated();
                let now = self.clock.now_nanos();
                tt.set_updated(now);
                Some((index, previous, now))
            }
            None => None,
        };

        let buf = item.marshal()?;

        if let Some((index, previous, now)) = restamp {
            if !index.updated().remove(&key, previous) {
                tracing::warn!(
                    target: TARGET,
                    key = %key,
                    previous,
                    "updated stamp held by caller is not indexed"
                );
            }
            index.updated().insert(key.clone(), now);
        }
        tracing::debug!(target: TARGET, key = %key, bytes = buf.len(), "record updated");
        state.table.put(key, buf);
        Ok(())
    }

    async fn delete(&self, item: &mut dyn Item) -> Result<()> {
        let mut state = self.state.lock();
        let key = item_key(item);
        let namespace = item.namespace().to_string();

        let Some(buf) = state.table.get(&key) else {
            return Ok(());
        };

        if let Some(index) = state.indexes.get(&namespace) {
            // The stored stamps are authoritative, not the caller's copy
            match item.unmarshal(buf) {
                Ok(()) => {
                    if let Some(tt) = item.time_tracker() {
                        index.created().remove(&key, tt.created());
                        index.updated().remove(&key, tt.updated());
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        target: TARGET,
                        key = %key,
                        error = %err,
                        "stored record undecodable, time index entries left behind"
                    );
                }
            }
        }

        state.table.delete(&key);
        tracing::debug!(target: TARGET, key = %key, "record deleted");
        Ok(())
    }

    async fn list(
        &self,
        cancel: CancellationToken,
        factory: Factory,
        opts: ListOpt,
    ) -> Result<ListStream> {
        let namespace = factory().namespace().to_string();
        let handle = Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?;

        let source = match opts.sort {
            Sort::Natural => KeySource::Scan,
            sort => {
                let index = self
                    .state
                    .lock()
                    .indexes
                    .get(&namespace)
                    .ok_or_else(|| Error::index_not_found(namespace.as_str()))?;
                match index.keys(sort) {
                    Some(keys) => KeySource::Index(keys),
                    None => KeySource::Scan,
                }
            }
        };

        tracing::debug!(target: TARGET, namespace = %namespace, opts = ?opts, "list started");
        let (tx, stream) = ListStream::channel();
        let producer = Producer::new(
            Arc::clone(&self.state),
            namespace,
            factory,
            opts,
            tx,
            cancel,
            handle,
        );
        tokio::task::spawn_blocking(move || producer.run(source));
        Ok(stream)
    }

    async fn close(&self) -> Result<()> {
        tracing::debug!(target: TARGET, "close");
        Ok(())
    }
}
