//! List pipeline for the in-memory store
//!
//! A producer runs on the blocking pool and feeds the caller's
//! [`ListStream`](storekit_core::ListStream). Two key sources share one
//! skip/limit/emit stage:
//!
//! - Natural: snapshots the namespace's keys from the record table, then
//!   looks each one up, decodes, applies the filter and paginates. Records
//!   created after the snapshot are not seen; records deleted since are
//!   skipped.
//! - Time-sorted: walks a traversal of the namespace's created/updated index
//!   and looks each key up the same way. The filter is not applied in these
//!   modes.
//!
//! The store lock is only ever taken for a single lookup and never held while
//! waiting on the consumer, so an undrained stream does not stall writers.
//!
//! The producer stops on a full page, an exhausted source, a fired
//! cancellation token, or a dropped stream; the stream is closed on every
//! exit path.

use crate::index::Keys;
use crate::inmem::State;
use parking_lot::Mutex;
use std::sync::Arc;
use storekit_core::{namespace_prefix, CancellationToken, Factory, ListEntry, ListOpt, ListSender};
use tokio::runtime::Handle;

/// Where List takes its key order from
pub(crate) enum KeySource {
    /// Full record table scan
    Scan,
    /// Time index traversal
    Index(Keys),
}

/// Whether the producer should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Shared skip/limit/deliver stage
struct Emitter {
    tx: ListSender,
    cancel: CancellationToken,
    handle: Handle,
    skip: u64,
    cap: Option<u64>,
    sent: u64,
}

impl Emitter {
    fn new(tx: ListSender, cancel: CancellationToken, handle: Handle, opts: &ListOpt) -> Self {
        Self {
            tx,
            cancel,
            handle,
            skip: opts.skip(),
            cap: opts.cap(),
            sent: 0,
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.is_closed()
    }

    /// Consume one unit of the page offset, if any remains
    fn take_skip(&mut self) -> bool {
        if self.skip > 0 {
            self.skip -= 1;
            true
        } else {
            false
        }
    }

    /// Hand one entry to the consumer, waiting for a free slot
    fn emit(&mut self, entry: ListEntry) -> Flow {
        if self.cancelled() {
            return Flow::Stop;
        }

        let tx = &self.tx;
        let cancel = &self.cancel;
        let delivered = self.handle.block_on(async {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => false,
                sent = tx.send(entry) => sent.is_ok(),
            }
        });
        if !delivered {
            return Flow::Stop;
        }

        self.sent += 1;
        match self.cap {
            Some(cap) if self.sent >= cap => Flow::Stop,
            _ => Flow::Continue,
        }
    }
}

/// One List invocation's producer
pub(crate) struct Producer {
    state: Arc<Mutex<State>>,
    namespace: String,
    factory: Factory,
    opts: ListOpt,
    emitter: Emitter,
}

impl Producer {
    pub(crate) fn new(
        state: Arc<Mutex<State>>,
        namespace: String,
        factory: Factory,
        opts: ListOpt,
        tx: ListSender,
        cancel: CancellationToken,
        handle: Handle,
    ) -> Self {
        let emitter = Emitter::new(tx, cancel, handle, &opts);
        Self {
            state,
            namespace,
            factory,
            opts,
            emitter,
        }
    }

    /// Drive the pipeline to completion; must run off the async workers
    pub(crate) fn run(mut self, source: KeySource) {
        match source {
            KeySource::Scan => self.run_scan(),
            KeySource::Index(keys) => self.run_index(keys),
        }
        tracing::debug!(
            target: "storekit::inmem",
            namespace = %self.namespace,
            sent = self.emitter.sent,
            "list finished"
        );
    }

    fn run_scan(&mut self) {
        let prefix = namespace_prefix(&self.namespace);
        let keys = self.state.lock().table.keys_with_prefix(&prefix);

        for key in keys {
            if self.emitter.cancelled() {
                break;
            }
            let Some(buf) = self.lookup(&key) else {
                continue;
            };

            let mut value = (self.factory)();
            let decoded = value.unmarshal(&buf);
            if decoded.is_ok() {
                if let Some(filter) = &self.opts.filter {
                    if !filter.matches(&*value) {
                        continue;
                    }
                }
            }
            if self.emitter.take_skip() {
                continue;
            }
            if self.emitter.emit(ListEntry::from_decode(value, decoded)) == Flow::Stop {
                break;
            }
        }
    }

    fn run_index(&mut self, keys: Keys) {
        for key in keys {
            if self.emitter.cancelled() {
                break;
            }
            if self.emitter.take_skip() {
                continue;
            }

            let Some(buf) = self.lookup(&key) else {
                continue;
            };

            let mut value = (self.factory)();
            let decoded = value.unmarshal(&buf);
            if self.emitter.emit(ListEntry::from_decode(value, decoded)) == Flow::Stop {
                break;
            }
        }
    }

    /// Stored bytes of `key`, copied out under a short store lock
    fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        let buf = self.state.lock().table.get(key).cloned();
        if buf.is_none() {
            // Removed after the key snapshot was taken
            tracing::debug!(target: "storekit::inmem", key = %key, "listed key no longer stored");
        }
        buf
    }
}
