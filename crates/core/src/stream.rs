//! Streaming List results
//!
//! List hands records to the caller one at a time through a channel with a
//! single slot, so the producer is never more than one record ahead of the
//! consumer. The producer stops and closes the stream when the page is full,
//! the source runs dry, the caller's cancellation token fires, or the
//! [`ListStream`] is dropped.

use crate::error::{Error, Result};
use crate::item::Item;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::Stream;

/// Capacity of the producer/consumer handoff
pub const STREAM_CAPACITY: usize = 1;

/// One element of a List stream
///
/// A record that failed to decode is still delivered, with the partially
/// decoded value and the decode error; the consumer decides whether that is
/// fatal.
pub struct ListEntry {
    /// Decoded (or partially decoded) record
    pub value: Box<dyn Item>,
    /// Decode failure for this record, if any
    pub error: Option<Error>,
}

impl ListEntry {
    /// Successfully decoded record
    pub fn ok(value: Box<dyn Item>) -> Self {
        Self { value, error: None }
    }

    /// Pair a record with the outcome of decoding it
    pub fn from_decode(value: Box<dyn Item>, decoded: Result<()>) -> Self {
        Self {
            value,
            error: decoded.err(),
        }
    }

    /// True if the record decoded cleanly
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The record, or its decode error
    pub fn into_result(self) -> Result<Box<dyn Item>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    /// The record as a concrete `T`, or its decode error.
    ///
    /// Returns `Ok(None)` when the record is not a `T`.
    pub fn downcast<T: Item>(self) -> Result<Option<Box<T>>> {
        self.into_result().map(|value| value.downcast::<T>())
    }
}

impl fmt::Debug for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEntry")
            .field("namespace", &self.value.namespace())
            .field("id", &self.value.id())
            .field("error", &self.error)
            .finish()
    }
}

/// Producer side of a List stream
pub type ListSender = mpsc::Sender<ListEntry>;

/// Consumer side of a List stream
///
/// Yields [`ListEntry`] values until the producer finishes. Dropping the
/// stream stops the producer.
pub struct ListStream {
    rx: mpsc::Receiver<ListEntry>,
}

impl ListStream {
    /// Create a connected sender/stream pair
    pub fn channel() -> (ListSender, ListStream) {
        let (tx, rx) = mpsc::channel(STREAM_CAPACITY);
        (tx, ListStream { rx })
    }

    /// Receive the next entry; `None` once the stream is closed
    pub async fn next(&mut self) -> Option<ListEntry> {
        self.rx.recv().await
    }

    /// Drain every remaining entry
    pub async fn collect_all(mut self) -> Vec<ListEntry> {
        let mut out = Vec::new();
        while let Some(entry) = self.rx.recv().await {
            out.push(entry);
        }
        out
    }

    /// Drain the stream into concrete records, failing on the first entry
    /// that did not decode.
    ///
    /// Entries that are not a `T` are skipped.
    pub async fn try_collect<T: Item>(mut self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        while let Some(entry) = self.rx.recv().await {
            if let Some(record) = entry.downcast::<T>()? {
                out.push(*record);
            }
        }
        Ok(out)
    }
}

impl Stream for ListStream {
    type Item = ListEntry;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl fmt::Debug for ListStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListStream").finish_non_exhaustive()
    }
}
