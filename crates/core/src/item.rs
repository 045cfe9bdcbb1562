//! Item capability traits
//!
//! An [`Item`] is anything the store can persist: it names its namespace and
//! id, and converts itself to and from bytes. Two optional capabilities are
//! advertised through accessor methods that default to `None`:
//!
//! - [`IdSetter`]: the store may assign a fresh id on create
//! - [`TimeTracker`]: the store stamps created/updated times and keeps the
//!   namespace's time indexes in sync
//!
//! A concrete type opts into a capability by overriding the accessor, so the
//! capability set of every record type is fixed at compile time.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use storekit_core::{Encoding, Item, Result, TimeTracker};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Note {
//!     namespace: String,
//!     id: String,
//!     body: String,
//!     created: i64,
//!     updated: i64,
//! }
//!
//! impl Item for Note {
//!     fn namespace(&self) -> &str { &self.namespace }
//!     fn id(&self) -> &str { &self.id }
//!     fn marshal(&self) -> Result<Vec<u8>> { Encoding::Json.encode(self) }
//!     fn unmarshal(&mut self, buf: &[u8]) -> Result<()> {
//!         *self = Encoding::Json.decode(buf)?;
//!         Ok(())
//!     }
//!     fn time_tracker(&self) -> Option<&dyn TimeTracker> { Some(self) }
//!     fn time_tracker_mut(&mut self) -> Option<&mut dyn TimeTracker> { Some(self) }
//! }
//!
//! impl TimeTracker for Note {
//!     fn created(&self) -> i64 { self.created }
//!     fn set_created(&mut self, ts: i64) { self.created = ts }
//!     fn updated(&self) -> i64 { self.updated }
//!     fn set_updated(&mut self, ts: i64) { self.updated = ts }
//! }
//! ```

use crate::error::Result;
use std::any::Any;

/// Upcast helper so trait objects can be downcast to their concrete type.
///
/// Blanket-implemented for every `'static` type; implementors of [`Item`]
/// never write it by hand.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a box into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A record the store can persist
pub trait Item: AsAny + Send {
    /// Logical partition of the key space
    fn namespace(&self) -> &str;

    /// Identifier, unique within the namespace
    fn id(&self) -> &str;

    /// Serialize the record
    fn marshal(&self) -> Result<Vec<u8>>;

    /// Overwrite the record from serialized bytes
    fn unmarshal(&mut self, buf: &[u8]) -> Result<()>;

    /// Id-assignment capability, if supported
    fn id_setter(&mut self) -> Option<&mut dyn IdSetter> {
        None
    }

    /// Read access to the time-tracking capability, if supported
    fn time_tracker(&self) -> Option<&dyn TimeTracker> {
        None
    }

    /// Write access to the time-tracking capability, if supported
    fn time_tracker_mut(&mut self) -> Option<&mut dyn TimeTracker> {
        None
    }
}

/// Lets a store assign ids to newly created items
pub trait IdSetter {
    /// Replace the item's id
    fn set_id(&mut self, id: String);
}

/// Created/updated timestamps in nanoseconds since the Unix epoch
pub trait TimeTracker {
    /// Creation time
    fn created(&self) -> i64;
    /// Set creation time
    fn set_created(&mut self, ts: i64);
    /// Last update time
    fn updated(&self) -> i64;
    /// Set last update time
    fn set_updated(&mut self, ts: i64);
}

impl dyn Item {
    /// True if the underlying record is a `T`
    pub fn is<T: Item>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the underlying record as a `T`
    pub fn downcast_ref<T: Item>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the underlying record as a `T`
    pub fn downcast_mut<T: Item>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Unbox the underlying record as a `T`
    pub fn downcast<T: Item>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}
