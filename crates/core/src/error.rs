//! Error taxonomy for the storage contract
//!
//! Every backend and wrapper reports failures through [`Error`]. CRUD calls
//! return it synchronously; List returns it synchronously only for setup
//! failures and otherwise delivers per-entry decode failures inline on the
//! stream (see [`crate::ListEntry`]).

use std::fmt;
use thiserror::Error;

/// Boxed source error carried by codec failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type used throughout storekit
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the Store contract
#[derive(Debug, Error)]
pub enum Error {
    /// No record is stored under the item's composite key
    #[error("record not found")]
    NotFound,

    /// A record is already stored under the item's composite key
    #[error("record already exists")]
    AlreadyExists,

    /// Time-sorted access on a namespace that never received a time-tracked item
    #[error("time index not found for namespace '{namespace}'")]
    IndexNotFound {
        /// Namespace that has no time index
        namespace: String,
    },

    /// Sort discriminant outside the known range
    #[error("invalid sort type {0}")]
    InvalidSort(i64),

    /// No mounted store accepts the namespace
    #[error("no store configured for namespace '{namespace}'")]
    StoreNotConfigured {
        /// Namespace that failed to route
        namespace: String,
    },

    /// Serialization or deserialization failed
    #[error("codec error: {0}")]
    Codec(#[source] BoxError),

    /// The operation needs an async runtime that is not available
    #[error("runtime unavailable: {0}")]
    Runtime(String),

    /// Several independent failures, e.g. from closing composed stores
    #[error("{}", MultipleDisplay(.0))]
    Multiple(Vec<Error>),
}

impl Error {
    /// Wrap a serializer/deserializer failure
    pub fn codec<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Codec(Box::new(err))
    }

    /// Build an `IndexNotFound` error for a namespace
    pub fn index_not_found(namespace: impl Into<String>) -> Self {
        Error::IndexNotFound {
            namespace: namespace.into(),
        }
    }

    /// Build a `StoreNotConfigured` error for a namespace
    pub fn store_not_configured(namespace: impl Into<String>) -> Self {
        Error::StoreNotConfigured {
            namespace: namespace.into(),
        }
    }

    /// Fold a list of failures into a single result.
    ///
    /// No failures is `Ok`, one failure is returned as-is, more than one
    /// becomes [`Error::Multiple`].
    pub fn aggregate(mut errors: Vec<Error>) -> Result<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Error::Multiple(errors)),
        }
    }

    /// True for [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// True for [`Error::AlreadyExists`]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists)
    }

    /// True for [`Error::IndexNotFound`]
    pub fn is_index_not_found(&self) -> bool {
        matches!(self, Error::IndexNotFound { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::codec(err)
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Error::codec(err)
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Error::codec(err)
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Codec(err)
    }
}

struct MultipleDisplay<'a>(&'a [Error]);

impl fmt::Display for MultipleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors occurred:", self.0.len())?;
        for err in self.0 {
            write!(f, " [{}]", err)?;
        }
        Ok(())
    }
}
