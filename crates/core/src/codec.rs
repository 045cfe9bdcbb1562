//! Serde-backed encodings for implementing [`Item::marshal`] and
//! [`Item::unmarshal`](crate::Item::unmarshal)
//!
//! [`Item::marshal`]: crate::Item::marshal

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Wire format for a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    /// JSON via `serde_json`
    #[default]
    Json,
    /// MessagePack via `rmp-serde`, struct fields encoded by name
    MsgPack,
    /// Compact binary via `bincode`
    Bincode,
}

impl Encoding {
    /// Serialize `value`
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let buf = match self {
            Encoding::Json => serde_json::to_vec(value)?,
            Encoding::MsgPack => rmp_serde::to_vec_named(value)?,
            Encoding::Bincode => bincode::serialize(value)?,
        };
        Ok(buf)
    }

    /// Deserialize a `T` from `buf`
    pub fn decode<T: DeserializeOwned>(&self, buf: &[u8]) -> Result<T> {
        let value = match self {
            Encoding::Json => serde_json::from_slice(buf)?,
            Encoding::MsgPack => rmp_serde::from_slice(buf)?,
            Encoding::Bincode => bincode::deserialize(buf)?,
        };
        Ok(value)
    }
}
