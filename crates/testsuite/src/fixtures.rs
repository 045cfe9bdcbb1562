//! Sized records for benchmarks
//!
//! Both record types live in the `bench` namespace and get their ids from the
//! store. The payload is filled with random bytes on first marshal so the
//! encoded size tracks the requested size.

use rand::Rng;
use serde::{Deserialize, Serialize};
use storekit_core::{Encoding, IdSetter, Item, Result, TimeTracker};

/// Namespace of every benchmark record
pub const BENCH_NAMESPACE: &str = "bench";

/// Bytes of the requested size taken up by the non-payload fields
const OVERHEAD: usize = 32;

/// Sizes the benchmarks sweep over
pub const BENCH_SIZES: [usize; 4] = [64, 128, 256, 512];

fn fill(val: &mut Vec<u8>, size: usize) {
    if val.is_empty() {
        val.resize(size.saturating_sub(OVERHEAD), 0);
        rand::thread_rng().fill(&mut val[..]);
    }
}

fn scribble(val: &mut [u8], patch: &[u8]) {
    if val.len() <= patch.len() {
        return;
    }
    let at = rand::thread_rng().gen_range(0..val.len() - patch.len());
    val[at..at + patch.len()].copy_from_slice(patch);
}

/// Time-tracked benchmark record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackedRecord {
    key: String,
    val: Vec<u8>,
    size: usize,
    created: i64,
    updated: i64,
}

impl TrackedRecord {
    /// Record whose payload brings it to roughly `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Record addressing an existing id, for reads
    pub fn with_key(size: usize, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::new(size)
        }
    }

    /// Overwrite a random slice of the payload with `patch`
    pub fn edit(&mut self, patch: &[u8]) {
        scribble(&mut self.val, patch);
    }
}

impl Item for TrackedRecord {
    fn namespace(&self) -> &str {
        BENCH_NAMESPACE
    }

    fn id(&self) -> &str {
        &self.key
    }

    fn marshal(&self) -> Result<Vec<u8>> {
        if self.val.is_empty() {
            let mut filled = self.clone();
            fill(&mut filled.val, filled.size);
            return Encoding::Bincode.encode(&filled);
        }
        Encoding::Bincode.encode(self)
    }

    fn unmarshal(&mut self, buf: &[u8]) -> Result<()> {
        *self = Encoding::Bincode.decode(buf)?;
        Ok(())
    }

    fn id_setter(&mut self) -> Option<&mut dyn IdSetter> {
        // Payload is generated here so later edits have bytes to touch
        fill(&mut self.val, self.size);
        Some(self)
    }

    fn time_tracker(&self) -> Option<&dyn TimeTracker> {
        Some(self)
    }

    fn time_tracker_mut(&mut self) -> Option<&mut dyn TimeTracker> {
        Some(self)
    }
}

impl IdSetter for TrackedRecord {
    fn set_id(&mut self, id: String) {
        self.key = id;
    }
}

impl TimeTracker for TrackedRecord {
    fn created(&self) -> i64 {
        self.created
    }

    fn set_created(&mut self, ts: i64) {
        self.created = ts;
    }

    fn updated(&self) -> i64 {
        self.updated
    }

    fn set_updated(&mut self, ts: i64) {
        self.updated = ts;
    }
}

/// Benchmark record without time tracking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlainRecord {
    key: String,
    val: Vec<u8>,
    size: usize,
}

impl PlainRecord {
    /// Record whose payload brings it to roughly `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Record addressing an existing id, for reads
    pub fn with_key(size: usize, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::new(size)
        }
    }

    /// Overwrite a random slice of the payload with `patch`
    pub fn edit(&mut self, patch: &[u8]) {
        scribble(&mut self.val, patch);
    }
}

impl Item for PlainRecord {
    fn namespace(&self) -> &str {
        BENCH_NAMESPACE
    }

    fn id(&self) -> &str {
        &self.key
    }

    fn marshal(&self) -> Result<Vec<u8>> {
        Encoding::Bincode.encode(self)
    }

    fn unmarshal(&mut self, buf: &[u8]) -> Result<()> {
        *self = Encoding::Bincode.decode(buf)?;
        Ok(())
    }

    fn id_setter(&mut self) -> Option<&mut dyn IdSetter> {
        fill(&mut self.val, self.size);
        Some(self)
    }
}

impl IdSetter for PlainRecord {
    fn set_id(&mut self, id: String) {
        self.key = id;
    }
}
