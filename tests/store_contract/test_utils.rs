//! Shared fixtures for the store contract tests

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Once};
use storekit::{
    factory, Encoding, Factory, IdSetter, InMemOptions, InMemStore, Item, ManualClock, Result,
    TimeTracker,
};

static TRACING: Once = Once::new();

/// Route test logs through the libtest capture
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// MessagePack-encoded task with store-assigned ids and time tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub done: bool,
    pub created: i64,
    pub updated: i64,
}

pub const TASK_NAMESPACE: &str = "tasks";

impl Task {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }
}

impl Item for Task {
    fn namespace(&self) -> &str {
        TASK_NAMESPACE
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn marshal(&self) -> Result<Vec<u8>> {
        Encoding::MsgPack.encode(self)
    }

    fn unmarshal(&mut self, buf: &[u8]) -> Result<()> {
        *self = Encoding::MsgPack.decode(buf)?;
        Ok(())
    }

    fn id_setter(&mut self) -> Option<&mut dyn IdSetter> {
        Some(self)
    }

    fn time_tracker(&self) -> Option<&dyn TimeTracker> {
        Some(self)
    }

    fn time_tracker_mut(&mut self) -> Option<&mut dyn TimeTracker> {
        Some(self)
    }
}

impl IdSetter for Task {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl TimeTracker for Task {
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

pub fn task_factory() -> Factory {
    factory(Task::default)
}

/// In-memory store on a manual clock starting at 1
pub fn manual_store() -> (Arc<InMemStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1));
    let store = InMemStore::with_clock(InMemOptions::default(), clock.clone());
    (Arc::new(store), clock)
}
