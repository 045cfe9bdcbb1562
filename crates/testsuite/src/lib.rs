//! Conformance checks for storekit backends and wrappers
//!
//! Every `Store` implementation should pass [`run_suite`]:
//! - [`Suite::Basic`]: close, CRUD, Natural List pagination
//! - [`Suite::Advanced`]: Basic plus the four time-sorted orders and filtering
//!
//! Checks panic with a descriptive message on the first violation, so they
//! are meant to be called from `#[tokio::test]` functions. The List checks
//! after the Natural one reuse the records it creates; run them through
//! [`run_suite`] on a fresh store rather than individually.
//!
//! [`fixtures`] carries the sized records used by the criterion benchmarks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fixtures;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use storekit_core::{
    factory, CancellationToken, Encoding, Factory, Item, ListOpt, Result, Sort, Store,
    TimeTracker,
};

/// Namespace the List checks populate
pub const STREAM_NAMESPACE: &str = "StreamSpace";

/// Namespace that must never leak into [`STREAM_NAMESPACE`] listings
pub const OTHER_NAMESPACE: &str = "Other";

/// Pause between creates so consecutive records get distinct timestamps
const STAMP_GAP: Duration = Duration::from_millis(2);

// ============================================================================
// TestRecord
// ============================================================================

/// JSON-encoded, time-tracked record used by the checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Namespace
    pub namespace: String,
    /// Id
    pub id: String,
    /// Payload
    pub rand_str: String,
    /// Creation stamp
    pub created_at: i64,
    /// Update stamp
    pub updated_at: i64,
}

impl TestRecord {
    /// Record with the given identity and payload
    pub fn new(namespace: &str, id: &str, rand_str: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            id: id.to_string(),
            rand_str: rand_str.to_string(),
            ..Default::default()
        }
    }

    /// Empty record in `namespace`, for reads and deletes
    pub fn key(namespace: &str, id: &str) -> Self {
        Self::new(namespace, id, "")
    }
}

impl Item for TestRecord {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn marshal(&self) -> Result<Vec<u8>> {
        Encoding::Json.encode(self)
    }

    fn unmarshal(&mut self, buf: &[u8]) -> Result<()> {
        *self = Encoding::Json.decode(buf)?;
        Ok(())
    }

    fn time_tracker(&self) -> Option<&dyn TimeTracker> {
        Some(self)
    }

    fn time_tracker_mut(&mut self) -> Option<&mut dyn TimeTracker> {
        Some(self)
    }
}

impl TimeTracker for TestRecord {
    fn created(&self) -> i64 {
        self.created_at
    }

    fn set_created(&mut self, ts: i64) {
        self.created_at = ts;
    }

    fn updated(&self) -> i64 {
        self.updated_at
    }

    fn set_updated(&mut self, ts: i64) {
        self.updated_at = ts;
    }
}

/// Factory producing empty [`STREAM_NAMESPACE`] records
pub fn stream_factory() -> Factory {
    factory(|| TestRecord::key(STREAM_NAMESPACE, ""))
}

// ============================================================================
// Suite runner
// ============================================================================

/// Which group of checks to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// Close, CRUD and Natural List
    Basic,
    /// Basic plus time-sorted List and filtering
    Advanced,
}

/// Run every check of `suite` against `store`.
///
/// # Panics
///
/// On the first failed check.
pub async fn run_suite(store: &dyn Store, suite: Suite) {
    tracing::info!(target: "storekit::testsuite", ?suite, "running suite");

    check_close(store).await;
    check_crud(store).await;
    check_natural_list(store).await;

    if suite == Suite::Advanced {
        check_created_asc(store).await;
        check_created_desc(store).await;
        check_updated_asc(store).await;
        check_updated_desc(store).await;
        check_filter(store).await;
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Close must succeed and leave the store usable
pub async fn check_close(store: &dyn Store) {
    if let Err(e) = store.close().await {
        panic!("error closing store: {}", e);
    }
}

/// Create, read back, update, read again, delete, read fails with NotFound
pub async fn check_crud(store: &dyn Store) {
    const ID: &str = "04791e92-0b85-11ea-8d71-362b9e155667";

    let mut record = TestRecord::new("SS", ID, "totally random");
    must(store.create(&mut record).await, "create");

    let mut back = TestRecord::key("SS", ID);
    must(store.read(&mut back).await, "read");
    assert_eq!(back.rand_str, record.rand_str, "incorrect contents on read");

    record.rand_str = "not totally random".to_string();
    must(store.update(&mut record).await, "update");
    must(store.read(&mut back).await, "read after update");
    assert_eq!(
        back.rand_str, "not totally random",
        "incorrect contents on read after update"
    );

    must(store.delete(&mut record).await, "delete");
    match store.read(&mut record).await {
        Err(e) if e.is_not_found() => {}
        other => panic!("expected NotFound on read after delete, got {:?}", other),
    }
}

/// Natural List pages through one namespace only
///
/// Creates five [`STREAM_NAMESPACE`] and five [`OTHER_NAMESPACE`] records,
/// then expects pages of 2, 2 and 1 with `limit = 2`.
pub async fn check_natural_list(store: &dyn Store) {
    for i in 0..5 {
        let mut record = TestRecord::new(
            STREAM_NAMESPACE,
            &uuid::Uuid::new_v4().to_string(),
            &format!("random {}", i),
        );
        must(store.create(&mut record).await, "create");
        tokio::time::sleep(STAMP_GAP).await;
    }
    for i in 0..5 {
        let mut record = TestRecord::new(
            OTHER_NAMESPACE,
            &uuid::Uuid::new_v4().to_string(),
            &format!("random {}", i),
        );
        must(store.create(&mut record).await, "create");
    }

    let mut seen = 0;
    for page in 0..3 {
        let records = list(store, ListOpt::new().page(page).limit(2)).await;
        let expected = if page == 2 { 1 } else { 2 };
        assert_eq!(
            records.len(),
            expected,
            "unexpected entry count on page {}",
            page
        );
        for record in &records {
            assert_eq!(
                record.namespace, STREAM_NAMESPACE,
                "foreign namespace in list"
            );
        }
        seen += records.len();
    }
    assert_eq!(seen, 5, "incorrect number of entries across pages");
}

/// CreatedAsc yields non-decreasing creation stamps
pub async fn check_created_asc(store: &dyn Store) {
    check_sorted(store, Sort::CreatedAsc, |r| r.created_at).await;
}

/// CreatedDesc yields non-increasing creation stamps
pub async fn check_created_desc(store: &dyn Store) {
    check_sorted(store, Sort::CreatedDesc, |r| r.created_at).await;
}

/// UpdatedAsc yields non-decreasing update stamps, the freshly updated
/// record last
pub async fn check_updated_asc(store: &dyn Store) {
    touch(store, TOUCHED).await;
    let records = check_sorted(store, Sort::UpdatedAsc, |r| r.updated_at).await;
    assert_eq!(
        records.last().map(|r| r.rand_str.as_str()),
        Some(TOUCHED),
        "UpdatedAsc: updated record should come last"
    );
}

/// UpdatedDesc yields non-increasing update stamps, the freshly updated
/// record first
pub async fn check_updated_desc(store: &dyn Store) {
    touch(store, TOUCHED).await;
    let records = check_sorted(store, Sort::UpdatedDesc, |r| r.updated_at).await;
    assert_eq!(
        records.first().map(|r| r.rand_str.as_str()),
        Some(TOUCHED),
        "UpdatedDesc: updated record should come first"
    );
}

/// A Natural filter on `rand_str` finds exactly one record
pub async fn check_filter(store: &dyn Store) {
    let opts = ListOpt::new().limit(3).filter(|item: &dyn Item| {
        item.downcast_ref::<TestRecord>()
            .map_or(false, |r| r.rand_str == "random 3")
    });
    let records = list(store, opts).await;
    assert_eq!(records.len(), 1, "filter should find exactly one entry");
    assert_eq!(records[0].rand_str, "random 3", "wrong record passed filter");
}

// ============================================================================
// Helpers
// ============================================================================

/// Payload of the record the Updated checks bump; created first, so its
/// update moves it from one end of the order to the other
const TOUCHED: &str = "random 0";

/// Read the [`STREAM_NAMESPACE`] record carrying `rand_str` and update it
async fn touch(store: &dyn Store, rand_str: &'static str) {
    let opts = ListOpt::new().filter(move |item: &dyn Item| {
        item.downcast_ref::<TestRecord>()
            .map_or(false, |r| r.rand_str == rand_str)
    });
    let mut records = list(store, opts).await;
    assert_eq!(records.len(), 1, "expected one record with {:?}", rand_str);

    let mut record = records.remove(0);
    tokio::time::sleep(STAMP_GAP).await;
    must(store.update(&mut record).await, "update");
}

async fn check_sorted(
    store: &dyn Store,
    sort: Sort,
    stamp: fn(&TestRecord) -> i64,
) -> Vec<TestRecord> {
    let records = list(store, ListOpt::new().limit(10).sort(sort)).await;
    assert_eq!(records.len(), 5, "{:?}: expected 5 entries", sort);

    let stamps: Vec<i64> = records.iter().map(stamp).collect();
    let ordered = match sort {
        Sort::CreatedAsc | Sort::UpdatedAsc => stamps.windows(2).all(|w| w[0] <= w[1]),
        _ => stamps.windows(2).all(|w| w[0] >= w[1]),
    };
    assert!(ordered, "{:?}: out of order stamps {:?}", sort, stamps);
    records
}

async fn list(store: &dyn Store, opts: ListOpt) -> Vec<TestRecord> {
    let stream = match store
        .list(CancellationToken::new(), stream_factory(), opts)
        .await
    {
        Ok(stream) => stream,
        Err(e) => panic!("list failed: {}", e),
    };
    match stream.try_collect::<TestRecord>().await {
        Ok(records) => records,
        Err(e) => panic!("list entry failed: {}", e),
    }
}

fn must(res: Result<()>, op: &str) {
    if let Err(e) = res {
        panic!("{} failed: {}", op, e);
    }
}
