//! Store options from configuration

use crate::test_utils::Task;
use storekit::{InMemOptions, InMemStore, Store};

#[test]
fn test_options_from_json() {
    let opts: InMemOptions = serde_json::from_str(
        r#"{ "table_capacity": 16, "index_capacity": 4, "index_growth_slack": 1, "index_growth_chunk": 2 }"#,
    )
    .unwrap();
    assert_eq!(opts.table_capacity, 16);
    assert_eq!(opts.namespace_capacity, InMemOptions::default().namespace_capacity);
    assert_eq!(opts.index_growth_chunk, 2);
}

#[test]
fn test_options_json_roundtrip() {
    let opts = InMemOptions::new().table_capacity(7).index_growth(3, 9);
    let json = serde_json::to_string(&opts).unwrap();
    let back: InMemOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, opts);
}

#[tokio::test]
async fn test_tiny_capacities_still_work() {
    let opts = InMemOptions::new()
        .table_capacity(0)
        .namespace_capacity(0)
        .index_capacity(0)
        .index_growth(0, 1);
    let store = InMemStore::with_options(opts);
    for i in 0..32 {
        let mut task = Task::new(&format!("t{}", i));
        store.create(&mut task).await.unwrap();
    }
    assert_eq!(store.len(), 32);
    assert_eq!(store.options(), &opts);

    let index = store.time_index("tasks").unwrap();
    assert_eq!(index.created().len(), 32);
    assert!(index.created().capacity() >= index.created().bucket_count());
}
