//! Concurrent access through the wrappers

use crate::test_utils::{task_factory, Task};
use std::sync::Arc;
use storekit::{CancellationToken, InMemStore, ListOpt, Sort, Store, SyncStore};
use storekit_testsuite::TestRecord;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_get_unique_ids() {
    let store: Arc<dyn Store> = Arc::new(SyncStore::new(InMemStore::new()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..50 {
                let mut task = Task::new(&format!("t{}", i));
                store.create(&mut task).await.unwrap();
                ids.push(task.id);
            }
            ids
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.extend(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);

    let stream = store
        .list(
            CancellationToken::new(),
            task_factory(),
            ListOpt::new().sort(Sort::CreatedAsc),
        )
        .await
        .unwrap();
    assert_eq!(stream.try_collect::<Task>().await.unwrap().len(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_during_writes() {
    let store = Arc::new(SyncStore::new(InMemStore::new()));
    for i in 0..20 {
        let mut record = TestRecord::new("shared", &format!("{}", i), "v0");
        store.create(&mut record).await.unwrap();
    }

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for round in 1..=5 {
                for i in 0..20 {
                    let mut record = TestRecord::key("shared", &format!("{}", i));
                    store.read(&mut record).await.unwrap();
                    record.rand_str = format!("v{}", round);
                    store.update(&mut record).await.unwrap();
                }
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..50 {
                for i in 0..20 {
                    let mut record = TestRecord::key("shared", &format!("{}", i));
                    store.read(&mut record).await.unwrap();
                    assert!(record.rand_str.starts_with('v'));
                }
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    let index = store.inner().time_index("shared").unwrap();
    assert_eq!(index.created().len(), 20);
    assert_eq!(index.updated().len(), 20);
}
