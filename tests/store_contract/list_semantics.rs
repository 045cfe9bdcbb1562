//! List pagination, ordering and streaming through the public facade

use crate::test_utils::{init_tracing, manual_store, task_factory, Task, TASK_NAMESPACE};
use rand::seq::SliceRandom;
use std::time::Duration;
use storekit::{CancellationToken, Error, ListOpt, Sort, Store, TracedStore};
use tokio_stream::StreamExt;

async fn seeded(count: usize) -> (std::sync::Arc<storekit::InMemStore>, Vec<Task>) {
    let (store, clock) = manual_store();
    let mut tasks = Vec::with_capacity(count);
    for i in 0..count {
        let mut task = Task::new(&format!("task {}", i));
        store.create(&mut task).await.unwrap();
        clock.advance(10);
        tasks.push(task);
    }
    (store, tasks)
}

async fn titles(store: &dyn Store, opts: ListOpt) -> Vec<String> {
    let stream = store
        .list(CancellationToken::new(), task_factory(), opts)
        .await
        .unwrap();
    stream
        .try_collect::<Task>()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect()
}

#[tokio::test]
async fn test_store_assigned_ids_are_sequential() {
    let (_store, tasks) = seeded(3).await;
    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_pages_cover_every_record_once() {
    init_tracing();
    let (store, _) = seeded(7).await;

    let mut all = Vec::new();
    for page in 0..4 {
        let got = titles(store.as_ref(), ListOpt::new().page(page).limit(2)).await;
        assert!(got.len() <= 2);
        all.extend(got);
    }
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 7);

    // Past the end
    assert!(titles(store.as_ref(), ListOpt::new().page(9).limit(2))
        .await
        .is_empty());
}

#[tokio::test]
async fn test_unlimited_and_negative_page() {
    let (store, _) = seeded(5).await;
    assert_eq!(titles(store.as_ref(), ListOpt::new()).await.len(), 5);
    assert_eq!(titles(store.as_ref(), ListOpt::new().limit(-3)).await.len(), 5);
    assert_eq!(
        titles(store.as_ref(), ListOpt::new().page(-2).limit(2))
            .await
            .len(),
        2
    );
}

#[tokio::test]
async fn test_time_sorted_paging() {
    let (store, _) = seeded(6).await;
    let page = |p| ListOpt::new().page(p).limit(4).sort(Sort::CreatedDesc);

    assert_eq!(
        titles(store.as_ref(), page(0)).await,
        vec!["task 5", "task 4", "task 3", "task 2"]
    );
    assert_eq!(
        titles(store.as_ref(), page(1)).await,
        vec!["task 1", "task 0"]
    );
}

#[tokio::test]
async fn test_updated_order_follows_updates() {
    let (store, clock) = manual_store();
    let mut tasks = Vec::new();
    for i in 0..6 {
        let mut task = Task::new(&format!("task {}", i));
        store.create(&mut task).await.unwrap();
        clock.advance(1);
        tasks.push(task);
    }

    tasks.shuffle(&mut rand::thread_rng());
    for task in tasks.iter_mut() {
        clock.advance(1);
        task.done = true;
        store.update(task).await.unwrap();
    }
    let expected: Vec<String> = tasks.iter().map(|t| t.title.clone()).collect();

    assert_eq!(
        titles(store.as_ref(), ListOpt::new().sort(Sort::UpdatedAsc)).await,
        expected
    );
    let mut reversed = expected.clone();
    reversed.reverse();
    assert_eq!(
        titles(store.as_ref(), ListOpt::new().sort(Sort::UpdatedDesc)).await,
        reversed
    );
}

#[tokio::test]
async fn test_deleted_records_leave_every_order() {
    let (store, mut tasks) = seeded(4).await;
    store.delete(&mut tasks[1]).await.unwrap();
    store.delete(&mut Task::with_id("never-stored")).await.unwrap();

    for sort in [
        Sort::Natural,
        Sort::CreatedAsc,
        Sort::CreatedDesc,
        Sort::UpdatedAsc,
        Sort::UpdatedDesc,
    ] {
        let got = titles(store.as_ref(), ListOpt::new().sort(sort)).await;
        assert_eq!(got.len(), 3, "{:?}", sort);
        assert!(!got.contains(&"task 1".to_string()), "{:?}", sort);
    }
}

#[tokio::test]
async fn test_stream_trait_consumption() {
    let (store, _) = seeded(5).await;
    let stream = store
        .list(
            CancellationToken::new(),
            task_factory(),
            ListOpt::new().sort(Sort::CreatedAsc),
        )
        .await
        .unwrap();

    let ids: Vec<String> = stream
        .filter_map(|entry| entry.downcast::<Task>().ok().flatten())
        .map(|task| task.id)
        .collect()
        .await;
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_cancel_before_consuming() {
    let (store, _) = seeded(5).await;
    let cancel = CancellationToken::new();
    let stream = store
        .list(cancel.clone(), task_factory(), ListOpt::new())
        .await
        .unwrap();
    cancel.cancel();

    let leftover = tokio::time::timeout(Duration::from_secs(5), stream.collect_all())
        .await
        .expect("stream should close after cancel");
    assert!(leftover.len() <= 1);

    let mut task = Task::new("after");
    store.create(&mut task).await.unwrap();
}

#[tokio::test]
async fn test_traced_list_cancel() {
    let (inner, _) = seeded(8).await;
    let store = TracedStore::new(inner);
    let cancel = CancellationToken::new();
    let mut stream = store
        .list(cancel.clone(), task_factory(), ListOpt::new())
        .await
        .unwrap();
    assert!(stream.next().await.is_some());
    cancel.cancel();

    let rest = tokio::time::timeout(Duration::from_secs(5), stream.collect_all())
        .await
        .expect("stream should close after cancel");
    assert!(rest.len() <= 2);
}

#[tokio::test]
async fn test_sort_discriminants() {
    assert_eq!(Sort::try_from(0i64).unwrap(), Sort::Natural);
    assert_eq!(Sort::try_from(1i64).unwrap(), Sort::CreatedDesc);
    assert_eq!(Sort::try_from(4i64).unwrap(), Sort::UpdatedAsc);
    assert!(matches!(Sort::try_from(5i64), Err(Error::InvalidSort(5))));
}

#[tokio::test]
async fn test_time_sort_on_unindexed_namespace() {
    let (store, _) = manual_store();
    let err = store
        .list(
            CancellationToken::new(),
            task_factory(),
            ListOpt::new().sort(Sort::CreatedAsc),
        )
        .await
        .unwrap_err();
    match err {
        Error::IndexNotFound { namespace } => assert_eq!(namespace, TASK_NAMESPACE),
        other => panic!("expected IndexNotFound, got {:?}", other),
    }
}
