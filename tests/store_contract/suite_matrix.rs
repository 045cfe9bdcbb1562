//! Conformance suite across every backend/wrapper combination

use crate::test_utils::init_tracing;
use std::sync::Arc;
use storekit::{InMemStore, Mount, PrefixStore, Store, SyncStore, TracedStore};
use storekit_testsuite::{run_suite, Suite};

fn inmem() -> Arc<dyn Store> {
    Arc::new(InMemStore::new())
}

fn boxed(store: impl Store + 'static) -> Box<dyn Store> {
    Box::new(store)
}

/// Every combination, freshly built
fn combinations() -> Vec<(&'static str, Box<dyn Store>)> {
    vec![
        ("inmem", boxed(InMemStore::new())),
        ("sync(inmem)", boxed(SyncStore::new(InMemStore::new()))),
        ("traced(inmem)", boxed(TracedStore::new(InMemStore::new()))),
        (
            "traced(sync(inmem))",
            boxed(TracedStore::new(SyncStore::new(InMemStore::new()))),
        ),
        (
            "prefix(catch-all)",
            boxed(PrefixStore::new([Mount::new("", inmem())])),
        ),
        (
            "prefix(split)",
            boxed(PrefixStore::new([
                Mount::new("S", inmem()),
                Mount::new("Stream", Arc::new(SyncStore::new(InMemStore::new()))),
                Mount::new("Other", Arc::new(TracedStore::new(InMemStore::new()))),
            ])),
        ),
        (
            "sync(prefix(traced(inmem)))",
            boxed(SyncStore::new(PrefixStore::new([Mount::new(
                "",
                Arc::new(TracedStore::new(InMemStore::new())),
            )]))),
        ),
    ]
}

#[tokio::test]
async fn test_basic_suite_all_combinations() {
    init_tracing();
    for (name, store) in combinations() {
        tracing::info!(combination = name, "basic suite");
        run_suite(store.as_ref(), Suite::Basic).await;
    }
}

#[tokio::test]
async fn test_advanced_suite_all_combinations() {
    init_tracing();
    for (name, store) in combinations() {
        tracing::info!(combination = name, "advanced suite");
        run_suite(store.as_ref(), Suite::Advanced).await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_advanced_suite_multi_thread_runtime() {
    init_tracing();
    for (_, store) in combinations() {
        run_suite(store.as_ref(), Suite::Advanced).await;
    }
}

#[tokio::test]
async fn test_suite_through_shared_handle() {
    let store: Arc<dyn Store> = Arc::new(SyncStore::new(InMemStore::new()));
    let shared = Arc::clone(&store);
    run_suite(&shared, Suite::Advanced).await;
}
