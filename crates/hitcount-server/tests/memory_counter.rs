//! Counter service over the in-memory backend, including concurrent load.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use futures_util::future::join_all;

use hitcount_core::{CounterMode, CounterService, CounterStore, KvStore, COUNTER_KEY};
use hitcount_server::infra::MemoryStore;

fn service(store: &Arc<MemoryStore>, mode: CounterMode) -> CounterService {
    let kv: Arc<dyn KvStore> = store.clone();
    CounterService::new(CounterStore::new(kv), mode)
}

#[tokio::test]
async fn sequential_calls_never_repeat() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(&store, CounterMode::ReadModifyWrite);

    let a = svc.next_count().await.unwrap();
    let b = svc.next_count().await.unwrap();
    assert_eq!((a, b), (0, 1));
    assert_eq!(store.value(COUNTER_KEY).as_deref(), Some("2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn atomic_mode_is_exact_under_parallel_load() {
    const N: u64 = 200;
    let store = Arc::new(MemoryStore::new());
    store.insert(COUNTER_KEY, "5");
    let svc = service(&store, CounterMode::Atomic);

    let handles = (0..N).map(|_| {
        let svc = svc.clone();
        tokio::spawn(async move { svc.next_count().await.unwrap() })
    });
    let mut got: Vec<u64> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    got.sort_unstable();

    assert_eq!(got, (5..5 + N).collect::<Vec<_>>());
    assert_eq!(store.value(COUNTER_KEY), Some((5 + N).to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn read_modify_write_never_overcounts() {
    const N: u64 = 200;
    let store = Arc::new(MemoryStore::new());
    let svc = service(&store, CounterMode::ReadModifyWrite);

    let handles = (0..N).map(|_| {
        let svc = svc.clone();
        tokio::spawn(async move { svc.next_count().await.unwrap() })
    });
    let results = join_all(handles).await;
    assert_eq!(results.len() as u64, N);

    // Lost updates may leave it short of N, never above.
    let final_value: u64 = store.value(COUNTER_KEY).unwrap().parse().unwrap();
    assert!((1..=N).contains(&final_value));
}
