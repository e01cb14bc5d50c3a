//! Cross-tab behaviour of the in-memory store, driven through the trait object
//! the session layer uses.

use std::sync::Arc;
use std::time::Duration;

use pc_storage::{MemoryStorage, SharedStorage, TOKEN_KEY};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn foreign_removal_is_delivered_asynchronously() {
    let store = MemoryStorage::new();
    let writer: Arc<dyn SharedStorage> = Arc::new(store.tab());
    let reader: Arc<dyn SharedStorage> = Arc::new(store.tab());
    let mut events = reader.subscribe().expect("memory tabs notify");

    writer.set(TOKEN_KEY, "t1").expect("set");
    writer.remove(TOKEN_KEY).expect("remove");

    let first = tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event in time")
        .expect("store alive");
    assert_eq!(first.new_value.as_deref(), Some("t1"));

    let second = tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event in time")
        .expect("store alive");
    assert_eq!(second.key, TOKEN_KEY);
    assert_eq!(second.old_value.as_deref(), Some("t1"));
    assert_eq!(second.new_value, None);
}

#[tokio::test]
async fn stream_ends_when_store_is_dropped() {
    let store = MemoryStorage::new();
    let tab = store.tab();
    let mut events = tab.subscribe().expect("memory tabs notify");
    drop(tab);
    drop(store);

    assert_eq!(events.recv().await, None);
}
