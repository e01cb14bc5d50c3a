//! In-process shared storage with per-tab handles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use crate::events::{StorageEvent, StorageEvents, TabId};
use crate::{SharedStorage, StorageError};

const EVENT_CAPACITY: usize = 64;

struct Shared {
    entries: Mutex<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
    next_tab: AtomicU64,
}

/// The store itself. Hand out one [`MemoryTab`] per simulated tab.
#[derive(Clone)]
pub struct MemoryStorage {
    shared: Arc<Shared>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                entries: Mutex::new(HashMap::new()),
                events,
                next_tab: AtomicU64::new(1),
            }),
        }
    }

    /// Open a new tab onto this store.
    #[must_use]
    pub fn tab(&self) -> MemoryTab {
        let id = TabId(self.shared.next_tab.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(tab = %id, "opened storage tab");
        MemoryTab {
            id,
            shared: Arc::clone(&self.shared),
        }
    }
}

/// One tab's view of a [`MemoryStorage`].
#[derive(Clone)]
pub struct MemoryTab {
    id: TabId,
    shared: Arc<Shared>,
}

impl MemoryTab {
    #[must_use]
    pub const fn id(&self) -> TabId {
        self.id
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent strings.
        self.shared
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn announce(&self, key: &str, old_value: Option<String>, new_value: Option<String>) {
        if old_value == new_value {
            return;
        }
        // No receivers is fine: nobody is listening yet.
        let _ = self.shared.events.send(StorageEvent {
            key: key.to_string(),
            old_value,
            new_value,
            origin: self.id,
        });
    }
}

impl SharedStorage for MemoryTab {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let old = self.entries().insert(key.to_string(), value.to_string());
        self.announce(key, old, Some(value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let old = self.entries().remove(key);
        self.announce(key, old, None);
        Ok(())
    }

    fn subscribe(&self) -> Option<StorageEvents> {
        Some(StorageEvents::new(self.shared.events.subscribe(), self.id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tabs_share_values() {
        let store = MemoryStorage::new();
        let a = store.tab();
        let b = store.tab();

        a.set("token", "abc").expect("set");
        assert_eq!(b.get("token").expect("get"), Some("abc".to_string()));

        b.remove("token").expect("remove");
        assert_eq!(a.get("token").expect("get"), None);
    }

    #[test]
    fn events_reach_other_tabs_only() {
        let store = MemoryStorage::new();
        let a = store.tab();
        let b = store.tab();
        let mut a_events = a.subscribe().expect("memory tabs notify");
        let mut b_events = b.subscribe().expect("memory tabs notify");

        a.set("token", "abc").expect("set");

        assert_eq!(a_events.try_recv(), None);
        assert_eq!(
            b_events.try_recv(),
            Some(StorageEvent {
                key: "token".into(),
                old_value: None,
                new_value: Some("abc".into()),
                origin: a.id(),
            })
        );
    }

    #[test]
    fn removal_event_carries_no_new_value() {
        let store = MemoryStorage::new();
        let a = store.tab();
        let b = store.tab();
        a.set("token", "abc").expect("set");
        let mut b_events = b.subscribe().expect("memory tabs notify");

        a.remove("token").expect("remove");

        let event = b_events.try_recv().expect("event");
        assert_eq!(event.old_value.as_deref(), Some("abc"));
        assert_eq!(event.new_value, None);
    }

    #[test]
    fn unchanged_writes_are_silent() {
        let store = MemoryStorage::new();
        let a = store.tab();
        let b = store.tab();
        a.set("k", "v").expect("set");
        let mut b_events = b.subscribe().expect("memory tabs notify");

        a.set("k", "v").expect("set");
        a.remove("missing").expect("remove");

        assert_eq!(b_events.try_recv(), None);
    }

    #[test]
    fn tab_ids_are_distinct() {
        let store = MemoryStorage::new();
        assert!(store.tab().id() != store.tab().id());
    }
}
