//! In-memory configuration record store.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::ConfigRecord;
use crate::notify::{ChangeEvent, EventBus};

/// In-memory configuration-record store with lock-free reads.
///
/// Records live behind an [`ArcSwap`]: reads grab the current snapshot
/// without locking, updates swap in a replacement map (RCU). Clones share the
/// same records.
///
/// A store built with [`with_notifier`](Self::with_notifier) publishes a
/// [`ChangeEvent`] after every update, standing in for the acknowledgement
/// feed of the external configuration-management service. A store built with
/// [`new`](Self::new) stays silent, which is how the harness exercises the
/// acknowledgement-timeout path.
#[derive(Clone)]
pub struct ConfigStore {
    records: Arc<ArcSwap<HashMap<String, ConfigRecord>>>,
    notifier: Option<EventBus>,
}

impl ConfigStore {
    /// Create a store that does not announce updates.
    pub fn new() -> Self {
        Self {
            records: Arc::new(ArcSwap::from_pointee(HashMap::new())),
            notifier: None,
        }
    }

    /// Create a store that publishes a change event after each update.
    pub fn with_notifier(bus: EventBus) -> Self {
        Self {
            records: Arc::new(ArcSwap::from_pointee(HashMap::new())),
            notifier: Some(bus),
        }
    }

    /// Fetch a record by id.
    pub fn get(&self, id: &str) -> Option<ConfigRecord> {
        self.records.load().get(id).cloned()
    }

    /// Fetch a record, or produce an empty one when the id is unknown.
    ///
    /// The empty record is not stored until it is passed to
    /// [`update`](Self::update).
    pub fn get_or_create(&self, id: &str) -> ConfigRecord {
        self.get(id).unwrap_or_else(|| ConfigRecord::new(id))
    }

    /// Atomically replace the stored record and announce the change.
    pub async fn update(&self, record: ConfigRecord) {
        let id = record.id().to_string();
        self.records.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(id.clone(), record.clone());
            next
        });
        tracing::debug!(record_id = %id, "configuration record updated");

        if let Some(bus) = &self.notifier {
            bus.publish(&ChangeEvent::new(id)).await;
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.load().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.load().is_empty()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn update_then_get_round_trips() {
        let store = ConfigStore::new();
        assert!(store.get("core.authenticator").is_none());

        let mut record = store.get_or_create("core.authenticator");
        record.set_bool("allow.anonymous", false);
        store.update(record).await;

        let stored = store.get("core.authenticator").unwrap();
        assert_eq!(stored.bool_property("allow.anonymous"), Some(false));
    }

    #[test]
    fn get_or_create_does_not_insert() {
        let store = ConfigStore::new();
        let record = store.get_or_create("core.authenticator");
        assert!(record.is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_the_whole_record() {
        let store = ConfigStore::new();

        let mut first = store.get_or_create("core.authenticator");
        first.set_bool("allow.anonymous", true);
        store.update(first).await;

        let mut second = ConfigRecord::new("core.authenticator");
        second.set_bool("allow.anonymous", false);
        store.update(second).await;

        assert_eq!(store.len(), 1);
        let stored = store.get("core.authenticator").unwrap();
        assert_eq!(stored.bool_property("allow.anonymous"), Some(false));
    }

    #[tokio::test]
    async fn notifier_store_announces_updates() {
        let bus = EventBus::new();
        let observed = Arc::new(AtomicUsize::new(0));

        let observed_clone = Arc::clone(&observed);
        let _subscription = bus
            .subscribe(move |event| {
                if event.record_id == "core.authenticator" {
                    observed_clone.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        let store = ConfigStore::with_notifier(bus);
        store.update(ConfigRecord::new("core.authenticator")).await;
        store.update(ConfigRecord::new("some.other.record")).await;

        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clones_share_records() {
        let store = ConfigStore::new();
        let store2 = store.clone();

        store.update(ConfigRecord::new("core.authenticator")).await;
        assert!(store2.get("core.authenticator").is_some());
    }
}
