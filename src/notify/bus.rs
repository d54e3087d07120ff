//! Subscriber-based delivery of configuration change events.

use std::sync::Arc;
use tokio::sync::RwLock;

/// Notification that a named configuration record was observed to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Identifier of the configuration record the change applies to.
    pub record_id: String,
}

impl ChangeEvent {
    /// Create an event for the given record id.
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
        }
    }
}

type Callback = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Handle for a subscription that can be dropped to unsubscribe.
///
/// When the handle is dropped, the subscription is automatically removed.
pub struct SubscriptionHandle {
    id: usize,
    registry: Arc<RwLock<EventBusInner>>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        let id = self.id;
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            let mut inner = registry.write().await;
            inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        });
    }
}

/// Internal subscriber registry state.
struct EventBusInner {
    subscribers: Vec<(usize, Callback)>,
    next_id: usize,
}

/// Fan-out for configuration change events.
///
/// Stands in for the notification feed of the external configuration
/// subsystem: every published event is handed to each registered callback in
/// subscription order. Clones share the same registry.
///
/// # Examples
///
/// ```rust,no_run
/// use repo_harness::notify::{ChangeEvent, EventBus};
///
/// # async fn example() {
/// let bus = EventBus::new();
///
/// let handle = bus
///     .subscribe(|event| {
///         println!("record {} changed", event.record_id);
///     })
///     .await;
///
/// bus.publish(&ChangeEvent::new("core.authenticator")).await;
///
/// // Unsubscribe by dropping the handle
/// drop(handle);
/// # }
/// ```
pub struct EventBus {
    inner: Arc<RwLock<EventBusInner>>,
}

impl EventBus {
    /// Create a new event bus with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(EventBusInner {
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Subscribe to configuration change events.
    ///
    /// The callback is invoked for every published event, whatever record it
    /// carries; identifier filtering is the callback's job. Returns a handle
    /// that can be dropped to unsubscribe.
    pub async fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));

        SubscriptionHandle {
            id,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Deliver an event to all subscribers, in the order they subscribed.
    pub async fn publish(&self, event: &ChangeEvent) {
        let inner = self.inner.read().await;
        tracing::debug!(
            record_id = %event.record_id,
            subscribers = inner.subscribers.len(),
            "publishing change event"
        );
        for (_id, callback) in &inner.subscribers {
            callback(event);
        }
    }

    /// Get the number of active subscribers.
    pub async fn subscriber_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.subscribers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn subscribe_and_publish() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        let _handle = bus
            .subscribe(move |_event| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        bus.publish(&ChangeEvent::new("a")).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        bus.publish(&ChangeEvent::new("b")).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn events_carry_the_record_id() {
        let bus = EventBus::new();
        let seen = Arc::new(RwLock::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        let _handle = bus
            .subscribe(move |event| {
                let record_id = event.record_id.clone();
                let seen = Arc::clone(&seen_clone);
                tokio::spawn(async move {
                    seen.write().await.push(record_id);
                });
            })
            .await;

        bus.publish(&ChangeEvent::new("core.authenticator")).await;
        tokio::task::yield_now().await;
        assert_eq!(seen.read().await.as_slice(), ["core.authenticator"]);
    }

    #[tokio::test]
    async fn multiple_subscribers_all_notified() {
        let bus = EventBus::new();
        let counter1 = Arc::new(AtomicUsize::new(0));
        let counter2 = Arc::new(AtomicUsize::new(0));

        let counter1_clone = Arc::clone(&counter1);
        let _handle1 = bus
            .subscribe(move |_event| {
                counter1_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        let counter2_clone = Arc::clone(&counter2);
        let _handle2 = bus
            .subscribe(move |_event| {
                counter2_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        bus.publish(&ChangeEvent::new("a")).await;
        assert_eq!(counter1.load(Ordering::SeqCst), 1);
        assert_eq!(counter2.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropping_the_handle_unsubscribes() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        let handle = bus
            .subscribe(move |_event| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        bus.publish(&ChangeEvent::new("a")).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        drop(handle);

        // Give the drop task time to complete
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        bus.publish(&ChangeEvent::new("a")).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clones_share_the_registry() {
        let bus = EventBus::new();
        let bus2 = bus.clone();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let _handle = bus
            .subscribe(move |_event| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        bus2.publish(&ChangeEvent::new("a")).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus2.subscriber_count().await, 1);
    }
}
