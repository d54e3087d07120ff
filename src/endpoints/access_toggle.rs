//! Endpoint toggling anonymous access and waiting for acknowledgement.

use std::sync::Arc;
use std::time::Duration;

use axum::Form;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::config::ConfigStore;
use crate::endpoints::AppState;
use crate::error::Result;
use crate::notify::{EventBus, ModificationCounter, SubscriptionHandle};

/// Id of the configuration record controlling the authenticator.
pub const AUTH_RECORD_ID: &str = "core.authenticator";

/// Boolean property granting anonymous access.
pub const PROP_ALLOW_ANONYMOUS: &str = "allow.anonymous";

/// How long to wait for the change acknowledgement event.
const ACK_TIMEOUT: Duration = Duration::from_millis(1000);

/// Form parameters accepted by the toggle endpoint.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    /// Requested action: `enable`, `disable`, or anything else for a no-op.
    #[serde(default)]
    pub action: Option<String>,
}

/// Mutates the authenticator record and confirms the change was observed.
///
/// Owns the modification counter fed by its bus subscription: every change
/// event carrying [`AUTH_RECORD_ID`] advances the counter, events for other
/// records are ignored. Repeated events are not deduplicated; the wait only
/// requires the counter to pass its captured baseline.
pub struct AccessToggle {
    store: ConfigStore,
    counter: Arc<ModificationCounter>,
    _subscription: SubscriptionHandle,
}

impl AccessToggle {
    /// Subscribe to the bus and build the toggle around the given store.
    pub async fn new(store: ConfigStore, bus: &EventBus) -> Self {
        let counter = Arc::new(ModificationCounter::new());
        let observed = Arc::clone(&counter);
        let subscription = bus
            .subscribe(move |event| {
                if event.record_id == AUTH_RECORD_ID {
                    observed.increment();
                }
            })
            .await;

        Self {
            store,
            counter,
            _subscription: subscription,
        }
    }

    /// Current value of the modification counter.
    pub fn modification_count(&self) -> u64 {
        self.counter.value()
    }

    /// Apply a toggle action.
    ///
    /// `enable` and `disable` capture the counter baseline, update the
    /// authenticator record, and block until the corresponding change event
    /// is observed; any other action is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AckTimeout`](crate::error::HarnessError::AckTimeout) when no
    /// matching event arrives within the acknowledgement deadline.
    pub async fn apply(&self, action: &str) -> Result<()> {
        let allow = match action {
            "enable" => true,
            "disable" => false,
            _ => return Ok(()),
        };

        let baseline = self.counter.value();
        let mut record = self.store.get_or_create(AUTH_RECORD_ID);
        record.set_bool(PROP_ALLOW_ANONYMOUS, allow);
        self.store.update(record).await;
        tracing::info!(action, "authenticator record submitted, awaiting acknowledgement");
        self.counter.wait_for_advance(baseline, ACK_TIMEOUT).await
    }
}

/// `POST /testing/AnonymousAccessConfigServlet.txt`
///
/// Always answers `ok`; an acknowledgement timeout propagates instead and
/// aborts the response with the framework-default error.
pub async fn handle(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<impl IntoResponse> {
    if let Some(action) = form.action.as_deref() {
        state.toggle.apply(action).await?;
    }
    Ok(([(header::CONTENT_TYPE, "text/plain")], "ok\n"))
}
