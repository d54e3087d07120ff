//! Harness server binary.
//!
//! Serves the test-support endpoints against in-memory fixtures. The bind
//! address and the session fixture come from [`Settings`]; point an
//! integration suite at the printed address.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use repo_harness::config::ConfigStore;
use repo_harness::endpoints::{self, AccessToggle, AppState};
use repo_harness::error::Result;
use repo_harness::notify::EventBus;
use repo_harness::routing::{SelectorBinding, SelectorRegistry};
use repo_harness::session::InMemorySession;
use repo_harness::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings_file = env::var_os("HARNESS_CONFIG").map(PathBuf::from);
    let settings = Settings::load(settings_file.as_deref())?;

    let bus = EventBus::new();
    let store = ConfigStore::with_notifier(bus.clone());
    let toggle = AccessToggle::new(store, &bus).await;

    let mut session = InMemorySession::new(settings.session.user_id.as_str());
    for (prefix, uri) in &settings.session.namespaces {
        session = session.with_namespace(prefix.as_str(), uri.as_str());
    }

    let mut selectors = SelectorRegistry::new();
    selectors.register(SelectorBinding::new("selector-probe", &["print", "a4"], "txt"));

    let app = endpoints::router(AppState {
        toggle: Arc::new(toggle),
        session: Arc::new(session),
        selectors: Arc::new(selectors),
    });

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "harness endpoints listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("ctrl-c handler unavailable, running until killed");
        std::future::pending::<()>().await;
    }
}
