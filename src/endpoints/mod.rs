//! HTTP endpoints and router assembly.
//!
//! Three independent, stateless-per-request endpoints: the access toggle,
//! the namespace dump, and a selector-routed no-op probe. Each receives a
//! request, calls one or two of the emulated external services, and writes a
//! plain-text response.

mod access_toggle;
mod namespace_dump;
mod no_op;

pub use access_toggle::{AUTH_RECORD_ID, AccessToggle, PROP_ALLOW_ANONYMOUS, ToggleForm};

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use tower_http::trace::TraceLayer;

use crate::routing::{RequestPathInfo, SelectorRegistry};
use crate::session::RepositorySession;

/// Shared state handed to every endpoint.
#[derive(Clone)]
pub struct AppState {
    /// Access toggle backing the configuration endpoint.
    pub toggle: Arc<AccessToggle>,
    /// Repository session the namespace endpoint reads from.
    pub session: Arc<dyn RepositorySession>,
    /// Selector bindings served under the testing tree.
    pub selectors: Arc<SelectorRegistry>,
}

/// Assemble the harness router.
///
/// The two fixed routes take precedence over the catch-all, which funnels
/// every other request under `/testing/` through the selector registry.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/testing/AnonymousAccessConfigServlet.txt",
            post(access_toggle::handle),
        )
        .route(
            "/testing/NamespaceTestServlet/output",
            get(namespace_dump::handle),
        )
        .route("/testing/{*path}", any(dispatch_selectors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route a request through the selector registry.
async fn dispatch_selectors(State(state): State<AppState>, Path(rest): Path<String>) -> Response {
    let info = RequestPathInfo::parse(&rest);
    match state.selectors.resolve(&info) {
        Some(binding) => no_op::respond(binding, &info),
        None => {
            tracing::debug!(path = %rest, "no selector binding matched");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
