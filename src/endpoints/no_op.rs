//! Shared no-op handler for routing probes.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::routing::{RequestPathInfo, SelectorBinding};

/// Default response for endpoints that exist only to be reachable.
///
/// Reports which binding matched and how the request path decomposed, so
/// routing tests can assert on the dispatch outcome without the endpoint
/// doing any work of its own.
pub fn respond(binding: &SelectorBinding, info: &RequestPathInfo) -> Response {
    let mut body = format!("handled-by={}\n", binding.name);
    body.push_str(&format!("path={}\n", info.resource_path));
    body.push_str(&format!("selectors={}\n", info.selectors.join(".")));
    if let Some(extension) = &info.extension {
        body.push_str(&format!("extension={extension}\n"));
    }

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}
