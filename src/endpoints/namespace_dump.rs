//! Endpoint dumping the session's namespace mappings as plain text.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::endpoints::AppState;
use crate::error::Result;

/// `GET /testing/NamespaceTestServlet/output`
///
/// Writes the session user id, then one `prefix=uri` line per namespace
/// known to the session, in the session's enumeration order. A session
/// failure aborts the response with the framework-default error.
pub async fn handle(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let session = &state.session;

    let mut body = format!("userid={}\n", session.user_id()?);
    for prefix in session.namespace_prefixes()? {
        let uri = session.namespace_uri(&prefix)?;
        body.push_str(&format!("{prefix}={uri}\n"));
    }

    Ok(([(header::CONTENT_TYPE, "text/plain")], body))
}
