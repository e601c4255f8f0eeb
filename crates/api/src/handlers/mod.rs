pub mod apollo;
pub mod avainode;

use axum::http::HeaderMap;

use crate::state::AppState;

/// Record the request against its session, when the caller sent an
/// `X-Session-Id` header.
///
/// Best-effort: the session store is a cache, so failures are logged and
/// never fail the request.
pub(crate) async fn touch_session(state: &AppState, headers: &HeaderMap, endpoint: &'static str) {
    let Some(session_id) = headers.get("x-session-id").and_then(|v| v.to_str().ok()) else {
        return;
    };

    if let Err(e) = state.sessions.touch(session_id, endpoint).await {
        tracing::warn!(session_id, endpoint, error = %e, "Session touch failed");
    }
}
