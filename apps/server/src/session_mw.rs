//! `SessionGate` middleware (spec §6.1, §6.3): every wallet route is nested
//! under this layer, which verifies the caller's HMAC request stamp before
//! the handler ever runs. Because the stamp's canonical message includes the
//! request path, and every wallet route carries `{user_id}` in its path, a
//! passing verification already authenticates the `user_id` embedded in the
//! URL — a forged path fails the HMAC check, so no separate user-id header is
//! needed to reject cross-user access.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use moneta_core::session::model::RequestStamp;

use crate::error::ApiError;
use crate::main_lib::AppState;

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, ApiError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {name} header")))
}

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = header_str(request.headers(), "x-session-id")?.to_string();
    let timestamp: i64 = header_str(request.headers(), "x-timestamp")?
        .parse()
        .map_err(|_| ApiError::Unauthorized("x-timestamp is not a valid integer".into()))?;
    let provided_hmac = header_str(request.headers(), "x-hmac-signature")?.to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let stamp = RequestStamp {
        session_id: &session_id,
        method: &method,
        path: &path,
        timestamp,
        provided_hmac: &provided_hmac,
    };

    state.session_gate.verify(&stamp).map_err(ApiError::from)?;

    Ok(next.run(request).await)
}
