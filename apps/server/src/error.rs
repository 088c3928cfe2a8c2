use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use moneta_core::errors::{DatabaseError, Error as CoreError};

/// Maps [`CoreError`] (spec §7) plus a few server-local cases to an HTTP
/// status and a `{code, message}` body, mirroring the teacher's `ApiError`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthenticated or cross-user access")]
    Unauthorized(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg, retry_after) = match &self {
            ApiError::Core(e) => core_error_status(e),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), None),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone(), None),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        let mut response = (status, body).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert("Retry-After", secs.to_string().parse().expect("numeric header value"));
        }
        response
    }
}

fn core_error_status(e: &CoreError) -> (StatusCode, String, Option<u64>) {
    match e {
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string(), None),
        CoreError::Auth(_) => (StatusCode::UNAUTHORIZED, e.to_string(), None),
        CoreError::NotFound(_, _) => (StatusCode::NOT_FOUND, e.to_string(), None),
        CoreError::Conflict(_) => (StatusCode::CONFLICT, e.to_string(), None),
        // DependencyUnavailable degrades the payload instead of failing the
        // request wherever the caller can still compute something useful
        // (spec §7); reaching this mapping means the handler gave up instead.
        CoreError::DependencyUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string(), None),
        CoreError::Transient(_) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string(), Some(5)),
        CoreError::Fatal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string(), None),
        // A unique-index hit at the storage layer is a conflict from the
        // caller's perspective (duplicate wallet name, account, etc.), not a
        // server failure; every other database error stays a 500 and never
        // leaks its message.
        CoreError::Database(DatabaseError::UniqueViolation(_)) => (StatusCode::CONFLICT, "duplicate entry".to_string(), None),
        CoreError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string(), None),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
