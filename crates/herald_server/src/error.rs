//! HTTP mapping for store errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use herald_error::{HeraldError, HeraldErrorKind, MacroErrorKind};
use serde_json::json;
use tracing::error;

/// A store error on its way out as an HTTP response.
///
/// Expected, user-facing outcomes map to their natural status codes;
/// operator-facing failures are logged with full context here and leave
/// only a generic 500 body, so storage paths never leak to dashboard
/// users.
#[derive(Debug)]
pub struct ApiError(HeraldError);

impl From<HeraldError> for ApiError {
    fn from(err: HeraldError) -> Self {
        Self(err)
    }
}

impl From<herald_error::IdentityError> for ApiError {
    fn from(err: herald_error::IdentityError) -> Self {
        Self(err.into())
    }
}

impl From<herald_error::AccessError> for ApiError {
    fn from(err: herald_error::AccessError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.kind() {
            HeraldErrorKind::Macro(e) => {
                let status = match &e.kind {
                    MacroErrorKind::DuplicateName(_) => StatusCode::CONFLICT,
                    MacroErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                };
                (status, e.kind.to_string())
            }
            HeraldErrorKind::Access(e) => (StatusCode::FORBIDDEN, e.kind.to_string()),
            HeraldErrorKind::Identity(e) => (StatusCode::BAD_REQUEST, e.kind.to_string()),
            HeraldErrorKind::Storage(_) | HeraldErrorKind::Secrets(_) => {
                error!(error = %self.0, "Guild store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage failure".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
