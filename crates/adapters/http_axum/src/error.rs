//! HTTP mapping for unrecovered failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use itemshim_adapter_gateway::InvocationError;

/// Body reported for a failed execution.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_type: &'static str,
    error_message: String,
}

/// Maps [`InvocationError`] to a `502 Bad Gateway`.
pub struct UnhandledError(InvocationError);

impl From<InvocationError> for UnhandledError {
    fn from(err: InvocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UnhandledError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, error_type = self.0.error_type(), "invocation failed");
        let body = ErrorBody {
            error_type: self.0.error_type(),
            error_message: self.0.to_string(),
        };
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}
