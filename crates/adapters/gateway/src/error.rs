//! Failure mapping.
//!
//! [`ApiError`] is a recovered failure: it always turns into a response.
//! [`InvocationError`] is an unrecovered failure: it is handed back to the
//! host instead of a response.

use itemshim_app::faults::Operation;
use itemshim_domain::error::ItemShimError;

use crate::response::{ErrorBody, GatewayResponse};

/// Maps [`ItemShimError`] to a response with the appropriate status code.
///
/// `context` is the label used for 500s (`"Failed to create item"`, …).
#[derive(Debug)]
pub struct ApiError {
    context: &'static str,
    error: ItemShimError,
}

impl ApiError {
    #[must_use]
    pub fn new(context: &'static str, error: ItemShimError) -> Self {
        Self { context, error }
    }

    /// Shape the error into a response.
    #[must_use]
    pub fn into_response(self) -> GatewayResponse {
        match &self.error {
            ItemShimError::Validation(err) => {
                GatewayResponse::json(400, &ErrorBody::new(&err.to_string()))
            }
            ItemShimError::Payload(err) => {
                tracing::warn!(error = %err, "unreadable request body");
                GatewayResponse::json(
                    500,
                    &ErrorBody::new(self.context).with_message(&err.to_string()),
                )
            }
            ItemShimError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                GatewayResponse::json(
                    500,
                    &ErrorBody::new(self.context).with_message(&err.to_string()),
                )
            }
        }
    }
}

/// Failures that must surface to the host as a failed execution.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// The event matches neither supported layout.
    #[error("unrecognized invocation event")]
    UnrecognizedEvent(#[source] serde_json::Error),

    /// A base64-flagged body is not valid base64.
    #[error("request body is not valid base64")]
    Base64Body(#[from] base64::DecodeError),

    /// A decoded body is not valid UTF-8.
    #[error("request body is not valid UTF-8")]
    Utf8Body(#[from] std::string::FromUtf8Error),

    /// A server error chosen by the fault injector.
    #[error("Simulated server error in {operation}")]
    Simulated { operation: Operation },
}

impl InvocationError {
    /// Short machine-readable name, reported as `errorType` by hosts.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnrecognizedEvent(_) => "UnrecognizedEvent",
            Self::Base64Body(_) | Self::Utf8Body(_) => "InvalidBody",
            Self::Simulated { .. } => "SimulatedServerError",
        }
    }
}
