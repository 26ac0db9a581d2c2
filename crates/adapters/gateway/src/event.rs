//! Invocation events and their normalization.
//!
//! Two layouts are accepted:
//! - REST-style: top-level `httpMethod` and `path`.
//! - HTTP-API-style: `requestContext.http.method` and
//!   `requestContext.http.path`, falling back to `rawPath`.
//!
//! Both may set `isBase64Encoded`, in which case `body` is decoded first.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::error::InvocationError;

/// The normalized request every route works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
}

impl GatewayRequest {
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body,
        }
    }
}

/// An incoming event in either supported layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InvocationEvent {
    Rest(RestApiEvent),
    Http(HttpApiEvent),
}

/// REST-style event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestApiEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// HTTP-API-style event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiEvent {
    pub request_context: HttpRequestContext,
    #[serde(default)]
    pub raw_path: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpRequestContext {
    pub http: HttpDescription,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpDescription {
    pub method: String,
    #[serde(default)]
    pub path: Option<String>,
}

impl InvocationEvent {
    /// Decode an event from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::UnrecognizedEvent`] when the value matches
    /// neither layout.
    pub fn from_value(value: serde_json::Value) -> Result<Self, InvocationError> {
        serde_json::from_value(value).map_err(InvocationError::UnrecognizedEvent)
    }

    /// Collapse either layout into a [`GatewayRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when a base64-flagged body cannot be
    /// decoded into UTF-8 text.
    pub fn into_request(self) -> Result<GatewayRequest, InvocationError> {
        let (method, path, body, encoded) = match self {
            Self::Rest(event) => (
                event.http_method,
                event.path,
                event.body,
                event.is_base64_encoded,
            ),
            Self::Http(event) => {
                let path = event
                    .request_context
                    .http
                    .path
                    .or(event.raw_path)
                    .unwrap_or_default();
                (
                    event.request_context.http.method,
                    path,
                    event.body,
                    event.is_base64_encoded,
                )
            }
        };

        let body = match body {
            Some(raw) if encoded => Some(String::from_utf8(STANDARD.decode(raw)?)?),
            other => other,
        };

        Ok(GatewayRequest { method, path, body })
    }
}
