//! HTTP-shaped responses and their JSON bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use itemshim_domain::item::Item;

/// Body used when a body itself cannot be serialized.
const FALLBACK_BODY: &str = r#"{"success":false,"error":"Internal Server Error"}"#;

/// The response handed back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON document serialized as a string.
    pub body: String,
}

impl GatewayResponse {
    /// Build a JSON response with the standard headers.
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let (status_code, body) = match serde_json::to_string(body) {
            Ok(body) => (status_code, body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response body");
                (500, FALLBACK_BODY.to_string())
            }
        };
        Self {
            status_code,
            headers: default_headers(),
            body,
        }
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

/// `200` body for a list call.
#[derive(Debug, Serialize)]
pub struct ListBody<'a> {
    success: bool,
    data: &'a [Item],
    count: usize,
}

impl<'a> ListBody<'a> {
    #[must_use]
    pub fn new(data: &'a [Item]) -> Self {
        Self {
            success: true,
            data,
            count: data.len(),
        }
    }
}

/// `201` body for a create call.
#[derive(Debug, Serialize)]
pub struct CreatedBody<'a> {
    success: bool,
    data: &'a Item,
    message: &'static str,
}

impl<'a> CreatedBody<'a> {
    #[must_use]
    pub fn new(data: &'a Item) -> Self {
        Self {
            success: true,
            data,
            message: "Item created successfully",
        }
    }
}

/// Body of every recovered failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
}

impl<'a> ErrorBody<'a> {
    #[must_use]
    pub fn new(error: &'a str) -> Self {
        Self {
            success: false,
            error,
            message: None,
            path: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }
}

/// `404` for an unmatched method/path pair.
#[must_use]
pub fn not_found(path: &str) -> GatewayResponse {
    GatewayResponse::json(
        404,
        &ErrorBody::new("Not Found")
            .with_message("Route not found")
            .with_path(path),
    )
}

/// A client error produced by fault injection.
#[must_use]
pub fn simulated_client_error(status_code: u16) -> GatewayResponse {
    let label = match status_code {
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Client Error",
    };
    GatewayResponse::json(
        status_code,
        &ErrorBody::new(label).with_message("Simulated client error"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn should_serialize_with_gateway_field_names() {
        let response = GatewayResponse::json(200, &json!({ "success": true }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "headers": {
                    "Access-Control-Allow-Origin": "*",
                    "Content-Type": "application/json"
                },
                "body": "{\"success\":true}"
            })
        );
    }

    #[test]
    fn should_report_empty_list_with_zero_count() {
        let response = GatewayResponse::json(200, &ListBody::new(&[]));
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [], "count": 0 }));
    }

    #[test]
    fn should_include_path_in_not_found() {
        let response = not_found("/other");
        assert_eq!(response.status_code, 404);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Not Found",
                "message": "Route not found",
                "path": "/other"
            })
        );
    }

    #[test]
    fn should_label_simulated_client_errors() {
        let response = simulated_client_error(422);
        assert_eq!(response.status_code, 422);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "Unprocessable Entity");
        assert_eq!(body["success"], false);
    }
}
