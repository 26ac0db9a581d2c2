//! Create payload — the caller-supplied body of a create request.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ItemShimError, PayloadError};
use crate::item::Item;
use crate::time::Timestamp;

/// Fields accepted when creating an item. Every field is optional at the
/// parsing stage; `null` is treated the same as absent, and so are `false`
/// and `0` for `id` and `name`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateItemPayload {
    #[serde(default, deserialize_with = "falsy_as_absent")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_absent")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl CreateItemPayload {
    /// Parse a raw request body.
    ///
    /// A missing body is parsed as the empty string, so it fails the same
    /// way a malformed one does.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the body is not a JSON object with the
    /// expected field types.
    pub fn parse(body: Option<&str>) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(body.unwrap_or_default())?)
    }

    /// Validate and turn the payload into an [`Item`] stamped at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemShimError::Validation`] if `id` or `name` is missing
    /// or empty.
    pub fn into_item(self, now: Timestamp) -> Result<Item, ItemShimError> {
        let mut builder = Item::builder().created_at(now);
        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(price) = self.price {
            builder = builder.price(price);
        }
        builder.build()
    }
}

/// Falsy JSON values become `None`; other non-string values are rejected,
/// never coerced. An empty string is kept and fails validation later.
fn falsy_as_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64().is_some_and(|v| v.abs() < f64::EPSILON) => Ok(None),
        Value::String(value) => Ok(Some(value)),
        other => Err(de::Error::custom(format_args!(
            "invalid type: {other}, expected a string"
        ))),
    }
}
