//! Item — the single persisted record.

use serde::{Deserialize, Serialize};

use crate::error::{ItemShimError, ValidationError};
use crate::time::{self, Timestamp};

/// A catalogue item, keyed by a caller-supplied `id`.
///
/// Wire field names are camelCase (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "price")]
    pub price: f64,
    #[serde(with = "crate::time::iso8601")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso8601")]
    pub updated_at: Timestamp,
}

impl Item {
    /// Create a builder for constructing an [`Item`].
    #[must_use]
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ItemShimError::Validation`] when `id` or `name` is empty.
    pub fn validate(&self) -> Result<(), ItemShimError> {
        if self.id.is_empty() || self.name.is_empty() {
            return Err(ValidationError::MissingRequiredFields.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Item`].
#[derive(Debug, Default)]
pub struct ItemBuilder {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    created_at: Option<Timestamp>,
}

impl ItemBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Stamp both `createdAt` and `updatedAt` with `ts`.
    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`Item`].
    ///
    /// Missing `description` becomes `""`, missing `price` becomes `0`, and
    /// a missing creation time becomes [`time::now`].
    ///
    /// # Errors
    ///
    /// Returns [`ItemShimError::Validation`] if `id` or `name` is missing or empty.
    pub fn build(self) -> Result<Item, ItemShimError> {
        let stamp = self.created_at.unwrap_or_else(time::now);
        let item = Item {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            created_at: stamp,
            updated_at: stamp,
        };
        item.validate()?;
        Ok(item)
    }
}

/// Prices are JSON numbers: integral values are written without a fraction
/// (`0`, not `0.0`).
mod price {
    use serde::{Deserialize, Deserializer, Serializer};

    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    #[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() < MAX_EXACT {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        f64::deserialize(deserializer)
    }
}
