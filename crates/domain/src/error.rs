//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ItemShimError`] via `#[from]` at the port boundary.

/// Root error type crossing the port boundary between adapters and the
/// application layer.
#[derive(Debug, thiserror::Error)]
pub enum ItemShimError {
    /// The input violates a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be read as a create payload.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The backing store failed. The message of the boxed error is
    /// surfaced verbatim to callers.
    #[error("{0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `id` or `name` (or both) is absent or empty.
    #[error("Missing required fields: id and name are required")]
    MissingRequiredFields,
}

/// The create body is missing or is not a JSON object of the expected shape.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PayloadError(#[from] serde_json::Error);
