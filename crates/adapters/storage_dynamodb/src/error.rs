//! Storage-specific error types wrapping SDK errors.

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use itemshim_domain::error::ItemShimError;

/// Errors originating from the `DynamoDB` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The `Scan` request failed.
    #[error("{}", DisplayErrorContext(.0))]
    Scan(#[from] SdkError<ScanError>),

    /// The `PutItem` request failed.
    #[error("{}", DisplayErrorContext(.0))]
    Put(#[from] SdkError<PutItemError>),
}

impl From<StorageError> for ItemShimError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// A stored attribute map does not describe an item. Such records are
/// skipped when a page is scanned.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("record is missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("attribute `{0}` has an unexpected type")]
    WrongType(&'static str),

    #[error("attribute `{attribute}` is not a number")]
    InvalidNumber {
        attribute: &'static str,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("attribute `{attribute}` is not a timestamp")]
    InvalidTimestamp {
        attribute: &'static str,
        #[source]
        source: chrono::ParseError,
    },
}
