//! # itemshim-adapter-storage-dynamodb
//!
//! `DynamoDB` persistence adapter using
//! [aws-sdk-dynamodb](https://docs.rs/aws-sdk-dynamodb).
//!
//! ## Responsibilities
//! - Implement the [`ItemStore`](itemshim_app::ports::ItemStore) port
//! - Own the SDK client: built on first use, then shared read-only for the
//!   life of the process
//! - Map between domain items and attribute maps
//!
//! ## Dependency rule
//! Depends on `itemshim-app` (for port traits) and `itemshim-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod conversions;
pub mod error;
pub mod store;

pub use error::{DecodeError, StorageError};
pub use store::{DynamoItemStore, StoreConfig};
