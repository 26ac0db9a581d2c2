//! Storage port — the key/value collection holding items.

use std::future::Future;

use itemshim_domain::error::ItemShimError;
use itemshim_domain::item::Item;

/// Collection service backing all item reads and writes.
pub trait ItemStore {
    /// Read at most `limit` items, in whatever order the store returns them.
    fn scan(&self, limit: usize) -> impl Future<Output = Result<Vec<Item>, ItemShimError>> + Send;

    /// Write `item` keyed by its `id`, replacing any existing record.
    fn put(&self, item: &Item) -> impl Future<Output = Result<(), ItemShimError>> + Send;
}

impl<T: ItemStore + Send + Sync> ItemStore for std::sync::Arc<T> {
    fn scan(&self, limit: usize) -> impl Future<Output = Result<Vec<Item>, ItemShimError>> + Send {
        (**self).scan(limit)
    }

    fn put(&self, item: &Item) -> impl Future<Output = Result<(), ItemShimError>> + Send {
        (**self).put(item)
    }
}
