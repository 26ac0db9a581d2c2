//! Item service — use-cases for listing and creating items.

use itemshim_domain::error::ItemShimError;
use itemshim_domain::item::Item;
use itemshim_domain::payload::CreateItemPayload;
use itemshim_domain::time;

use crate::ports::ItemStore;

/// Maximum number of records returned by a single list call.
pub const LIST_PAGE_LIMIT: usize = 100;

/// Application service for the two item operations.
pub struct ItemService<S> {
    store: S,
}

impl<S: ItemStore> ItemService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read one bounded page of items.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ItemShimError> {
        let items = self.store.scan(LIST_PAGE_LIMIT).await?;
        tracing::debug!(count = items.len(), "listed items");
        Ok(items)
    }

    /// Validate the payload, stamp it, and write it to the store.
    ///
    /// No existence check is made: a repeated `id` replaces the earlier
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`ItemShimError::Validation`] if `id` or `name` is missing,
    /// in which case nothing is written, or a storage error from the store.
    #[tracing::instrument(skip(self, payload), fields(item_id = payload.id.as_deref().unwrap_or_default()))]
    pub async fn create_item(&self, payload: CreateItemPayload) -> Result<Item, ItemShimError> {
        let item = payload.into_item(time::now())?;
        self.store.put(&item).await?;
        Ok(item)
    }
}
