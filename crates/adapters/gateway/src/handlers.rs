//! Item handlers — one per route.

use itemshim_app::ports::ItemStore;
use itemshim_app::services::item_service::ItemService;
use itemshim_domain::error::ItemShimError;
use itemshim_domain::payload::CreateItemPayload;

use crate::error::ApiError;
use crate::response::{CreatedBody, GatewayResponse, ListBody};

/// `GET /items`
///
/// # Errors
///
/// Returns [`ApiError`] when the store read fails.
pub async fn list_items<S>(items: &ItemService<S>) -> Result<GatewayResponse, ApiError>
where
    S: ItemStore + Send + Sync,
{
    let listed = items
        .list_items()
        .await
        .map_err(|err| ApiError::new("Failed to retrieve items", err))?;
    Ok(GatewayResponse::json(200, &ListBody::new(&listed)))
}

/// `POST /items`
///
/// An unreadable body is reported like a store failure (500), not as a 400.
///
/// # Errors
///
/// Returns [`ApiError`] when the body cannot be parsed, required fields are
/// missing, or the store write fails.
pub async fn create_item<S>(
    items: &ItemService<S>,
    body: Option<&str>,
) -> Result<GatewayResponse, ApiError>
where
    S: ItemStore + Send + Sync,
{
    let fail = |err: ItemShimError| ApiError::new("Failed to create item", err);
    let payload = CreateItemPayload::parse(body).map_err(|err| fail(err.into()))?;
    let created = items.create_item(payload).await.map_err(fail)?;
    Ok(GatewayResponse::json(201, &CreatedBody::new(&created)))
}
