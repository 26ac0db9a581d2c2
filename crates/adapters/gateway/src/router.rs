//! Route resolution and the [`Gateway`] entry point.

use std::future::Future;

use itemshim_app::faults::{FaultInjector, FaultOutcome, NoFaults, Operation};
use itemshim_app::ports::ItemStore;
use itemshim_app::services::item_service::ItemService;

use crate::error::{ApiError, InvocationError};
use crate::event::{GatewayRequest, InvocationEvent};
use crate::handlers;
use crate::response::{self, GatewayResponse};

/// The only path the gateway serves.
pub const ITEMS_PATH: &str = "/items";

/// A matched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListItems,
    CreateItem,
}

impl Route {
    /// Exact, case-sensitive match on method and path.
    #[must_use]
    pub fn resolve(method: &str, path: &str) -> Option<Self> {
        match (method, path) {
            ("GET", ITEMS_PATH) => Some(Self::ListItems),
            ("POST", ITEMS_PATH) => Some(Self::CreateItem),
            _ => None,
        }
    }

    fn operation(self) -> Operation {
        match self {
            Self::ListItems => Operation::ListItems,
            Self::CreateItem => Operation::CreateItem,
        }
    }
}

/// Turns invocation events into responses.
pub struct Gateway<S, F = NoFaults> {
    items: ItemService<S>,
    faults: F,
}

impl<S> Gateway<S, NoFaults>
where
    S: ItemStore + Send + Sync,
{
    /// Gateway without fault injection.
    pub fn new(items: ItemService<S>) -> Self {
        Self::with_faults(items, NoFaults)
    }
}

impl<S, F> Gateway<S, F>
where
    S: ItemStore + Send + Sync,
    F: FaultInjector + Send + Sync,
{
    /// Gateway consulting `faults` before every routed operation.
    pub fn with_faults(items: ItemService<S>, faults: F) -> Self {
        Self { items, faults }
    }

    /// Handle a raw JSON event.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] for unrecovered failures: an event that
    /// cannot be normalized, or an injected server error.
    pub async fn handle(&self, event: serde_json::Value) -> Result<GatewayResponse, InvocationError> {
        let request = InvocationEvent::from_value(event)?.into_request()?;
        self.dispatch(request).await
    }

    /// Route a normalized request.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::Simulated`] when the fault injector picks a
    /// server error.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn dispatch(&self, request: GatewayRequest) -> Result<GatewayResponse, InvocationError> {
        let Some(route) = Route::resolve(&request.method, &request.path) else {
            tracing::debug!("no route matched");
            return Ok(response::not_found(&request.path));
        };

        let body = request.body.as_deref();
        match route {
            Route::ListItems => {
                self.guarded(route, handlers::list_items(&self.items))
                    .await
            }
            Route::CreateItem => {
                self.guarded(route, handlers::create_item(&self.items, body))
                    .await
            }
        }
    }

    async fn guarded<H>(&self, route: Route, handler: H) -> Result<GatewayResponse, InvocationError>
    where
        H: Future<Output = Result<GatewayResponse, ApiError>>,
    {
        let operation = route.operation();
        let plan = self.faults.plan(operation);
        plan.wait().await;

        match plan.outcome {
            FaultOutcome::Proceed => Ok(handler.await.unwrap_or_else(ApiError::into_response)),
            FaultOutcome::ClientError { status } => {
                tracing::warn!(%operation, status, "injecting simulated client error");
                Ok(response::simulated_client_error(status))
            }
            FaultOutcome::ServerError => {
                tracing::warn!(%operation, "injecting simulated server error");
                Err(InvocationError::Simulated { operation })
            }
        }
    }
}
