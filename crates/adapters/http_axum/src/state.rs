//! Shared application state for axum handlers.

use std::sync::Arc;

use itemshim_adapter_gateway::Gateway;
use itemshim_app::faults::{FaultInjector, NoFaults};
use itemshim_app::ports::ItemStore;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the store and injector types do not
/// need to be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<S, F = NoFaults> {
    pub gateway: Arc<Gateway<S, F>>,
}

impl<S, F> Clone for AppState<S, F> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<S, F> AppState<S, F>
where
    S: ItemStore + Send + Sync + 'static,
    F: FaultInjector + Send + Sync + 'static,
{
    /// Create a new application state from a gateway.
    pub fn new(gateway: Gateway<S, F>) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}
