//! # itemshimd — itemshim daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the `DynamoDB` store (client created lazily on first call)
//! - Construct the item service and gateway, injecting the fault strategy
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use itemshim_adapter_gateway::Gateway;
use itemshim_adapter_http_axum::state::AppState;
use itemshim_app::faults::{FaultInjector, NoFaults, RandomFaults};
use itemshim_app::services::item_service::ItemService;

use crate::config::{Config, InstrumentationConfig};

type SharedFaults = Box<dyn FaultInjector + Send + Sync>;

fn fault_injector(config: &InstrumentationConfig) -> SharedFaults {
    if !config.enabled {
        return Box::new(NoFaults);
    }
    tracing::warn!(seed = ?config.seed, "fault injection enabled");
    match config.seed {
        Some(seed) => Box::new(RandomFaults::seeded(seed)),
        None => Box::new(RandomFaults::new()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Store
    let store_config = config.store_config();
    tracing::info!(
        table = %store_config.table_name,
        region = %store_config.region,
        "using DynamoDB table"
    );
    let store = store_config.build();

    // Services
    let item_service = ItemService::new(store);
    let gateway = Gateway::with_faults(item_service, fault_injector(&config.instrumentation));

    // HTTP
    let app = itemshim_adapter_http_axum::router::build(AppState::new(gateway));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "itemshimd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("itemshimd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
