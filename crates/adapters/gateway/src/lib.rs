//! # itemshim-adapter-gateway
//!
//! Driving adapter for HTTP-triggered invocation events.
//!
//! ## Responsibilities
//! - Accept both gateway event layouts and normalize them into a single
//!   [`event::GatewayRequest`] (`method`, `path`, `body`)
//! - Route `GET /items` and `POST /items` to the item use-cases by exact
//!   match; everything else is a 404
//! - Shape every outcome into a [`response::GatewayResponse`]
//!   (`statusCode`, `headers`, JSON `body`)
//! - Apply the injected [`itemshim_app::faults::FaultInjector`] before each
//!   operation
//!
//! ## Failure classes
//! Recovered failures (validation, parse, store) become responses with
//! `success: false`. Unrecovered failures are returned as
//! [`error::InvocationError`] so the hosting runtime counts them as failed
//! executions.
//!
//! ## Dependency rule
//! Depends on `itemshim-app` and `itemshim-domain`. Knows nothing about the
//! process that hosts it.

pub mod error;
pub mod event;
pub mod handlers;
pub mod response;
pub mod router;

pub use error::InvocationError;
pub use event::{GatewayRequest, InvocationEvent};
pub use response::GatewayResponse;
pub use router::Gateway;
