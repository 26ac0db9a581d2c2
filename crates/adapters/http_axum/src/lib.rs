//! # itemshim-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - `POST /invoke`: accept a raw invocation event (either gateway layout)
//!   and answer with the gateway response document, the way a function
//!   runtime would
//! - Any other request: normalize method, path and body directly and
//!   answer with the gateway response as a real HTTP response
//! - `GET /health`: liveness probe
//! - Report unrecovered failures as `502` with `errorType`/`errorMessage`
//!
//! ## Dependency rule
//! Depends on `itemshim-adapter-gateway` for routing and shaping and on
//! `itemshim-app` for port traits. Never leaks axum types inward.

pub mod error;
pub mod router;
pub mod state;
