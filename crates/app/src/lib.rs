//! # itemshim-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ItemStore` — bounded scan and unconditional put for items
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ItemService` — list items, create item
//! - Provide the **fault-injection strategy** used by the synthetic
//!   instrumentation variant, kept apart from the deterministic use-cases
//!
//! ## Dependency rule
//! Depends on `itemshim-domain` only (plus `tokio` for sleeping and `rand`
//! for fault selection). Never imports adapter crates.

pub mod faults;
pub mod ports;
pub mod services;
