//! # itemshim-domain
//!
//! Pure domain model for the itemshim request handler.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **Item** record (the only persisted entity)
//! - Define the **create payload** and the validation that turns it into an item
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod item;
pub mod payload;
