//! Nexus Portal Core - Shared types library.
//!
//! This crate provides common types used across all Nexus Portal components:
//! - `admin` - The portal web binary (dashboard, catalog, admin panel)
//! - `cli` - Command-line tools for the catalog and description generator
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no global state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
