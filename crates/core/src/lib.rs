//! Tech Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Tech Bazaar components:
//! - `storefront` - Catalog, cart, notification feed and checkout logic
//! - `cli` - Command-line driver for browsing and building order links
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no timers,
//! no runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, phone numbers,
//!   categories and service modes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
