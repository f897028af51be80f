//! Core types for Tech Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod phone;
pub mod price;
pub mod service;

pub use category::{Category, CategoryParseError};
pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, Price};
pub use service::ServiceMode;
