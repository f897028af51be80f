//! Tech Bazaar storefront library.
//!
//! An in-memory storefront session: a seeded catalog with filtering and
//! search, a cart, a "new product" notification feed and a checkout that
//! turns the cart into a pre-filled chat message link. All state lives in a
//! [`Session`](session::Session) that applies [`Command`](bus::Command)s one
//! at a time; background [`Timers`](timers::Timers) feed it simulated
//! exchange rates, carousel rotation and product arrivals.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bus;
pub mod carousel;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod filter;
pub mod market;
pub mod notifications;
pub mod session;
pub mod timers;
pub mod view_state;

pub use error::AppError;
