//! Subcommand implementations.

use thiserror::Error;

pub mod catalog;
pub mod checkout;
pub mod demo;
pub mod locations;

/// Errors surfaced by a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storefront rejected the input.
    #[error(transparent)]
    App(#[from] tech_bazaar_storefront::AppError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session task panicked or was aborted.
    #[error("Session task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
