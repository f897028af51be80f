//! Unified error handling.
//!
//! Each module has its own error enum; `AppError` wraps them so callers such
//! as the CLI can propagate any of them with `?`.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::filter::FilterError;
use crate::session::SessionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Listing input was not understood.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Order could not be prepared.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session rejected a command.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tech_bazaar_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("quantity must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be a number");

        let err = AppError::from(SessionError::UnknownProduct(ProductId::from("42")));
        assert_eq!(err.to_string(), "Session error: Unknown product: 42");
    }

    #[test]
    fn test_conversions() {
        let err: AppError = ConfigError::Invalid("no locations".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));

        let err: AppError = "Gadgets"
            .parse::<crate::filter::CategorySelector>()
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Filter(_)));
    }
}
