//! Integration tests for Tech Bazaar.
//!
//! Cross-module flows live in `tests/`; this library only holds the
//! fixtures they share.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tech-bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_filtering` - Listing through the session view state
//! - `cart_session` - Cart behavior driven through the command bus
//! - `notification_flow` - Feed inserts and the decoupled view signals
//! - `checkout_link` - Order validation, totals and the chat deep link
//! - `timed_session` - Session and timers together on a paused clock

use tech_bazaar_core::{Category, CurrencyCode, Price, ProductId, ServiceMode};
use tech_bazaar_storefront::catalog::Product;
use tech_bazaar_storefront::checkout::CheckoutForm;
use tech_bazaar_storefront::config::StorefrontConfig;
use tech_bazaar_storefront::session::Session;

/// A session over the seeded catalog with default configuration.
#[must_use]
pub fn session() -> Session {
    Session::new(StorefrontConfig::default())
}

/// A product outside the seeded catalog.
#[must_use]
pub fn product(id: &str, name: &str, price: i64, category: Category) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        price: Price::whole(price, CurrencyCode::USD),
        original_price: None,
        discount: None,
        image: format!("https://img.example/{id}.jpg"),
        category,
        brand: None,
        model: None,
        color: None,
        description: None,
        is_popular: false,
        is_sale: false,
        is_new: true,
        in_stock: true,
    }
}

/// A form that passes validation for `mode`.
#[must_use]
pub fn valid_form(session: &Session, mode: ServiceMode) -> CheckoutForm {
    CheckoutForm {
        service_mode: mode,
        phone_number: "55501000".to_string(),
        pickup_name: "Ana Pérez".to_string(),
        pickup_phone: "5550 1001".to_string(),
        delivery_location: Some("Reparto Sueño".to_string()),
        notes: None,
        ..session.checkout_form()
    }
}
