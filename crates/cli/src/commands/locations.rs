//! Delivery location listing.

use tech_bazaar_storefront::config::StorefrontConfig;

/// Print every delivery location with its zone and fee.
#[allow(clippy::print_stdout)]
pub fn list(config: &StorefrontConfig) {
    for location in &config.checkout.delivery_locations {
        println!(
            "{:<24} {:<16} {:>5}",
            location.name,
            location.zone,
            location.fee.to_string()
        );
    }
}
