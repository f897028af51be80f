//! Storefront configuration.
//!
//! Every setting has a fixed default; [`StorefrontConfig::default`] is the
//! configuration the store runs with. [`StorefrontConfig::from_env`] layers
//! optional environment overrides on top.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TECH_BAZAAR_CHAT_DOMAIN` - Chat application domain (default: wa.me)
//! - `TECH_BAZAAR_CHAT_DESTINATION` - Store contact that receives orders (default: 5353123456)
//! - `TECH_BAZAAR_DEFAULT_COUNTRY_CODE` - Preselected dialing code (default: +53)
//! - `TECH_BAZAAR_RATE_REFRESH_SECS` - Exchange rate refresh period (default: 30)
//! - `TECH_BAZAAR_CAROUSEL_SECS` - Promo carousel rotation period (default: 4)

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tech_bazaar_core::{CurrencyCode, PhoneNumber, Price};
use thiserror::Error;

const ENV_CHAT_DOMAIN: &str = "TECH_BAZAAR_CHAT_DOMAIN";
const ENV_CHAT_DESTINATION: &str = "TECH_BAZAAR_CHAT_DESTINATION";
const ENV_DEFAULT_COUNTRY_CODE: &str = "TECH_BAZAAR_DEFAULT_COUNTRY_CODE";
const ENV_RATE_REFRESH_SECS: &str = "TECH_BAZAAR_RATE_REFRESH_SECS";
const ENV_CAROUSEL_SECS: &str = "TECH_BAZAAR_CAROUSEL_SECS";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    /// Currency every catalog price is quoted in
    pub currency: CurrencyCode,
    /// Order hand-off settings
    pub checkout: CheckoutConfig,
    /// Background timer periods
    pub timers: TimerConfig,
    /// Simulated exchange rate parameters
    pub market: MarketConfig,
}

/// Settings for the checkout form and the outbound chat link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Store name printed in the order header
    pub store_name: String,
    /// Domain of the chat application (e.g., wa.me)
    pub chat_domain: String,
    /// Contact handle that receives orders, digits only
    pub destination: String,
    /// Dialing code preselected in the form
    pub default_country_code: String,
    /// Dialing codes offered in the form
    pub country_codes: Vec<CountryCode>,
    /// Locations served by delivery, each with a flat fee
    pub delivery_locations: Vec<DeliveryLocation>,
    /// Estimated fulfillment time quoted to the customer
    pub estimated_wait: String,
}

/// A dialing code offered in the contact phone selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCode {
    /// Dialing prefix including the plus sign (e.g., +53)
    pub code: String,
    /// Country name shown next to the code
    pub country: String,
}

/// A delivery destination with its flat fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    /// Neighbourhood name, unique within the list
    pub name: String,
    /// Zone the neighbourhood belongs to
    pub zone: String,
    /// Flat delivery fee
    pub fee: Price,
}

/// Periods of the session's background timers.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    /// How often exchange rates are refreshed
    pub rate_refresh_interval: Duration,
    /// Simulated latency of one rate refresh
    pub rate_refresh_latency: Duration,
    /// How often the promo carousel advances
    pub carousel_interval: Duration,
    /// Delays (from session start) at which incoming products are announced
    pub arrival_delays: Vec<Duration>,
}

/// Parameters of the simulated exchange rate feed.
#[derive(Debug, Clone, Copy)]
pub struct MarketConfig {
    /// Base USD rate before variation
    pub base_usd: f64,
    /// Base EUR rate before variation
    pub base_eur: f64,
    /// Maximum absolute variation applied to both rates
    pub max_variation: f64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override is invalid or the resulting
    /// configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults plus overrides returned by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override is invalid or the resulting
    /// configuration fails validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(domain) = lookup(ENV_CHAT_DOMAIN) {
            config.checkout.chat_domain = domain;
        }
        if let Some(destination) = lookup(ENV_CHAT_DESTINATION) {
            config.checkout.destination = PhoneNumber::parse(&destination)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar(ENV_CHAT_DESTINATION.to_string(), e.to_string())
                })?
                .into_inner();
        }
        if let Some(code) = lookup(ENV_DEFAULT_COUNTRY_CODE) {
            config.checkout.default_country_code = code;
        }
        if let Some(secs) = lookup(ENV_RATE_REFRESH_SECS) {
            config.timers.rate_refresh_interval = parse_secs(ENV_RATE_REFRESH_SECS, &secs)?;
        }
        if let Some(secs) = lookup(ENV_CAROUSEL_SECS) {
            config.timers.carousel_interval = parse_secs(ENV_CAROUSEL_SECS, &secs)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the rest of the storefront relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checkout.validate(self.currency)?;
        self.timers.validate()
    }
}

impl CheckoutConfig {
    /// Look up a delivery location by its exact name.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<&DeliveryLocation> {
        self.delivery_locations.iter().find(|loc| loc.name == name)
    }

    /// Returns true if `code` is one of the offered dialing codes.
    #[must_use]
    pub fn has_country_code(&self, code: &str) -> bool {
        self.country_codes.iter().any(|c| c.code == code)
    }

    fn validate(&self, currency: CurrencyCode) -> Result<(), ConfigError> {
        if self.chat_domain.is_empty() || self.chat_domain.contains(['/', '?', '#']) {
            return Err(ConfigError::Invalid(format!(
                "chat domain must be a bare host (got {:?})",
                self.chat_domain
            )));
        }

        let destination = PhoneNumber::parse(&self.destination).map_err(|e| {
            ConfigError::Invalid(format!("chat destination {:?}: {e}", self.destination))
        })?;
        // The destination goes into the link path verbatim
        if destination.as_str() != self.destination {
            return Err(ConfigError::Invalid(format!(
                "chat destination {:?} must be digits only",
                self.destination
            )));
        }

        if !self.has_country_code(&self.default_country_code) {
            return Err(ConfigError::Invalid(format!(
                "default country code {} is not offered",
                self.default_country_code
            )));
        }

        if let Some(loc) = self
            .delivery_locations
            .iter()
            .find(|loc| loc.fee.currency_code != currency)
        {
            return Err(ConfigError::Invalid(format!(
                "delivery fee for {} is not in {}",
                loc.name,
                currency.code()
            )));
        }

        Ok(())
    }
}

impl TimerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_refresh_interval.is_zero() || self.carousel_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "timer periods must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        let currency = CurrencyCode::default();
        let country = |code: &str, country: &str| CountryCode {
            code: code.to_string(),
            country: country.to_string(),
        };
        let location = |name: &str, fee: i64, zone: &str| DeliveryLocation {
            name: name.to_string(),
            zone: zone.to_string(),
            fee: Price::whole(fee, currency),
        };

        Self {
            store_name: "TECH BAZAAR".to_string(),
            chat_domain: "wa.me".to_string(),
            destination: "5353123456".to_string(),
            default_country_code: "+53".to_string(),
            country_codes: vec![
                country("+1", "United States / Canada"),
                country("+34", "Spain"),
                country("+52", "Mexico"),
                country("+54", "Argentina"),
                country("+55", "Brazil"),
                country("+56", "Chile"),
                country("+57", "Colombia"),
                country("+58", "Venezuela"),
                country("+53", "Cuba"),
                country("+506", "Costa Rica"),
                country("+507", "Panama"),
            ],
            delivery_locations: vec![
                location("Centro Histórico", 50, "Zona Centro"),
                location("Reparto Sueño", 75, "Zona Norte"),
                location("Vista Alegre", 80, "Zona Norte"),
                location("Los Olmos", 60, "Zona Este"),
                location("Micro 9", 90, "Zona Norte"),
                location("San Pedrito", 70, "Zona Sur"),
                location("Altamira", 85, "Zona Norte"),
                location("Escario", 65, "Zona Centro"),
                location("Chicharrones", 100, "Zona Oeste"),
                location("Flores", 55, "Zona Centro"),
            ],
            estimated_wait: "30-45 minutes".to_string(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            rate_refresh_interval: Duration::from_secs(30),
            rate_refresh_latency: Duration::from_secs(1),
            carousel_interval: Duration::from_secs(4),
            arrival_delays: vec![Duration::from_secs(20), Duration::from_secs(60)],
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_usd: 120.0,
            base_eur: 130.0,
            max_variation: 5.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a whole number of seconds from an environment value.
fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
