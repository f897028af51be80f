//! Checkout: form validation, order summary and the chat deep link.
//!
//! Submitting an order never talks to a server. A valid form plus the current
//! cart becomes an [`OrderSummary`], rendered as a chat message and embedded
//! in a `https://<chat-domain>/<destination>?text=...` link that the
//! presentation layer opens.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tech_bazaar_core::{PhoneError, PhoneNumber, Price, ServiceMode};
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

use crate::cart::{Cart, CartLine};
use crate::config::{CheckoutConfig, DeliveryLocation};

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutField {
    PhoneNumber,
    PickupName,
    PickupPhone,
    DeliveryLocation,
}

impl std::fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhoneNumber => write!(f, "phone number"),
            Self::PickupName => write!(f, "pickup name"),
            Self::PickupPhone => write!(f, "pickup phone"),
            Self::DeliveryLocation => write!(f, "delivery location"),
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),
    #[error("required")]
    Required,
    #[error("select a delivery location")]
    LocationNotSelected,
}

/// Every rule the form violates, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<CheckoutField, FieldError>);

impl ValidationErrors {
    /// The error for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: CheckoutField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Returns true if `field` failed.
    #[must_use]
    pub fn contains(&self, field: CheckoutField) -> bool {
        self.0.contains_key(&field)
    }

    /// Failed fields with their errors, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &FieldError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: CheckoutField, err: FieldError) {
        self.0.insert(field, err);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, err) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {err}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid checkout form: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Could not build chat link: {0}")]
    Link(#[from] url::ParseError),
}

/// What the customer typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub service_mode: ServiceMode,
    pub country_code: String,
    pub phone_number: String,
    pub pickup_name: String,
    pub pickup_phone: String,
    /// Name of the chosen delivery location.
    pub delivery_location: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// An empty form with the configured default dialing code.
    #[must_use]
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            country_code: config.default_country_code.clone(),
            ..Self::default()
        }
    }

    /// Check every rule and report all failures together.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` holding one entry per failed field.
    pub fn validate(&self, config: &CheckoutConfig) -> Result<ValidatedForm, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let phone = PhoneNumber::parse(&self.phone_number)
            .map_err(|e| errors.insert(CheckoutField::PhoneNumber, e.into()))
            .ok();

        let pickup_name = self.pickup_name.trim();
        if pickup_name.is_empty() {
            errors.insert(CheckoutField::PickupName, FieldError::Required);
        }

        let pickup_phone = PhoneNumber::parse(&self.pickup_phone)
            .map_err(|e| errors.insert(CheckoutField::PickupPhone, e.into()))
            .ok();

        let location = match self.service_mode {
            ServiceMode::Delivery => {
                let found = self
                    .delivery_location
                    .as_deref()
                    .and_then(|name| config.location(name));
                if found.is_none() {
                    errors.insert(CheckoutField::DeliveryLocation, FieldError::LocationNotSelected);
                }
                found.cloned()
            }
            ServiceMode::Pickup => None,
        };

        match (phone, pickup_phone) {
            (Some(phone), Some(pickup_phone)) if errors.is_empty() => Ok(ValidatedForm {
                service_mode: self.service_mode,
                country_code: self.country_code.clone(),
                phone,
                pickup_name: pickup_name.to_string(),
                pickup_phone,
                location,
                notes: self
                    .notes
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .map(ToString::to_string),
            }),
            _ => Err(errors),
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub service_mode: ServiceMode,
    pub country_code: String,
    pub phone: PhoneNumber,
    pub pickup_name: String,
    pub pickup_phone: PhoneNumber,
    /// Present only for delivery orders.
    pub location: Option<DeliveryLocation>,
    pub notes: Option<String>,
}

/// A form plus the cart contents at the moment of checkout.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub form: CheckoutForm,
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
}

impl OrderRequest {
    /// Snapshot `cart` for checkout with `form`.
    #[must_use]
    pub fn new(form: CheckoutForm, cart: &Cart) -> Self {
        Self {
            form,
            lines: cart.lines().to_vec(),
            subtotal: cart.total_price(),
        }
    }

    /// Fee for the selected location; zero for pickup or no selection.
    #[must_use]
    pub fn delivery_fee(&self, config: &CheckoutConfig) -> Price {
        match self.form.service_mode {
            ServiceMode::Delivery => self
                .form
                .delivery_location
                .as_deref()
                .and_then(|name| config.location(name))
                .map_or_else(|| Price::zero(self.subtotal.currency_code), |loc| loc.fee),
            ServiceMode::Pickup => Price::zero(self.subtotal.currency_code),
        }
    }

    /// Subtotal plus delivery fee.
    #[must_use]
    pub fn total(&self, config: &CheckoutConfig) -> Price {
        Price::new(
            self.subtotal.amount + self.delivery_fee(config).amount,
            self.subtotal.currency_code,
        )
    }

    /// Validate the form and build the order summary.
    ///
    /// # Errors
    ///
    /// Returns every violated rule if the form is invalid.
    pub fn summarize(
        &self,
        config: &CheckoutConfig,
        placed_at: DateTime<Utc>,
    ) -> Result<OrderSummary, ValidationErrors> {
        let form = self.form.validate(config)?;
        let currency = self.subtotal.currency_code;
        let delivery_fee = form
            .location
            .as_ref()
            .map_or_else(|| Price::zero(currency), |loc| loc.fee);

        Ok(OrderSummary {
            placed_at,
            service_mode: form.service_mode,
            country_code: form.country_code,
            phone: form.phone,
            pickup_name: form.pickup_name,
            pickup_phone: form.pickup_phone,
            location: form.location,
            items: self.lines.iter().map(SummaryLine::from).collect(),
            subtotal: self.subtotal,
            delivery_fee,
            total: Price::new(self.subtotal.amount + delivery_fee.amount, currency),
            notes: form.notes,
        })
    }
}

/// One item line of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

impl From<&CartLine> for SummaryLine {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            unit_price: line.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// A validated order, ready to render and hand off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub placed_at: DateTime<Utc>,
    pub service_mode: ServiceMode,
    pub country_code: String,
    pub phone: PhoneNumber,
    pub pickup_name: String,
    pub pickup_phone: PhoneNumber,
    pub location: Option<DeliveryLocation>,
    pub items: Vec<SummaryLine>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub notes: Option<String>,
}

impl OrderSummary {
    /// Render the chat message for this order.
    #[must_use]
    pub fn render(&self, config: &CheckoutConfig) -> String {
        let mut msg = String::new();
        let delivery = self.service_mode == ServiceMode::Delivery;

        // Writing to a String cannot fail
        let _ = writeln!(msg, "*NEW ORDER - {}*", config.store_name);
        let _ = writeln!(msg);
        let _ = writeln!(msg, "*Date:* {}", self.placed_at.format("%d/%m/%Y %H:%M:%S"));
        let _ = writeln!(msg, "*Service:* {}", self.service_mode.label());
        let _ = writeln!(msg);

        let _ = writeln!(msg, "*CUSTOMER*");
        let _ = writeln!(msg, "*Chat number:* {} {}", self.country_code, self.phone);
        let _ = writeln!(msg, "*Picked up by:* {}", self.pickup_name);
        let _ = writeln!(msg, "*Contact phone:* {}", self.pickup_phone);
        let _ = writeln!(msg);

        if delivery {
            let _ = writeln!(msg, "*DELIVERY*");
            if let Some(loc) = &self.location {
                let _ = writeln!(msg, "*Location:* {} ({})", loc.name, loc.zone);
            }
            let _ = writeln!(msg, "*Delivery fee:* {}", self.delivery_fee);
            let _ = writeln!(msg);
        }

        let _ = writeln!(msg, "*ITEMS*");
        for (index, item) in self.items.iter().enumerate() {
            let _ = writeln!(msg, "{}. *{}*", index + 1, item.name);
            let _ = writeln!(msg, "   Price: {}", item.unit_price);
            let _ = writeln!(msg, "   Quantity: {}", item.quantity);
            let _ = writeln!(msg, "   Subtotal: {}", item.line_total);
            let _ = writeln!(msg);
        }

        let _ = writeln!(msg, "*PAYMENT SUMMARY*");
        let _ = writeln!(msg, "*Items subtotal:* {}", self.subtotal);
        if delivery {
            let _ = writeln!(msg, "*Delivery fee:* {}", self.delivery_fee);
        }
        let _ = writeln!(msg, "*TOTAL:* {}", self.total);
        let _ = writeln!(msg);

        if let Some(notes) = &self.notes {
            let _ = writeln!(msg, "*NOTES*");
            let _ = writeln!(msg, "{notes}");
            let _ = writeln!(msg);
        }

        let _ = writeln!(msg, "*Reply to this message to confirm your order*");
        let _ = writeln!(msg, "*Estimated time:* {}", config.estimated_wait);
        msg.push_str("*Thank you for shopping with us!*");
        msg
    }

    /// Link that opens the chat application with the message pre-filled.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the configured domain does not form a valid URL.
    pub fn deep_link(&self, config: &CheckoutConfig) -> Result<Url, url::ParseError> {
        chat_link(config, &self.render(config))
    }
}

/// Build `https://<chat-domain>/<destination>?text=<message>`.
///
/// The message is percent-encoded like `encodeURIComponent`: only
/// `A-Z a-z 0-9 - _ . ~` are left as-is, so spaces become `%20`.
///
/// # Errors
///
/// Returns `url::ParseError` if the configured domain does not form a valid URL.
pub fn chat_link(config: &CheckoutConfig, message: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "https://{}/{}?text={}",
        config.chat_domain,
        config.destination,
        urlencoding::encode(message)
    ))
}

/// A submitted order: its summary, the rendered message and the link to open.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub summary: OrderSummary,
    pub message: String,
    pub link: Url,
}

/// Validate `form` against the current `cart` and build the hand-off link.
///
/// The cart is left untouched.
///
/// # Errors
///
/// Returns `CheckoutError::Validation` with every failed field, or
/// `CheckoutError::Link` if the link cannot be built.
#[instrument(skip_all, fields(mode = %form.service_mode, lines = cart.len()))]
pub fn submit(
    form: CheckoutForm,
    cart: &Cart,
    config: &CheckoutConfig,
    placed_at: DateTime<Utc>,
) -> Result<CheckoutOutcome, CheckoutError> {
    let request = OrderRequest::new(form, cart);
    let summary = request.summarize(config, placed_at).inspect_err(|errors| {
        warn!(failed_fields = errors.len(), "Checkout form rejected");
    })?;

    let message = summary.render(config);
    let link = chat_link(config, &message)?;
    info!(total = %summary.total, "Order ready for hand-off");

    Ok(CheckoutOutcome {
        summary,
        message,
        link,
    })
}
