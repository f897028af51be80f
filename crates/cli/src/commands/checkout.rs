//! Order checkout.
//!
//! Fills a session cart from `--item` arguments, validates the form and
//! prints the order message followed by the chat link. Nothing is sent; the
//! link is meant to be opened by the customer.
//!
//! # Usage
//!
//! ```bash
//! # Two AirPods and a Dyson, delivered
//! tb-cli checkout --item 4x2 --item 7 --phone 55501000 \
//!     --pickup-name "Ana Pérez" --pickup-phone 55501001 --location "Reparto Sueño"
//!
//! # Store pickup, summary as JSON
//! tb-cli checkout --item 3 --mode pickup --phone 55501000 \
//!     --pickup-name Ana --pickup-phone 55501001 --json
//! ```

use chrono::Utc;
use tech_bazaar_core::{ProductId, ServiceMode};
use tech_bazaar_storefront::AppError;
use tech_bazaar_storefront::bus::Command;
use tech_bazaar_storefront::checkout::CheckoutError;
use tech_bazaar_storefront::config::StorefrontConfig;
use tech_bazaar_storefront::session::Session;

use super::CommandError;

/// Checkout form values from the command line.
#[derive(Debug)]
pub struct OrderArgs {
    pub items: Vec<String>,
    pub phone: String,
    pub country_code: Option<String>,
    pub pickup_name: String,
    pub pickup_phone: String,
    pub mode: ServiceMode,
    pub location: Option<String>,
    pub note: Option<String>,
}

/// Build the cart, validate the order and print the hand-off.
///
/// # Errors
///
/// Returns an error if an item is malformed or unknown, or if the form fails
/// validation. Every failed field is logged before returning.
pub fn run(config: StorefrontConfig, order: OrderArgs, json: bool) -> Result<(), CommandError> {
    let mut session = Session::new(config);

    for item in &order.items {
        let (id, quantity) = parse_item(item)?;
        session
            .handle(Command::AddToCart(id.clone()))
            .map_err(AppError::from)?;
        // A repeated item adds to the quantity already in the cart
        let in_cart = session.cart().get(&id).map_or(1, |line| line.quantity);
        let quantity = i64::from(in_cart) - 1 + i64::from(quantity);
        session
            .handle(Command::UpdateQuantity(id, quantity))
            .map_err(AppError::from)?;
    }

    let mut form = session.checkout_form();
    if let Some(code) = order.country_code {
        form.country_code = code;
    }
    form.service_mode = order.mode;
    form.phone_number = order.phone;
    form.pickup_name = order.pickup_name;
    form.pickup_phone = order.pickup_phone;
    form.delivery_location = order.location;
    form.notes = order.note;

    let outcome = match session.checkout(form, Utc::now()) {
        Ok(outcome) => outcome,
        Err(CheckoutError::Validation(errors)) => {
            for (field, err) in errors.iter() {
                tracing::error!(%field, "{err}");
            }
            return Err(AppError::from(CheckoutError::Validation(errors)).into());
        }
        Err(e) => return Err(AppError::from(e).into()),
    };

    if json {
        let out = serde_json::to_string_pretty(&outcome.summary)?;
        #[allow(clippy::print_stdout)]
        {
            println!("{out}");
        }
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        println!("{}", outcome.message);
        println!();
        println!("{}", outcome.link);
    }
    Ok(())
}

/// Parse `ID` or `IDxQTY`.
///
/// The suffix after the last `x` is only taken as a quantity when it is a
/// positive number, so IDs containing an `x` still work on their own.
fn parse_item(item: &str) -> Result<(ProductId, u32), CommandError> {
    let item = item.trim();
    if item.is_empty() {
        return Err(AppError::BadRequest("empty item".to_string()).into());
    }

    if let Some((id, qty)) = item.rsplit_once('x')
        && let Ok(qty) = qty.parse::<u32>()
    {
        if id.is_empty() || qty == 0 {
            return Err(AppError::BadRequest(format!(
                "item must be ID or IDxQTY with QTY >= 1: {item}"
            ))
            .into());
        }
        return Ok((ProductId::from(id), qty));
    }

    Ok((ProductId::from(item), 1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("4").unwrap(), (ProductId::from("4"), 1));
        assert_eq!(parse_item("4x3").unwrap(), (ProductId::from("4"), 3));
        assert_eq!(
            parse_item("xbox-series-x").unwrap(),
            (ProductId::from("xbox-series-x"), 1)
        );
        assert_eq!(
            parse_item("xbox-series-xx2").unwrap(),
            (ProductId::from("xbox-series-x"), 2)
        );
    }

    #[test]
    fn test_parse_item_rejects_bad_input() {
        assert!(parse_item("").is_err());
        assert!(parse_item("4x0").is_err());
        let err = parse_item("x2").unwrap_err();
        assert!(matches!(err, CommandError::App(AppError::BadRequest(_))));
        assert_eq!(
            err.to_string(),
            "Bad request: item must be ID or IDxQTY with QTY >= 1: x2"
        );
    }
}
