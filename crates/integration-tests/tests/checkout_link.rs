//! Integration tests for order validation, totals and the chat deep link.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use tech_bazaar_core::{Category, CurrencyCode, Price, ProductId, ServiceMode};
use tech_bazaar_integration_tests::{product, session, valid_form};
use tech_bazaar_storefront::bus::Command;
use tech_bazaar_storefront::checkout::{CheckoutError, CheckoutField};
use tech_bazaar_storefront::session::Session;

/// A session whose cart totals exactly 500.
fn session_with_500() -> Session {
    let mut s = session();
    s.handle(Command::ProductArrived(product("half", "Half Order", 250, Category::Gaming)))
        .unwrap();
    s.handle(Command::AddToCart(ProductId::from("half"))).unwrap();
    s.handle(Command::UpdateQuantity(ProductId::from("half"), 2))
        .unwrap();
    s
}

#[test]
fn test_delivery_total_is_subtotal_plus_fee() {
    let s = session_with_500();
    let outcome = s
        .checkout(valid_form(&s, ServiceMode::Delivery), Utc::now())
        .unwrap();

    assert_eq!(outcome.summary.subtotal, Price::whole(500, CurrencyCode::USD));
    assert_eq!(outcome.summary.delivery_fee, Price::whole(75, CurrencyCode::USD));
    assert_eq!(outcome.summary.total, Price::whole(575, CurrencyCode::USD));
}

#[test]
fn test_dashed_phone_fails_and_plain_digits_pass() {
    let s = session_with_500();

    let mut form = valid_form(&s, ServiceMode::Delivery);
    form.phone_number = "555-0100".to_string();
    let err = s.checkout(form.clone(), Utc::now()).unwrap_err();
    match err {
        CheckoutError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(CheckoutField::PhoneNumber));
        }
        other => panic!("unexpected error: {other}"),
    }

    form.phone_number = "55501000".to_string();
    assert!(s.checkout(form, Utc::now()).is_ok());
}

#[test]
fn test_every_violation_reported_at_once() {
    let s = session_with_500();
    let form = s.checkout_form();

    let CheckoutError::Validation(errors) = s.checkout(form, Utc::now()).unwrap_err() else {
        panic!("expected validation errors");
    };
    let fields: Vec<CheckoutField> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(
        fields,
        [
            CheckoutField::PhoneNumber,
            CheckoutField::PickupName,
            CheckoutField::PickupPhone,
            CheckoutField::DeliveryLocation,
        ]
    );
}

#[test]
fn test_link_targets_destination_with_encoded_message() {
    let s = session_with_500();
    let placed = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
    let outcome = s
        .checkout(valid_form(&s, ServiceMode::Delivery), placed)
        .unwrap();

    let link = outcome.link.as_str();
    assert!(link.starts_with("https://wa.me/5353123456?text="));
    assert!(link.contains("NEW%20ORDER%20-%20TECH%20BAZAAR"));
    assert!(link.contains("%0A"));
    assert!(!link.contains(' '));

    let text = outcome
        .link
        .query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert_eq!(text, outcome.message);
    assert!(text.contains("*TOTAL:* $575"));
    assert!(text.contains("*Date:* 18/10/2026 09:30:00"));
}

#[test]
fn test_pickup_order_has_no_fee_and_keeps_cart() {
    let s = session_with_500();
    let outcome = s
        .checkout(valid_form(&s, ServiceMode::Pickup), Utc::now())
        .unwrap();

    assert!(outcome.summary.delivery_fee.is_zero());
    assert_eq!(outcome.summary.total, Price::whole(500, CurrencyCode::USD));
    assert_eq!(s.cart().total_items(), 2);
}

#[test]
fn test_summary_json_shape() {
    let s = session_with_500();
    let outcome = s
        .checkout(valid_form(&s, ServiceMode::Delivery), Utc::now())
        .unwrap();
    let json = serde_json::to_value(&outcome.summary).unwrap();

    assert_eq!(json["phone"], "55501000");
    assert_eq!(json["pickup_phone"], "55501001");
    assert_eq!(json["location"]["name"], "Reparto Sueño");
    assert_eq!(json["items"][0]["quantity"], 2);
    assert_eq!(json["subtotal"]["amount"], "500");
}
