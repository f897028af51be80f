//! Integration tests for cart behavior driven through the command bus.

#![allow(clippy::unwrap_used)]

use tech_bazaar_core::{Category, CurrencyCode, Price, ProductId};
use tech_bazaar_integration_tests::{product, session};
use tech_bazaar_storefront::bus::{Command, CommandBus, SessionEvent};

fn id(s: &str) -> ProductId {
    ProductId::from(s)
}

#[test]
fn test_repeated_adds_count_and_pin_first_price() {
    let mut s = session();
    let original = product("promo", "Promo Speaker", 120, Category::Audio);
    s.handle(Command::ProductArrived(original)).unwrap();

    for _ in 0..5 {
        s.handle(Command::AddToCart(id("promo"))).unwrap();
    }

    let line = s.cart().get(&id("promo")).unwrap();
    assert_eq!(line.quantity, 5);
    assert_eq!(line.price, Price::whole(120, CurrencyCode::USD));
}

#[test]
fn test_totals_hold_after_mixed_operations() {
    let mut s = session();
    let commands = [
        Command::AddToCart(id("1")),
        Command::AddToCart(id("4")),
        Command::AddToCart(id("4")),
        Command::UpdateQuantity(id("1"), 3),
        Command::AddToCart(id("7")),
        Command::RemoveFromCart(id("4")),
        Command::UpdateQuantity(id("7"), -5),
        Command::AddToCart(id("4")),
        Command::RemoveFromCart(id("absent")),
        Command::UpdateQuantity(id("absent"), 2),
    ];

    for command in commands {
        s.handle(command).unwrap();

        let lines = s.cart().lines();
        assert!(lines.iter().all(|l| l.quantity >= 1));
        let items: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
        assert_eq!(s.cart().total_items(), items);
        let price = lines
            .iter()
            .fold(Price::zero(CurrencyCode::USD), |acc, l| {
                Price::new(acc.amount + l.line_total().amount, acc.currency_code)
            });
        assert_eq!(s.cart().total_price(), price);
    }

    assert_eq!(s.cart().total_items(), 4);
    assert_eq!(s.cart().total_price(), Price::whole(1299 * 3 + 249, CurrencyCode::USD));
}

#[test]
fn test_zero_and_negative_quantity_remove() {
    let mut s = session();
    s.handle(Command::AddToCart(id("2"))).unwrap();
    s.handle(Command::AddToCart(id("3"))).unwrap();

    s.handle(Command::UpdateQuantity(id("2"), 0)).unwrap();
    s.handle(Command::UpdateQuantity(id("3"), -5)).unwrap();
    assert!(s.cart().is_empty());
}

#[test]
fn test_item_added_event_carries_display_fields() {
    let mut s = session();
    let mut events = s.events().subscribe();
    s.handle(Command::AddToCart(id("5"))).unwrap();

    match events.try_recv().unwrap() {
        SessionEvent::ItemAdded { id, name, image } => {
            assert_eq!(id.as_str(), "5");
            assert_eq!(name, "iPad Pro 12.9\" M4");
            assert!(image.starts_with("https://"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_bus_commands_apply_in_order() {
    let (bus, rx) = CommandBus::new();
    for command in [
        Command::AddToCart(id("8")),
        Command::AddToCart(id("8")),
        Command::UpdateQuantity(id("8"), 1),
        Command::ShowCart,
        Command::Shutdown,
    ] {
        assert!(bus.send(command));
    }

    let s = session().run(rx).await;
    assert_eq!(s.cart().total_items(), 1);
    assert_eq!(s.cart().total_price(), Price::whole(1199, CurrencyCode::USD));
}
