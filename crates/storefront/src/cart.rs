//! Session cart.
//!
//! One [`CartLine`] per product ID, kept in the order products were first
//! added. A line never holds a quantity below one: setting a quantity of zero
//! or less removes the line instead.

use serde::{Deserialize, Serialize};
use tech_bazaar_core::{CurrencyCode, Price, ProductId};
use tracing::{debug, instrument};

use crate::bus::{EventBus, SessionEvent};
use crate::catalog::Product;

/// One aggregated row in the cart.
///
/// Display attributes are copied from the product the first time it is added
/// and are not refreshed by later adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub image: String,
    pub color: Option<String>,
    pub quantity: u32,
    pub in_stock: bool,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.image.clone(),
            color: product.color.clone(),
            quantity: 1,
            in_stock: product.in_stock,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart for one session.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: CurrencyCode,
    events: Option<EventBus>,
}

impl Cart {
    /// Create an empty cart whose totals are quoted in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            events: None,
        }
    }

    /// Publish an [`SessionEvent::ItemAdded`] on `events` for every add.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line if there is one, otherwise inserts a new
    /// line with quantity 1.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(quantity = line.quantity, "Incremented cart line");
        } else {
            self.lines.push(CartLine::from_product(product));
            debug!("Inserted cart line");
        }

        if let Some(events) = &self.events {
            events.publish(SessionEvent::ItemAdded {
                id: product.id.clone(),
                name: product.name.clone(),
                image: product.image.clone(),
            });
        }
    }

    /// Remove the line for `id`. Returns false if there was none.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        let removed = self.lines.len() != before;
        if !removed {
            debug!("No cart line to remove");
        }
        removed
    }

    /// Set the quantity of the line for `id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }

        match self.lines.iter_mut().find(|l| &l.id == id) {
            Some(line) => line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX),
            None => debug!("No cart line to update"),
        }
    }

    /// Raise the line's quantity by one.
    pub fn increment(&mut self, id: &ProductId) {
        if let Some(quantity) = self.get(id).map(|l| l.quantity) {
            self.update_quantity(id, i64::from(quantity) + 1);
        }
    }

    /// Lower the line's quantity by one, removing it at zero.
    pub fn decrement(&mut self, id: &ProductId) {
        if let Some(quantity) = self.get(id).map(|l| l.quantity) {
            self.update_quantity(id, i64::from(quantity) - 1);
        }
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price times quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let amount = self.lines.iter().map(|l| l.line_total().amount).sum();
        Price::new(amount, self.currency)
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency the totals are quoted in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;

    fn product(id: &str) -> Product {
        Catalog::seeded(CurrencyCode::USD)
            .find(&ProductId::from(id))
            .unwrap()
            .clone()
    }

    fn usd(units: i64) -> Price {
        Price::whole(units, CurrencyCode::USD)
    }

    #[test]
    fn test_line_copies_stock_flag() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let mut sold_out = product("5");
        sold_out.in_stock = false;
        cart.add_to_cart(&product("4"));
        cart.add_to_cart(&sold_out);

        assert!(cart.get(&ProductId::from("4")).unwrap().in_stock);
        assert!(!cart.get(&ProductId::from("5")).unwrap().in_stock);
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new(CurrencyCode::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), usd(0));
    }

    #[test]
    fn test_repeated_adds_increment_one_line() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let galaxy = product("1");
        for _ in 0..4 {
            cart.add_to_cart(&galaxy);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&galaxy.id).unwrap().quantity, 4);
    }

    #[test]
    fn test_first_seen_attributes_win() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let original = product("3");
        cart.add_to_cart(&original);

        let mut repriced = original.clone();
        repriced.price = usd(1);
        repriced.name = "Renamed".to_string();
        cart.add_to_cart(&repriced);

        let line = cart.get(&original.id).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, usd(699));
        assert_eq!(line.name, "PlayStation 5 Pro");
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add_to_cart(&product("4")); // 249
        cart.add_to_cart(&product("4"));
        cart.add_to_cart(&product("7")); // 449
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), usd(249 * 2 + 449));
    }

    #[test]
    fn test_fractional_totals_are_exact() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let mut cable = product("4");
        cable.price = Price::new(Decimal::new(10, 2), CurrencyCode::USD); // 0.10
        for _ in 0..3 {
            cart.add_to_cart(&cable);
        }
        assert_eq!(cart.total_price().amount, Decimal::new(30, 2));
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let airpods = product("4");
        cart.add_to_cart(&airpods);
        cart.update_quantity(&airpods.id, 5);
        assert_eq!(cart.get(&airpods.id).unwrap().quantity, 5);
        cart.update_quantity(&airpods.id, 2);
        assert_eq!(cart.get(&airpods.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let a = product("1");
        let b = product("2");
        cart.add_to_cart(&a);
        cart.add_to_cart(&b);

        cart.update_quantity(&a.id, 0);
        assert!(cart.get(&a.id).is_none());

        cart.update_quantity(&b.id, -5);
        assert!(cart.get(&b.id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add_to_cart(&product("1"));
        cart.update_quantity(&ProductId::from("missing"), 3);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add_to_cart(&product("1"));
        assert!(!cart.remove_from_cart(&ProductId::from("missing")));
        assert!(cart.remove_from_cart(&ProductId::from("1")));
        assert!(!cart.remove_from_cart(&ProductId::from("1")));
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let tv = product("6");
        cart.add_to_cart(&tv);
        cart.increment(&tv.id);
        assert_eq!(cart.get(&tv.id).unwrap().quantity, 2);
        cart.decrement(&tv.id);
        cart.decrement(&tv.id);
        assert!(cart.get(&tv.id).is_none());
    }

    #[test]
    fn test_line_order_is_first_add_order() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add_to_cart(&product("5"));
        cart.add_to_cart(&product("2"));
        cart.add_to_cart(&product("5"));
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["5", "2"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add_to_cart(&product("1"));
        cart.add_to_cart(&product("2"));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), usd(0));
    }

    #[test]
    fn test_add_publishes_item_added() {
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let mut cart = Cart::new(CurrencyCode::USD).with_events(events);

        let dyson = product("7");
        cart.add_to_cart(&dyson);
        cart.add_to_cart(&dyson);

        for _ in 0..2 {
            match rx.try_recv().unwrap() {
                SessionEvent::ItemAdded { id, name, image } => {
                    assert_eq!(id, dyson.id);
                    assert_eq!(name, dyson.name);
                    assert_eq!(image, dyson.image);
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn test_totals_hold_after_mixed_operations() {
        let mut cart = Cart::new(CurrencyCode::USD);
        let catalog = Catalog::seeded(CurrencyCode::USD);
        for (step, p) in catalog.iter().cycle().take(20).enumerate() {
            match step % 4 {
                0 | 1 => cart.add_to_cart(p),
                2 => cart.update_quantity(&p.id, i64::try_from(step).unwrap() - 10),
                _ => {
                    cart.remove_from_cart(&p.id);
                }
            }

            let items: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
            let price: Decimal = cart
                .lines()
                .iter()
                .map(|l| l.price.amount * Decimal::from(l.quantity))
                .sum();
            assert_eq!(cart.total_items(), items);
            assert_eq!(cart.total_price().amount, price);
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
    }
}
