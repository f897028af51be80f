//! In-memory product catalog.
//!
//! The catalog is seeded once per session and never mutated. Products that
//! arrive later are announced through the notification feed instead.

use serde::{Deserialize, Serialize};
use tech_bazaar_core::{Category, CurrencyCode, Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub original_price: Option<Price>,
    /// Discount percentage shown next to the original price.
    pub discount: Option<u8>,
    pub image: String,
    pub category: Category,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_popular: bool,
    pub is_sale: bool,
    pub is_new: bool,
    pub in_stock: bool,
}

impl Product {
    /// Returns true if the product is on sale or carries a non-zero discount.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.is_sale || self.discount.is_some_and(|pct| pct > 0)
    }
}

/// The fixed, ordered list of products offered in a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The store's standard catalog, priced in `currency`.
    #[must_use]
    pub fn seeded(currency: CurrencyCode) -> Self {
        Self::from_products(seed_products(currency))
    }

    /// Find a product by ID.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Iterate products in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// All products in catalog order.
    #[must_use]
    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products flagged as new, in catalog order.
    pub fn new_arrivals(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_new)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

/// Base record with every optional attribute unset.
fn base(
    id: &str,
    name: &str,
    price: i64,
    category: Category,
    image: &str,
    currency: CurrencyCode,
) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        price: Price::whole(price, currency),
        original_price: None,
        discount: None,
        image: image.to_string(),
        category,
        brand: None,
        model: None,
        color: None,
        description: None,
        is_popular: false,
        is_sale: false,
        is_new: false,
        in_stock: true,
    }
}

/// Brand, model and color, the attributes every seeded product carries.
fn described(mut product: Product, brand: &str, model: &str, color: &str) -> Product {
    product.brand = Some(brand.to_string());
    product.model = Some(model.to_string());
    product.color = Some(color.to_string());
    product
}

fn marked_down(mut product: Product, original: i64, discount: u8) -> Product {
    product.original_price = Some(Price::whole(original, product.price.currency_code));
    product.discount = Some(discount);
    product
}

fn seed_products(currency: CurrencyCode) -> Vec<Product> {
    vec![
        Product {
            description: Some("6.8\" flagship with S Pen and 200MP camera".to_string()),
            is_popular: true,
            is_sale: true,
            ..marked_down(
                described(
                    base(
                        "1",
                        "Samsung Galaxy S24 Ultra",
                        1299,
                        Category::Mobile,
                        "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=400",
                        currency,
                    ),
                    "Samsung",
                    "Galaxy S24 Ultra",
                    "Titanium Black",
                ),
                1499,
                13,
            )
        },
        Product {
            description: Some("16-inch Liquid Retina XDR laptop with M3 chip".to_string()),
            is_popular: true,
            ..marked_down(
                described(
                    base(
                        "2",
                        "MacBook Pro 16\" M3",
                        2499,
                        Category::Laptop,
                        "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=400",
                        currency,
                    ),
                    "Apple",
                    "MacBook Pro 16\"",
                    "Space Gray",
                ),
                2699,
                7,
            )
        },
        Product {
            description: Some("Console with enhanced GPU and 2TB storage".to_string()),
            is_popular: true,
            ..described(
                base(
                    "3",
                    "PlayStation 5 Pro",
                    699,
                    Category::Gaming,
                    "https://images.unsplash.com/photo-1606813907291-d86efa9b94db?w=400",
                    currency,
                ),
                "Sony",
                "PS5 Pro",
                "White",
            )
        },
        Product {
            description: Some("Active noise cancelling earbuds".to_string()),
            is_sale: true,
            ..marked_down(
                described(
                    base(
                        "4",
                        "AirPods Pro 3rd Gen",
                        249,
                        Category::Audio,
                        "https://images.unsplash.com/photo-1606220945770-b5b6c2c55bf1?w=400",
                        currency,
                    ),
                    "Apple",
                    "AirPods Pro",
                    "White",
                ),
                279,
                11,
            )
        },
        Product {
            description: Some("Tablet with Ultra Retina XDR display".to_string()),
            ..described(
                base(
                    "5",
                    "iPad Pro 12.9\" M4",
                    1099,
                    Category::Accessories,
                    "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=400",
                    currency,
                ),
                "Apple",
                "iPad Pro 12.9\"",
                "Silver",
            )
        },
        Product {
            description: Some("55-inch 4K QLED smart TV".to_string()),
            is_sale: true,
            ..marked_down(
                described(
                    base(
                        "6",
                        "Samsung QLED 55\" 4K",
                        899,
                        Category::TV,
                        "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?w=400",
                        currency,
                    ),
                    "Samsung",
                    "QLED 55\"",
                    "Black",
                ),
                1199,
                25,
            )
        },
        Product {
            description: Some("Cordless vacuum with laser dust detection".to_string()),
            ..described(
                base(
                    "7",
                    "Dyson V15 Detect",
                    449,
                    Category::Appliances,
                    "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400",
                    currency,
                ),
                "Dyson",
                "V15 Detect",
                "Yellow",
            )
        },
        Product {
            description: Some("Titanium iPhone with 5x telephoto camera".to_string()),
            is_popular: true,
            is_sale: true,
            ..marked_down(
                described(
                    base(
                        "8",
                        "iPhone 15 Pro Max",
                        1199,
                        Category::Mobile,
                        "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=400",
                        currency,
                    ),
                    "Apple",
                    "iPhone 15 Pro Max",
                    "Natural Titanium",
                ),
                1299,
                8,
            )
        },
    ]
}

/// Products that arrive during a session and are announced as new.
#[must_use]
pub fn incoming_products(currency: CurrencyCode) -> Vec<Product> {
    vec![
        Product {
            is_new: true,
            ..described(
                base(
                    "hp-victus-gaming",
                    "HP Victus Gaming Laptop 15.6\" RTX 3050",
                    866,
                    Category::Laptop,
                    "https://images.unsplash.com/photo-1593642702821-c8da6771f0c6?w=300&h=200&fit=crop",
                    currency,
                ),
                "HP",
                "Victus 15",
                "Blue",
            )
        },
        Product {
            is_new: true,
            ..marked_down(
                described(
                    base(
                        "samsung-s21-fe",
                        "Samsung Galaxy S21 FE 5G",
                        434,
                        Category::Mobile,
                        "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=300&h=200&fit=crop",
                        currency,
                    ),
                    "Samsung",
                    "Galaxy S21 FE",
                    "Lavender",
                ),
                600,
                28,
            )
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_order() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_seeded_ids_unique() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let galaxy = catalog.find(&ProductId::from("1")).unwrap();
        assert_eq!(galaxy.price, Price::whole(1299, CurrencyCode::USD));
        assert_eq!(galaxy.category, Category::Mobile);
        assert!(galaxy.is_popular);
        assert!(catalog.find(&ProductId::from("99")).is_none());
    }

    #[test]
    fn test_is_discounted() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        // MacBook: discount but no sale flag
        assert!(catalog.find(&ProductId::from("2")).unwrap().is_discounted());
        // Dyson: neither
        assert!(!catalog.find(&ProductId::from("7")).unwrap().is_discounted());
    }

    #[test]
    fn test_zero_discount_is_not_a_sale() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let mut product = catalog.find(&ProductId::from("7")).unwrap().clone();
        product.discount = Some(0);
        assert!(!product.is_discounted());
    }

    #[test]
    fn test_incoming_products_are_new() {
        let incoming = incoming_products(CurrencyCode::USD);
        assert!(!incoming.is_empty());
        assert!(incoming.iter().all(|p| p.is_new));

        let seeded = Catalog::seeded(CurrencyCode::USD);
        assert!(incoming.iter().all(|p| seeded.find(&p.id).is_none()));
        assert_eq!(seeded.new_arrivals().count(), 0);
    }
}
