//! Catalog filtering: category selector, free-text search and quick filters.
//!
//! Filtering is a pure function of the catalog and a [`ProductQuery`]. The
//! result keeps catalog order; nothing is re-sorted or cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tech_bazaar_core::{Category, CategoryParseError};
use thiserror::Error;

use crate::catalog::{Catalog, Product};

/// Products priced strictly below this are "Cheap".
const CHEAP_BELOW: i64 = 500;
/// Products priced strictly above this are "Expensive".
const EXPENSIVE_ABOVE: i64 = 1000;

/// Errors raised while building a query from user input.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    UnknownCategory(#[from] CategoryParseError),
}

/// Which categories pass the category predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategorySelector {
    #[default]
    All,
    Only(Category),
}

impl CategorySelector {
    /// Selector options in display order: `All`, then every category.
    pub fn options() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(Category::ALL.into_iter().map(Self::Only))
    }

    /// Returns true if `category` passes this selector.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl std::fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => f.write_str(category.as_str()),
        }
    }
}

impl std::str::FromStr for CategorySelector {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.parse()?))
        }
    }
}

/// Named coarse filter applied on top of category and search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuickFilter {
    #[default]
    All,
    Popular,
    Cheap,
    Expensive,
    Sale,
    /// A name with no defined meaning; passes everything.
    Unrecognized(String),
}

impl QuickFilter {
    /// The filters offered as chips, in display order.
    pub const CHIPS: [Self; 5] = [
        Self::All,
        Self::Popular,
        Self::Cheap,
        Self::Expensive,
        Self::Sale,
    ];

    /// Parse a filter name. Unknown names are kept as [`QuickFilter::Unrecognized`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "All" => Self::All,
            "Popular" => Self::Popular,
            "Cheap" => Self::Cheap,
            "Expensive" => Self::Expensive,
            "Sale" => Self::Sale,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns true if `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All | Self::Unrecognized(_) => true,
            Self::Popular => product.is_popular,
            Self::Cheap => product.price.amount < Decimal::from(CHEAP_BELOW),
            Self::Expensive => product.price.amount > Decimal::from(EXPENSIVE_ABOVE),
            Self::Sale => product.is_discounted(),
        }
    }
}

impl std::fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Popular => f.write_str("Popular"),
            Self::Cheap => f.write_str("Cheap"),
            Self::Expensive => f.write_str("Expensive"),
            Self::Sale => f.write_str("Sale"),
            Self::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// The three inputs of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category: CategorySelector,
    pub search: String,
    pub quick_filter: QuickFilter,
}

impl ProductQuery {
    /// Products passing all three predicates, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.iter().filter(|p| self.matches(p)).collect()
    }

    /// Returns true if `product` passes the category, search and quick-filter predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category)
            && matches_search(product, &self.search)
            && self.quick_filter.matches(product)
    }
}

/// Free-text search predicate.
///
/// Matches when the search string is empty, when the whole string appears in
/// the name, brand, model or category, or when any whitespace-separated token
/// appears in the name, brand or model. All comparisons ignore case. The token
/// pass is deliberately loose: a one-letter token matches most of the catalog.
#[must_use]
pub fn matches_search(product: &Product, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    let name = product.name.to_lowercase();
    let brand = product.brand.as_deref().map(str::to_lowercase);
    let model = product.model.as_deref().map(str::to_lowercase);

    let in_text_fields = |term: &str| {
        name.contains(term)
            || brand.as_deref().is_some_and(|b| b.contains(term))
            || model.as_deref().is_some_and(|m| m.contains(term))
    };

    in_text_fields(&needle)
        || product.category.as_str().to_lowercase().contains(&needle)
        || needle.split_whitespace().any(in_text_fields)
}
